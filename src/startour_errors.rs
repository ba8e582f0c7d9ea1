use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarTourError {
    #[error("Right ascension {0} out of range [0, 360)")]
    InvalidRightAscension(f64),

    #[error("Declination {0} out of range [-90, 90]")]
    InvalidDeclination(f64),

    #[error("Latitude {0} out of range [-90, 90]")]
    InvalidLatitude(f64),

    #[error("Longitude {0} out of range [-180, 180]")]
    InvalidLongitude(f64),

    #[error("Site height {0} must be a non-negative number of meters")]
    InvalidHeight(f64),

    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),

    #[error("Invalid UTC offset: {0}")]
    InvalidUtcOffset(String),

    #[error("Starting body not found in the catalog: {0}")]
    UnknownStartBody(String),

    #[error("Name lookup failed for {name}: {reason}")]
    ResolutionFailed { name: String, reason: String },

    #[error("NaN encountered in site coordinates: {0}")]
    NanInput(#[from] ordered_float::FloatIsNan),

    #[error("HTTP ureq error: {0}")]
    UreqHttpError(#[from] ureq::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV report error: {0}")]
    CsvError(#[from] csv::Error),
}
