//! Open-path tour construction over the distance graph.
//!
//! The visiting order is a Hamiltonian path, not a cycle: a telescope does
//! not slew back to its first target. Construction is greedy
//! nearest-neighbour growth; refinement is a bounded number of 2-opt
//! passes (segment reversals) over the open path. Every tie is broken by
//! the lexicographically lowest body name, so identical inputs always
//! produce identical tours.

use crate::catalog::CelestialBody;
use crate::constants::Degree;
use crate::distance::DistanceGraph;

/// Two candidate distances closer than this are treated as tied and fall
/// back to the name order.
const DISTANCE_TIE_TOL: Degree = 1.0e-12;

/// A 2-opt exchange must improve the path by more than this to be applied.
const IMPROVEMENT_TOL: Degree = 1.0e-9;

/// Upper bound on 2-opt sweeps over the path.
const MAX_REFINE_PASSES: usize = 32;

/// An ordered visiting sequence over the full body set and its total slew
/// cost in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    /// Body names, one per input body, in visiting order.
    pub order: Vec<String>,
    /// Sum of consecutive edge weights along the open path.
    pub cost: Degree,
}

/// Compute a near-optimal open-path visiting order.
///
/// Arguments
/// ---------
/// * `bodies`: the body set; `graph` must have been built over it in the
///   same order.
/// * `graph`: pairwise separations.
/// * `start`: index of a fixed first body. When given, the body stays at
///   the head of the tour through refinement; when absent, growth starts
///   from the lexicographically first name and refinement may reorder
///   freely.
///
/// Returns
/// --------
/// * A [`Tour`] visiting every body exactly once. The empty set yields an
///   empty tour; this function never fails.
pub fn solve(bodies: &[CelestialBody], graph: &DistanceGraph, start: Option<usize>) -> Tour {
    let n = bodies.len();
    if n == 0 {
        return Tour {
            order: Vec::new(),
            cost: 0.0,
        };
    }

    let fixed_start = start.is_some();
    let first = start.unwrap_or_else(|| lexicographic_first(bodies));

    let mut path = nearest_neighbor_path(bodies, graph, first);
    refine_two_opt(graph, &mut path, fixed_start);

    let cost = graph.path_cost(&path);
    Tour {
        order: path.into_iter().map(|i| bodies[i].name.clone()).collect(),
        cost,
    }
}

fn lexicographic_first(bodies: &[CelestialBody]) -> usize {
    let mut first = 0;
    for (index, body) in bodies.iter().enumerate().skip(1) {
        if body.name < bodies[first].name {
            first = index;
        }
    }
    first
}

/// Greedy growth: repeatedly append the unvisited body nearest to the
/// current path end, ties resolved by name.
fn nearest_neighbor_path(
    bodies: &[CelestialBody],
    graph: &DistanceGraph,
    first: usize,
) -> Vec<usize> {
    let n = bodies.len();
    let mut visited = vec![false; n];
    visited[first] = true;
    let mut path = Vec::with_capacity(n);
    path.push(first);

    while path.len() < n {
        let last = path[path.len() - 1];
        let mut best: Option<usize> = None;
        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }
            best = match best {
                None => Some(candidate),
                Some(current) => {
                    let d_candidate = graph.weight(last, candidate);
                    let d_current = graph.weight(last, current);
                    let closer = d_candidate < d_current - DISTANCE_TIE_TOL;
                    let tied = (d_candidate - d_current).abs() <= DISTANCE_TIE_TOL
                        && bodies[candidate].name < bodies[current].name;
                    if closer || tied {
                        Some(candidate)
                    } else {
                        Some(current)
                    }
                }
            };
        }
        if let Some(next) = best {
            visited[next] = true;
            path.push(next);
        }
    }

    path
}

/// First-improvement 2-opt over the open path.
///
/// Reversing `path[i..=j]` replaces at most two edges: the one entering the
/// segment (absent when `i` is the path head) and the one leaving it
/// (absent when `j` is the path tail). With `fixed_start`, reversals that
/// would displace the head are skipped.
fn refine_two_opt(graph: &DistanceGraph, path: &mut [usize], fixed_start: bool) {
    let n = path.len();
    if n < 3 {
        return;
    }

    let lowest = usize::from(fixed_start);
    let mut passes = 0;
    let mut improved = true;
    while improved && passes < MAX_REFINE_PASSES {
        improved = false;
        passes += 1;
        for i in lowest..n - 1 {
            for j in (i + 1)..n {
                if i == 0 && j == n - 1 {
                    // Reversing the whole path leaves its cost unchanged.
                    continue;
                }
                let mut delta = 0.0;
                if i > 0 {
                    delta += graph.weight(path[i - 1], path[j]) - graph.weight(path[i - 1], path[i]);
                }
                if j < n - 1 {
                    delta += graph.weight(path[i], path[j + 1]) - graph.weight(path[j], path[j + 1]);
                }
                if delta < -IMPROVEMENT_TOL {
                    path[i..=j].reverse();
                    improved = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tour_test {
    use super::*;

    fn body(name: &str, ra: f64, dec: f64) -> CelestialBody {
        CelestialBody::new(name, ra, dec).unwrap()
    }

    fn names(tour: &Tour) -> Vec<&str> {
        tour.order.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_empty_set_yields_empty_tour() {
        let bodies: Vec<CelestialBody> = Vec::new();
        let graph = DistanceGraph::new(&bodies);
        let tour = solve(&bodies, &graph, None);
        assert!(tour.order.is_empty());
        assert_eq!(tour.cost, 0.0);
    }

    #[test]
    fn test_single_body_tour() {
        let bodies = vec![body("x", 1.0, 2.0)];
        let graph = DistanceGraph::new(&bodies);
        let tour = solve(&bodies, &graph, None);
        assert_eq!(names(&tour), ["x"]);
        assert_eq!(tour.cost, 0.0);
    }

    #[test]
    fn test_collinear_bodies_are_visited_in_sweep_order() {
        let bodies = vec![
            body("a", 0.0, 0.0),
            body("b", 10.0, 0.0),
            body("c", 20.0, 0.0),
            body("d", 30.0, 0.0),
        ];
        let graph = DistanceGraph::new(&bodies);

        let tour = solve(&bodies, &graph, None);
        assert_eq!(names(&tour), ["a", "b", "c", "d"]);
        assert!((tour.cost - 30.0).abs() < 1e-9);

        let tour = solve(&bodies, &graph, Some(3));
        assert_eq!(names(&tour), ["d", "c", "b", "a"]);
        assert!((tour.cost - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_neighbor_ties_break_by_name() {
        // "b" and "c" are both 10 degrees from "a"
        let bodies = vec![
            body("a", 0.0, 0.0),
            body("c", 10.0, 0.0),
            body("b", 350.0, 0.0),
        ];
        let graph = DistanceGraph::new(&bodies);
        let tour = solve(&bodies, &graph, Some(0));
        assert_eq!(names(&tour)[1], "b");
    }

    #[test]
    fn test_fixed_start_survives_refinement() {
        // The greedy path from "mid" is poor; refinement must improve it
        // without moving "mid" off the head.
        let bodies = vec![
            body("mid", 180.0, 0.0),
            body("east", 200.0, 0.0),
            body("far-east", 220.0, 0.0),
            body("west", 160.0, 0.0),
            body("far-west", 140.0, 0.0),
        ];
        let graph = DistanceGraph::new(&bodies);
        let tour = solve(&bodies, &graph, Some(0));
        assert_eq!(tour.order[0], "mid");
        assert_eq!(tour.order.len(), 5);
    }

    #[test]
    fn test_refinement_untangles_a_greedy_zigzag() {
        let bodies = vec![
            body("p1", 0.0, 0.0),
            body("p2", 0.0, 30.0),
            body("p3", 0.0, 1.0),
            body("p4", 0.0, 31.0),
            body("p5", 0.0, 2.0),
            body("p6", 0.0, 32.0),
        ];
        let graph = DistanceGraph::new(&bodies);
        let tour = solve(&bodies, &graph, None);
        // Identity order zigzags for ~145 degrees; the two clusters split
        // cleanly into 2 + 28 + 2 = 32.
        let identity: f64 = (0..bodies.len() - 1)
            .map(|i| graph.weight(i, i + 1))
            .sum();
        assert!(tour.cost < identity);
        assert!((tour.cost - 32.0).abs() < 1e-6);
    }
}
