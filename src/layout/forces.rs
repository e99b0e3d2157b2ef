// Copyright 2026 The Ontoview Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Pure force kernels for the layout simulation.
//!
//! Each function returns the force on the first position. The
//! simulation accumulates these per node, clamps the result, and
//! integrates.

use crate::graph::Position;

/// Below this squared distance two nodes count as coincident and get a
/// deterministic nudge instead of a singular force.
pub(crate) const MIN_DISTANCE_SQ: f64 = 1e-4;

/// Saturation bound for accumulated force components.
pub(crate) const FORCE_CLAMP: f64 = 1e3;

/// Coulomb-style charge force between two nodes. Negative charge
/// repels, matching the d3 convention.
pub fn repulsion(pos1: Position, pos2: Position, charge_strength: f64) -> Position {
    let delta = pos1 - pos2;
    let dist_sq = delta.x * delta.x + delta.y * delta.y;

    if dist_sq < MIN_DISTANCE_SQ {
        return Position::new(
            ((pos1.x + pos2.x) * 7.0).sin() * 0.01,
            ((pos1.y + pos2.y) * 11.0).cos() * 0.01,
        );
    }

    let f = -charge_strength / dist_sq;
    let dist = dist_sq.sqrt();
    Position::new(f * delta.x / dist, f * delta.y / dist)
}

/// Hooke spring force along an edge, proportional to the deviation
/// from the rest length.
pub fn attraction(pos1: Position, pos2: Position, rest_length: f64, strength: f64) -> Position {
    let delta = pos2 - pos1;
    let dist = delta.length().max(0.1);
    let f = (dist - rest_length) * strength;
    Position::new(f * delta.x / dist, f * delta.y / dist)
}

/// Linear pull toward the configured center.
pub fn centering(pos: Position, center: Position, strength: f64) -> Position {
    (center - pos) * strength
}

/// Clamps one force component: NaN becomes zero, everything else
/// saturates at `FORCE_CLAMP`.
pub fn clamp_component(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-FORCE_CLAMP, FORCE_CLAMP)
    }
}

pub fn clamp_force(force: Position) -> Position {
    Position::new(clamp_component(force.x), clamp_component(force.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn negative_charge_repels() {
        let force = repulsion(Position::new(10.0, 0.0), Position::new(0.0, 0.0), -30.0);
        // pos1 sits to the right of pos2, so it is pushed further right
        assert!(approx_eq!(f64, 0.3, force.x));
        assert!(approx_eq!(f64, 0.0, force.y));
    }

    #[test]
    fn positive_charge_attracts() {
        let force = repulsion(Position::new(10.0, 0.0), Position::new(0.0, 0.0), 30.0);
        assert!(force.x < 0.0);
    }

    #[test]
    fn coincident_nodes_get_a_deterministic_nudge() {
        let pos = Position::new(5.0, 5.0);
        let force = repulsion(pos, pos, -30.0);
        let again = repulsion(pos, pos, -30.0);

        let magnitude = force.length();
        assert!(
            magnitude < 0.1 && !magnitude.is_nan(),
            "force should be small and valid, got: {magnitude}"
        );
        assert_eq!(force, again);
    }

    #[test]
    fn stretched_spring_pulls_together() {
        let force = attraction(Position::new(0.0, 0.0), Position::new(50.0, 0.0), 30.0, 1.0);
        assert!(approx_eq!(f64, 20.0, force.x));
        assert!(approx_eq!(f64, 0.0, force.y));
    }

    #[test]
    fn compressed_spring_pushes_apart() {
        let force = attraction(Position::new(0.0, 0.0), Position::new(10.0, 0.0), 30.0, 1.0);
        assert!(force.x < 0.0);
    }

    #[test]
    fn spring_at_rest_is_balanced() {
        let force = attraction(Position::new(0.0, 0.0), Position::new(30.0, 0.0), 30.0, 1.0);
        assert!(approx_eq!(f64, 0.0, force.x));
        assert!(approx_eq!(f64, 0.0, force.y));
    }

    #[test]
    fn centering_points_at_center() {
        let force = centering(Position::new(100.0, 50.0), Position::new(0.0, 0.0), 0.1);
        assert!(approx_eq!(f64, -10.0, force.x));
        assert!(approx_eq!(f64, -5.0, force.y));
    }

    #[test]
    fn clamp_handles_non_finite_values() {
        assert_eq!(0.0, clamp_component(f64::NAN));
        assert_eq!(FORCE_CLAMP, clamp_component(f64::INFINITY));
        assert_eq!(-FORCE_CLAMP, clamp_component(f64::NEG_INFINITY));
        assert_eq!(5.0, clamp_component(5.0));
        assert_eq!(FORCE_CLAMP, clamp_component(1e9));

        let clamped = clamp_force(Position::new(f64::NAN, -1e12));
        assert_eq!(Position::new(0.0, -FORCE_CLAMP), clamped);
    }
}
