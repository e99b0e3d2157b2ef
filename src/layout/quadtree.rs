// Copyright 2026 The Ontoview Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Barnes-Hut quadtree for approximate charge repulsion.
//!
//! Cells live in a flat arena and carry their center of mass and total
//! mass. The query treats any cell whose `width / distance` ratio is
//! below the opening angle as a single body, and falls back to exact
//! per-point forces everywhere else.

use std::mem;

use crate::graph::Position;
use crate::layout::forces;

const MAX_DEPTH: usize = 16;

#[derive(Clone, Debug)]
struct Cell {
    // Region center and half-width
    cx: f64,
    cy: f64,
    half: f64,
    // Aggregates over all points in the region
    sum_x: f64,
    sum_y: f64,
    mass: f64,
    /// Child cell indices (NW, NE, SW, SE) once split.
    children: Option<[usize; 4]>,
    /// Point indices held directly; more than one only at `MAX_DEPTH`.
    members: Vec<usize>,
}

impl Cell {
    fn new(cx: f64, cy: f64, half: f64) -> Self {
        Cell {
            cx,
            cy,
            half,
            sum_x: 0.0,
            sum_y: 0.0,
            mass: 0.0,
            children: None,
            members: Vec::new(),
        }
    }

    fn center_of_mass(&self) -> Position {
        Position::new(self.sum_x / self.mass, self.sum_y / self.mass)
    }

    fn quadrant(&self, pos: Position) -> usize {
        let east = pos.x >= self.cx;
        let south = pos.y >= self.cy;
        match (south, east) {
            (false, false) => 0,
            (false, true) => 1,
            (true, false) => 2,
            (true, true) => 3,
        }
    }
}

pub(crate) struct QuadTree {
    cells: Vec<Cell>,
}

impl QuadTree {
    /// Builds a tree over the given points. Returns `None` when there
    /// are too few points to need one or any coordinate is non-finite
    /// (the exact pass handles both).
    pub(crate) fn build(points: &[Position]) -> Option<QuadTree> {
        if points.len() < 2 {
            return None;
        }

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for point in points {
            if !point.x.is_finite() || !point.y.is_finite() {
                return None;
            }
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        let half = ((max_x - min_x).max(max_y - min_y) / 2.0).max(0.5) + 1e-6;
        let root = Cell::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0, half);

        let mut tree = QuadTree { cells: vec![root] };
        for (index, point) in points.iter().enumerate() {
            tree.insert(0, index, *point, 0, points);
        }
        Some(tree)
    }

    fn insert(
        &mut self,
        mut cell_idx: usize,
        index: usize,
        pos: Position,
        mut depth: usize,
        points: &[Position],
    ) {
        loop {
            {
                let cell = &mut self.cells[cell_idx];
                cell.sum_x += pos.x;
                cell.sum_y += pos.y;
                cell.mass += 1.0;

                if depth >= MAX_DEPTH {
                    cell.members.push(index);
                    return;
                }
                if cell.children.is_none() && cell.members.is_empty() {
                    cell.members.push(index);
                    return;
                }
            }

            let children = match self.cells[cell_idx].children {
                Some(children) => children,
                None => {
                    // Occupied leaf: split it and push the occupant
                    // down one level before descending further.
                    let occupants = mem::take(&mut self.cells[cell_idx].members);
                    let children = self.split(cell_idx);
                    for member in occupants {
                        let member_pos = points[member];
                        let quadrant = self.cells[cell_idx].quadrant(member_pos);
                        self.insert(children[quadrant], member, member_pos, depth + 1, points);
                    }
                    children
                }
            };

            let quadrant = self.cells[cell_idx].quadrant(pos);
            cell_idx = children[quadrant];
            depth += 1;
        }
    }

    fn split(&mut self, cell_idx: usize) -> [usize; 4] {
        let (cx, cy, half) = {
            let cell = &self.cells[cell_idx];
            (cell.cx, cell.cy, cell.half)
        };
        let q = half / 2.0;
        let centers = [
            (cx - q, cy - q),
            (cx + q, cy - q),
            (cx - q, cy + q),
            (cx + q, cy + q),
        ];

        let mut children = [0usize; 4];
        for (slot, (ccx, ccy)) in children.iter_mut().zip(centers) {
            *slot = self.cells.len();
            self.cells.push(Cell::new(ccx, ccy, q));
        }
        self.cells[cell_idx].children = Some(children);
        children
    }

    /// Approximate total repulsion on `points[index]` from every other
    /// point.
    pub(crate) fn force_on(
        &self,
        index: usize,
        points: &[Position],
        theta: f64,
        charge_strength: f64,
    ) -> Position {
        let pos = points[index];
        let mut force = Position::default();
        let mut stack = vec![0usize];

        while let Some(cell_idx) = stack.pop() {
            let cell = &self.cells[cell_idx];
            if cell.mass == 0.0 {
                continue;
            }

            match cell.children {
                Some(children) => {
                    let com = cell.center_of_mass();
                    let delta = pos - com;
                    let dist = delta.length();
                    let width = cell.half * 2.0;
                    if dist > 0.0 && width / dist < theta {
                        force = force + forces::repulsion(pos, com, charge_strength) * cell.mass;
                    } else {
                        stack.extend(children);
                    }
                }
                None => {
                    for &member in &cell.members {
                        if member != index {
                            force =
                                force + forces::repulsion(pos, points[member], charge_strength);
                        }
                    }
                }
            }
        }

        force
    }
}
