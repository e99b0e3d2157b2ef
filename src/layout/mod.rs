// Copyright 2026 The Ontoview Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Force-directed layout: configuration, force kernels, the optional
//! Barnes-Hut accelerator, and the simulation state machine that ties
//! them together.

pub mod config;
pub mod forces;
pub mod quadtree;
pub mod simulation;

pub use self::config::SimConfig;
pub use self::simulation::{Phase, Simulation};
