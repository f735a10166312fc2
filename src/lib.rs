//! Random-jump maze carving on a wall array, breadth-first solving, and a
//! session that animates both from an external clock.

pub mod config;
pub mod generators;
pub mod maze;
pub mod render;
pub mod session;
pub mod solvers;
