//! Step-driven A* best-first search over pluggable state spaces, with demo
//! domains for the Romania road map, the 8-puzzle and terrain mazes.

pub mod config;
pub mod domains;
pub mod engine;
mod frontier;
mod node;
pub mod scenario;
pub mod solution;
pub mod stat;
pub mod state;
