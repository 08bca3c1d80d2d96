//! Height generators for the grid.
//!
//! - [`FaultPartitionGenerator`]: raise/lower vertices across random fault planes

pub mod fault;

pub use fault::{FaultPartitionGenerator, FaultPlane};
