//! Platform abstraction layer
//!
//! Handles the pieces that sit between a real device and the simulation:
//! - Edge-triggered pointer input
//! - Fixed timestep clock
//! - Autopilot input for headless runs

pub mod autopilot;
pub mod clock;
pub mod input;

pub use autopilot::Autopilot;
pub use clock::FixedTimestep;
pub use input::{InputSource, PointerInput};
