//! Token models produced by the exchange steps.

pub mod platform;
pub mod secret;
pub mod xbox;
