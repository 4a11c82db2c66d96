//! Credentials and tokens handed between the stages of the chain.
//!
//! Every token value is wrapped in [`TokenSecret`], so `Debug` and `Display` output never
//! contains usable material. Tokens are plain serializable data; callers that cache them
//! decide where and for how long.

pub mod credential;
pub mod token;

pub use credential::*;
pub use token::{platform::*, secret::*, xbox::*};
