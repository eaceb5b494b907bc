//! Command implementations for carscout CLI

mod analyze;
mod compare;
mod misc;

pub use analyze::*;
pub use compare::*;
pub use misc::*;
