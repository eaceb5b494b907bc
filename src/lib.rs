pub mod brands;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod listing;
pub mod normalize;
pub mod page;
pub mod score;
pub mod search;

pub use error::{CarscoutError, Result};
