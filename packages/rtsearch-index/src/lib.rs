mod client;
mod error;
pub mod query;

pub use client::{Hit, IndexClient};
pub use error::{Error, Result};
