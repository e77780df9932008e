pub mod embedding;

mod error;

pub use error::{Error, Result};
