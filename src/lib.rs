pub mod cli;
pub mod errors;
pub mod models;
pub mod page;
pub mod services;
pub mod storage;
pub mod utils;

pub use errors::CartError;
pub use anyhow::{Error, Result};
