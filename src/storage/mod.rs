pub mod file_storage;
pub mod key_value;
pub mod repositories;

pub use file_storage::FileStorage;
pub use key_value::*;
