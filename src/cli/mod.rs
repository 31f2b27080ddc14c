pub mod args;
pub mod commands;
pub mod terminal;

pub use args::*;
pub use commands::CliApp;
pub use terminal::TerminalPage;
