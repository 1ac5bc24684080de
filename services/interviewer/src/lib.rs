pub mod cli;
pub mod config;
pub mod console;
pub mod prompt_loader;
pub mod speech;
