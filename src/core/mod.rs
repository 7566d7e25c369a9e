pub mod buffer;
pub mod config;
pub mod constants;
pub mod entry;
