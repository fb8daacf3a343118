pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod infrastructure;
pub mod launcher;
pub mod schema;
pub mod util;
