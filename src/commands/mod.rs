pub mod completions;
pub mod config;
pub mod node;
pub mod process;
pub mod rules;
