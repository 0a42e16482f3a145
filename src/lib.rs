pub mod cli;
pub mod cluster;
pub mod commands;
pub mod error;
pub mod geo;
pub mod metadata;
pub mod utils;
