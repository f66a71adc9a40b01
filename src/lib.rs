pub mod core;
pub mod models;
pub mod report;
pub mod policy;
pub mod console;
pub mod cleanup;
pub mod cli;
