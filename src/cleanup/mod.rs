pub mod runner;
pub mod summary;
