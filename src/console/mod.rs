pub mod client;
pub mod command;
