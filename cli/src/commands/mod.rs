pub mod build;
pub mod cli;
pub mod prune;
pub mod verify;
