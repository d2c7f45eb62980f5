pub mod config;
pub mod result;
pub mod task;

pub use config::*;
pub use result::*;
pub use task::*;
