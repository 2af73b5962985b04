pub mod cli;
pub mod display;
pub mod error;
pub mod report;
pub mod session;
pub mod stats;
pub mod store;

pub use error::{Result, TaskmanError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
