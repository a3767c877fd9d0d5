//! Configuration module for ColorSnaps
//!
//! Path management and the user-editable settings file.

mod paths;
mod user_config;

pub use paths::Paths;
pub use user_config::UserConfig;
