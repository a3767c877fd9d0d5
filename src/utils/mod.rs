//! Utility modules for ColorSnaps

pub mod dates;
pub mod network;
pub mod validation;
