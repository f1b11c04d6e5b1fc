pub mod config;
pub mod descriptors;
pub mod error;
pub mod events;
pub mod keys;
pub mod log_target;
