pub mod control_backend;
pub mod interaction_backend;
pub mod platform;
pub mod session_backend;
