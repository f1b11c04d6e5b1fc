//! `log` targets, one per resource kind.
//!
//! Filtering by category is left to whichever logger the host installs
//! (e.g. `RUST_LOG=camera_control::bridge=debug` with `env_logger`).

pub const COMMON: &str = "camera_control::common";
pub const SERVICE: &str = "camera_control::service";
pub const CONTROL: &str = "camera_control::control";
pub const INTERACTION: &str = "camera_control::interaction";
pub const BRIDGE: &str = "camera_control::bridge";
