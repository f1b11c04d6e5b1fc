//! # camera-control-headless
//!
//! In-memory camera backend for camera-control-core.
//!
//! Provides:
//! - `HeadlessPlatform`: `CameraPlatform` implementation backed by a shared `HeadlessDevice`
//! - `HeadlessSession`, `HeadlessSlider`, `HeadlessIndexPicker`, `HeadlessInteraction`: native objects
//! - `HardwareSimulator`: posts button presses, slider drags and overlay
//!   notifications, optionally from its own threads
//!
//! ## Usage
//! ```ignore
//! use camera_control_core::{CameraControlContext, InteractionButton};
//! use camera_control_headless::{HeadlessConfig, HeadlessPlatform};
//!
//! let platform = HeadlessPlatform::new(HeadlessConfig::default()).unwrap();
//! let simulator = platform.simulator();
//! let mut ctx = CameraControlContext::with_defaults(platform).unwrap();
//!
//! let shutter = ctx.interactions().create_combined(|key, phase| println!("{key}: {phase:?}"));
//! simulator.press(shutter, InteractionButton::Primary);
//! ctx.dispatch_pending();
//! ```

pub mod config;
pub mod controls;
pub mod device;
pub mod interaction;
pub mod platform;
pub mod session;
pub mod simulator;

pub use config::HeadlessConfig;
pub use controls::{HeadlessIndexPicker, HeadlessSlider};
pub use device::{DeviceStats, HeadlessDevice};
pub use interaction::HeadlessInteraction;
pub use platform::HeadlessPlatform;
pub use session::HeadlessSession;
pub use simulator::HardwareSimulator;
