/// Capabilities reported by the headless camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessConfig {
    /// Whether sessions accept capture controls (default: true).
    pub supports_controls: bool,

    /// Controls a session accepts before rejecting more (default: 6).
    pub max_controls_count: usize,

    /// Whether a capture device is present (default: true).
    /// Sessions cannot be created or started without one.
    pub device_available: bool,
}

impl HeadlessConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.supports_controls && self.max_controls_count == 0 {
            return Err("max_controls_count must be at least 1 when controls are supported".into());
        }
        Ok(())
    }
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            supports_controls: true,
            max_controls_count: 6,
            device_available: true,
        }
    }
}
