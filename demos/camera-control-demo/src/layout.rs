use std::fs;
use std::path::Path;

use serde::Deserialize;

use camera_control_core::{IndexPickerDescriptor, SliderDescriptor};

const DEFAULT_LAYOUT: &str = include_str!("../layout.json");

/// Controls the demo creates, loaded from JSON.
#[derive(Debug, Deserialize)]
pub struct DemoLayout {
    #[serde(default)]
    pub sliders: Vec<SliderDescriptor>,
    #[serde(default)]
    pub index_pickers: Vec<IndexPickerDescriptor>,
}

impl DemoLayout {
    /// Load from `path`, or the bundled layout when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let text = match path {
            Some(path) => fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?,
            None => DEFAULT_LAYOUT.to_owned(),
        };
        serde_json::from_str(&text).map_err(|e| format!("invalid layout: {}", e))
    }
}
