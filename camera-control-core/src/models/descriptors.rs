use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::CameraControlError;

/// Concrete kind of a capture control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    Slider,
    IndexPicker,
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slider => f.write_str("slider"),
            Self::IndexPicker => f.write_str("index picker"),
        }
    }
}

/// Value domain of a slider: a bounded range, a stepped range, or a
/// discrete set of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SliderDomain {
    Range {
        lower_bound: f32,
        upper_bound: f32,
    },
    RangeAndStep {
        lower_bound: f32,
        upper_bound: f32,
        step: f32,
    },
    Values {
        values: Vec<f32>,
    },
}

impl SliderDomain {
    pub fn validate(&self) -> Result<(), CameraControlError> {
        match self {
            Self::Range {
                lower_bound,
                upper_bound,
            } => validate_bounds(*lower_bound, *upper_bound),
            Self::RangeAndStep {
                lower_bound,
                upper_bound,
                step,
            } => {
                validate_bounds(*lower_bound, *upper_bound)?;
                if !step.is_finite() || *step <= 0.0 {
                    return Err(CameraControlError::ConfigurationFailed(format!(
                        "slider step must be positive, got {step}"
                    )));
                }
                Ok(())
            }
            Self::Values { values } => {
                if values.is_empty() {
                    return Err(CameraControlError::ConfigurationFailed(
                        "slider value list is empty".into(),
                    ));
                }
                if values.iter().any(|v| !v.is_finite()) {
                    return Err(CameraControlError::ConfigurationFailed(
                        "slider values must be finite".into(),
                    ));
                }
                Ok(())
            }
        }
    }

    /// The value a freshly created slider starts at.
    pub fn initial_value(&self) -> f32 {
        match self {
            Self::Range { lower_bound, .. } | Self::RangeAndStep { lower_bound, .. } => *lower_bound,
            Self::Values { values } => values.first().copied().unwrap_or(0.0),
        }
    }

    /// Map an arbitrary value onto the nearest value the domain allows.
    pub fn constrain(&self, value: f32) -> f32 {
        match self {
            Self::Range {
                lower_bound,
                upper_bound,
            } => value.clamp(*lower_bound, *upper_bound),
            Self::RangeAndStep {
                lower_bound,
                upper_bound,
                step,
            } => {
                let clamped = value.clamp(*lower_bound, *upper_bound);
                let steps = ((clamped - lower_bound) / step).round();
                (lower_bound + steps * step).min(*upper_bound)
            }
            Self::Values { values } => values
                .iter()
                .copied()
                .min_by(|a, b| (a - value).abs().total_cmp(&(b - value).abs()))
                .unwrap_or(value),
        }
    }
}

fn validate_bounds(lower: f32, upper: f32) -> Result<(), CameraControlError> {
    if !lower.is_finite() || !upper.is_finite() || lower >= upper {
        return Err(CameraControlError::ConfigurationFailed(format!(
            "invalid slider bounds {lower}...{upper}"
        )));
    }
    Ok(())
}

/// Creation-time description of a slider control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderDescriptor {
    pub localized_title: String,
    pub symbol_name: String,
    #[serde(default)]
    pub accessibility_identifier: Option<String>,
    #[serde(default)]
    pub localized_value_format: Option<String>,
    pub domain: SliderDomain,
}

impl SliderDescriptor {
    pub fn range(localized_title: &str, symbol_name: &str, lower_bound: f32, upper_bound: f32) -> Self {
        Self::with_domain(
            localized_title,
            symbol_name,
            SliderDomain::Range {
                lower_bound,
                upper_bound,
            },
        )
    }

    pub fn range_and_step(
        localized_title: &str,
        symbol_name: &str,
        lower_bound: f32,
        upper_bound: f32,
        step: f32,
    ) -> Self {
        Self::with_domain(
            localized_title,
            symbol_name,
            SliderDomain::RangeAndStep {
                lower_bound,
                upper_bound,
                step,
            },
        )
    }

    pub fn values(localized_title: &str, symbol_name: &str, values: Vec<f32>) -> Self {
        Self::with_domain(localized_title, symbol_name, SliderDomain::Values { values })
    }

    fn with_domain(localized_title: &str, symbol_name: &str, domain: SliderDomain) -> Self {
        Self {
            localized_title: localized_title.to_string(),
            symbol_name: symbol_name.to_string(),
            accessibility_identifier: None,
            localized_value_format: None,
            domain,
        }
    }
}

/// Creation-time description of an index picker control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPickerDescriptor {
    pub localized_title: String,
    pub symbol_name: String,
    pub localized_index_titles: Vec<String>,
    #[serde(default)]
    pub accessibility_identifier: Option<String>,
}

impl IndexPickerDescriptor {
    pub fn new(localized_title: &str, symbol_name: &str, localized_index_titles: Vec<String>) -> Self {
        Self {
            localized_title: localized_title.to_string(),
            symbol_name: symbol_name.to_string(),
            localized_index_titles,
            accessibility_identifier: None,
        }
    }

    pub fn validate(&self) -> Result<(), CameraControlError> {
        if self.localized_index_titles.is_empty() {
            return Err(CameraControlError::ConfigurationFailed(
                "index picker needs at least one index title".into(),
            ));
        }
        Ok(())
    }
}
