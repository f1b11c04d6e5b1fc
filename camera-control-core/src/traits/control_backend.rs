/// State shared by every native capture control.
pub trait ControlBackend: Send {
    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    /// Called once when the owning control record is destroyed.
    fn release(&mut self) {}
}

/// Native slider selecting a float from a bounded, stepped or discrete domain.
pub trait SliderBackend: ControlBackend {
    fn value(&self) -> f32;

    fn set_value(&mut self, value: f32);

    /// Values that may receive a distinct visual treatment.
    fn prominent_values(&self) -> Vec<f32>;

    fn set_prominent_values(&mut self, values: Vec<f32>);

    fn accessibility_identifier(&self) -> Option<String>;

    fn set_accessibility_identifier(&mut self, identifier: Option<String>);

    /// Format string for the displayed value; may only contain `%@`.
    fn localized_value_format(&self) -> Option<String>;

    fn set_localized_value_format(&mut self, format: Option<String>);
}

/// Native picker selecting one of a fixed set of titled indexes.
pub trait IndexPickerBackend: ControlBackend {
    fn selected_index(&self) -> usize;

    fn set_selected_index(&mut self, index: usize);

    fn number_of_indexes(&self) -> usize;

    fn localized_index_titles(&self) -> Vec<String>;

    fn accessibility_identifier(&self) -> Option<String>;

    fn set_accessibility_identifier(&mut self, identifier: Option<String>);
}
