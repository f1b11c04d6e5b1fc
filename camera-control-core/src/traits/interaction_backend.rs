/// Native hardware-button event interaction.
///
/// Creating one attaches it to the host view; `release` detaches it. While
/// disabled, the system keeps its default button behavior and the native
/// side posts no events.
pub trait InteractionBackend: Send {
    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    fn release(&mut self) {}
}
