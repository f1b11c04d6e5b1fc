use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use super::log_target;

/// A fixed-width unsigned integer used as an opaque resource handle.
///
/// Values in `[0, SENTINEL - 1]` may be issued. `SENTINEL` (the type's `MAX`)
/// is reserved and means "no handle / operation failed" at the boundary.
pub trait HandleKey: Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static {
    const SENTINEL: Self;

    fn to_u64(self) -> u64;

    /// Narrowing conversion. Callers only pass values `<= SENTINEL`.
    fn from_u64(value: u64) -> Self;

    fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }
}

macro_rules! impl_handle_key {
    ($($ty:ty),* $(,)?) => {
        $(
            impl HandleKey for $ty {
                const SENTINEL: Self = <$ty>::MAX;

                fn to_u64(self) -> u64 {
                    u64::from(self)
                }

                fn from_u64(value: u64) -> Self {
                    value as $ty
                }
            }
        )*
    };
}

impl_handle_key!(u8, u16, u32);

/// Handle of a camera service. The population is small, so the space is narrow.
pub type ServiceKey = u8;

/// Handle of a capture control (slider, index picker).
pub type ControlKey = u16;

/// Handle of a hardware-button event interaction.
pub type InteractionKey = u16;

/// The kind of resource a registry holds. Each kind has its own handle space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Service,
    Control,
    Interaction,
}

impl ResourceKind {
    /// The `log` target diagnostics for this kind are emitted under.
    pub fn log_target(self) -> &'static str {
        match self {
            Self::Service => log_target::SERVICE,
            Self::Control => log_target::CONTROL,
            Self::Interaction => log_target::INTERACTION,
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Service => "camera service",
            Self::Control => "capture control",
            Self::Interaction => "capture event interaction",
        };
        f.write_str(name)
    }
}
