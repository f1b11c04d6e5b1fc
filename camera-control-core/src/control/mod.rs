pub mod record;

use crate::models::keys::ControlKey;
use crate::registry::resource_registry::ResourceRegistry;
use record::ControlRecord;

/// Registry of capture controls for platform `P`.
pub type ControlTable<P> = ResourceRegistry<ControlKey, ControlRecord<P>>;
