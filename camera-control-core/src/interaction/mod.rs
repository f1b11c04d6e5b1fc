pub mod record;

use crate::models::keys::InteractionKey;
use crate::registry::resource_registry::ResourceRegistry;
use record::InteractionRecord;

/// Registry of event interactions backed by native interaction `I`.
pub type InteractionTable<I> = ResourceRegistry<InteractionKey, InteractionRecord<I>>;
