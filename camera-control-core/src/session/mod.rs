pub mod controller;
pub mod delegate;

use crate::models::keys::ServiceKey;
use crate::registry::resource_registry::ResourceRegistry;
use controller::ServiceController;

/// Registry of camera services for platform `P`.
pub type ServiceTable<P> = ResourceRegistry<ServiceKey, ServiceController<P>>;
