pub mod key_generator;
pub mod resource_registry;
