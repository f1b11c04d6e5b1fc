use std::ops::RangeInclusive;

use super::key_generator::{KeyGenerationError, KeyGenerator};
use crate::models::error::CameraControlError;
use crate::models::keys::{HandleKey, ResourceKind};

/// Handle and generation assigned to a record when it is created.
///
/// The generation is unique for the registry's lifetime, so a handle that is
/// destroyed and later reissued gets a different generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stamp<K> {
    pub key: K,
    pub generation: u64,
}

struct Entry<R> {
    generation: u64,
    resource: R,
}

/// Handle → resource table for one resource kind.
///
/// Records live in a sparse slot table indexed by `handle - lower bound`;
/// the [`KeyGenerator`] picks free slots. This is the only owner of the
/// resources: everything else refers to them by handle.
pub struct ResourceRegistry<K: HandleKey, R> {
    kind: ResourceKind,
    generator: KeyGenerator<K>,
    lower: u64,
    slots: Vec<Option<Entry<R>>>,
    len: usize,
    next_generation: u64,
}

impl<K: HandleKey, R> ResourceRegistry<K, R> {
    pub fn new(kind: ResourceKind, range: RangeInclusive<K>) -> Result<Self, CameraControlError> {
        let lower = range.start().to_u64();
        let generator = KeyGenerator::new(range)
            .map_err(|e| CameraControlError::ConfigurationFailed(format!("{kind} registry: {e}")))?;
        Ok(Self {
            kind,
            generator,
            lower,
            slots: Vec::new(),
            len: 0,
            next_generation: 0,
        })
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Allocate a handle, build the resource with `factory`, and insert it.
    ///
    /// On failure (handle space exhausted or factory error) the registry,
    /// including the generator's cursor, is left exactly as it was.
    pub fn create<F>(&mut self, factory: F) -> Result<K, CameraControlError>
    where
        F: FnOnce(Stamp<K>) -> Result<R, CameraControlError>,
    {
        let kind = self.kind;
        let checkpoint = self.generator.clone();

        let slots = &self.slots;
        let lower = self.lower;
        let key = self
            .generator
            .generate(|key| occupied(slots, lower, key))
            .map_err(|e| match e {
                KeyGenerationError::AttemptsExhausted { attempts } => {
                    CameraControlError::GenerationExhausted { kind, attempts }
                }
                other => CameraControlError::ConfigurationFailed(other.to_string()),
            })?;

        let generation = self.next_generation;
        let resource = match factory(Stamp { key, generation }) {
            Ok(resource) => resource,
            Err(error) => {
                self.generator = checkpoint;
                return Err(error);
            }
        };

        self.next_generation += 1;
        let index = (key.to_u64() - self.lower) as usize;
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index] = Some(Entry {
            generation,
            resource,
        });
        self.len += 1;
        Ok(key)
    }

    /// Remove the record, handing the resource back for release.
    /// Returns `None` if the handle was not live.
    pub fn destroy(&mut self, key: K) -> Option<R> {
        let index = self.slot_index(key)?;
        let entry = self.slots.get_mut(index)?.take()?;
        self.len -= 1;
        Some(entry.resource)
    }

    pub fn contains(&self, key: K) -> bool {
        self.entry(key).is_some()
    }

    /// Generation of the live record at `key`.
    pub fn generation(&self, key: K) -> Option<u64> {
        self.entry(key).map(|entry| entry.generation)
    }

    /// Whether `key` is live and still holds the record created as `generation`.
    pub fn is_current(&self, key: K, generation: u64) -> bool {
        self.generation(key) == Some(generation)
    }

    pub fn get(&self, key: K) -> Result<&R, CameraControlError> {
        self.try_get(key)
            .ok_or_else(|| CameraControlError::not_found(self.kind, key))
    }

    pub fn get_mut(&mut self, key: K) -> Result<&mut R, CameraControlError> {
        let kind = self.kind;
        self.try_get_mut(key)
            .ok_or_else(|| CameraControlError::not_found(kind, key))
    }

    pub fn try_get(&self, key: K) -> Option<&R> {
        self.entry(key).map(|entry| &entry.resource)
    }

    pub fn try_get_mut(&mut self, key: K) -> Option<&mut R> {
        let index = self.slot_index(key)?;
        self.slots
            .get_mut(index)?
            .as_mut()
            .map(|entry| &mut entry.resource)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live handles in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(move |(index, _)| K::from_u64(self.lower + index as u64))
    }

    fn slot_index(&self, key: K) -> Option<usize> {
        key.to_u64()
            .checked_sub(self.lower)
            .map(|offset| offset as usize)
    }

    fn entry(&self, key: K) -> Option<&Entry<R>> {
        self.slots.get(self.slot_index(key)?)?.as_ref()
    }
}

fn occupied<K: HandleKey, R>(slots: &[Option<Entry<R>>], lower: u64, key: K) -> bool {
    key.to_u64()
        .checked_sub(lower)
        .and_then(|offset| slots.get(offset as usize))
        .is_some_and(Option::is_some)
}
