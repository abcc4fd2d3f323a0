//! Metadata registry
//!
//! Maps every name the UI and API use for an entity type (endpoint, class
//! name, collection name, singular/plural forms) to one cached
//! [`ModelMetadata`]. Each entry builds its metadata at most once; `refresh`
//! and `clear_cache` are the only ways to rebuild it.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use contracts::domain::all_entities;
use contracts::shared::metadata::{pluralize, singularize, EntityRef, ModelMetadata};
use once_cell::sync::OnceCell;

use crate::shared::error::EngineError;

struct RegistryEntry {
    name: String,
    entity_ref: EntityRef,
    cached: OnceCell<Arc<ModelMetadata>>,
}

impl RegistryEntry {
    fn new(name: String, entity_ref: EntityRef) -> Self {
        Self {
            name,
            entity_ref,
            cached: OnceCell::new(),
        }
    }

    fn metadata(&self) -> Arc<ModelMetadata> {
        self.cached
            .get_or_init(|| {
                tracing::debug!("Building metadata for '{}'", self.name);
                Arc::new(ModelMetadata::from_entity(self.entity_ref))
            })
            .clone()
    }
}

#[derive(Default)]
struct RegistryState {
    /// Registration order
    entries: Vec<RegistryEntry>,
    /// Lowercase alias -> index into `entries`
    aliases: HashMap<String, usize>,
}

impl RegistryState {
    fn lookup(&self, name: &str) -> Option<&RegistryEntry> {
        self.aliases
            .get(&normalize(name))
            .and_then(|&index| self.entries.get(index))
    }

    /// Give an entry whose canonical name was taken over one of the names it
    /// still answers to
    fn rename_if_unreachable(&mut self, index: usize) {
        let current = normalize(&self.entries[index].name);
        if self.aliases.get(&current) == Some(&index) {
            return;
        }
        let info = self.entries[index].entity_ref.info;
        let fallback = [info.api_endpoint, info.collection_name, info.entity_name]
            .into_iter()
            .map(normalize)
            .find(|name| self.aliases.get(name) == Some(&index));
        if let Some(name) = fallback {
            tracing::debug!("{} now listed as '{}'", info.entity_name, name);
            self.entries[index].name = name;
        }
    }

    fn add_alias(&mut self, alias: &str, index: usize) {
        let alias = normalize(alias);
        if alias.is_empty() {
            return;
        }
        match self.aliases.get(&alias) {
            Some(&existing) if existing != index => {
                tracing::debug!(
                    "Alias '{}' already points at '{}', skipped",
                    alias,
                    self.entries[existing].name
                );
            }
            Some(_) => {}
            None => {
                self.aliases.insert(alias, index);
            }
        }
    }
}

/// Registry of entity metadata, shared by all request handlers
#[derive(Default)]
pub struct MetadataRegistry {
    state: RwLock<RegistryState>,
}

impl MetadataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every CRM entity type registered and built
    pub fn crm() -> Self {
        let registry = Self::new();
        for entity in all_entities() {
            registry.register(entity, None);
        }
        registry.warm();
        registry
    }

    /// Register an entity type; returns the canonical name it is listed under
    ///
    /// The canonical name is `name` when given, otherwise the entity's API
    /// endpoint. Registering the same entity type again only adds aliases. A
    /// name owned by another entity type moves to this one; the other entity
    /// keeps every other name it answers to.
    pub fn register(&self, entity_ref: EntityRef, name: Option<&str>) -> String {
        let info = entity_ref.info;
        let requested = normalize(name.unwrap_or(info.api_endpoint));
        let mut state = self.write();

        let index = match state
            .entries
            .iter()
            .position(|e| e.entity_ref == entity_ref)
        {
            Some(index) => {
                tracing::debug!(
                    "{} already registered as '{}'",
                    info.entity_name,
                    state.entries[index].name
                );
                index
            }
            None => {
                tracing::debug!("Registering {} as '{}'", info.entity_name, requested);
                state
                    .entries
                    .push(RegistryEntry::new(requested.clone(), entity_ref));
                state.entries.len() - 1
            }
        };

        let previous = state.aliases.get(&requested).copied();
        if let Some(previous) = previous.filter(|&p| p != index) {
            // Name taken by another entity type: only this name moves
            tracing::warn!(
                "'{}' re-registered from {} to {}",
                requested,
                state.entries[previous].entity_ref.entity_name(),
                info.entity_name
            );
            state.aliases.insert(requested.clone(), index);
            state.rename_if_unreachable(previous);
        }

        state.aliases.insert(requested.clone(), index);
        for alias in aliases_for(entity_ref, &requested) {
            state.add_alias(&alias, index);
        }

        state.entries[index].name.clone()
    }

    /// Metadata for any registered name or alias, built on first access
    pub fn get_metadata(&self, name: &str) -> Result<Arc<ModelMetadata>, EngineError> {
        let state = self.read();
        match state.lookup(name) {
            Some(entry) => Ok(entry.metadata()),
            None => {
                tracing::warn!("Unknown entity type requested: '{}'", name);
                Err(EngineError::UnknownEntityType(name.to_string()))
            }
        }
    }

    /// Canonical name for any registered alias
    pub fn resolve_name(&self, name: &str) -> Option<String> {
        self.read().lookup(name).map(|e| e.name.clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().lookup(name).is_some()
    }

    /// Canonical names in registration order
    pub fn list_names(&self) -> Vec<String> {
        self.read().entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Metadata of every registered entity type, in registration order
    pub fn all_metadata(&self) -> Vec<Arc<ModelMetadata>> {
        self.read().entries.iter().map(RegistryEntry::metadata).collect()
    }

    /// Rebuild one entry from its declaration and replace the cached value
    pub fn refresh(&self, name: &str) -> Result<Arc<ModelMetadata>, EngineError> {
        let mut state = self.write();
        let Some(&index) = state.aliases.get(&normalize(name)) else {
            tracing::warn!("Cannot refresh unknown entity type '{}'", name);
            return Err(EngineError::UnknownEntityType(name.to_string()));
        };

        let entry = &mut state.entries[index];
        let metadata = Arc::new(ModelMetadata::from_entity(entry.entity_ref));
        entry.cached = OnceCell::with_value(metadata.clone());
        tracing::info!("Refreshed metadata for '{}'", entry.name);
        Ok(metadata)
    }

    /// Drop every cached entry; the next lookup rebuilds it
    pub fn clear_cache(&self) {
        let mut state = self.write();
        for entry in state.entries.iter_mut() {
            entry.cached = OnceCell::new();
        }
        tracing::info!("Metadata cache cleared ({} entries)", state.entries.len());
    }

    /// Build every registered entry up front
    pub fn warm(&self) {
        let state = self.read();
        for entry in &state.entries {
            entry.metadata();
        }
        tracing::debug!("Metadata built for {} entity types", state.entries.len());
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Names an entity type answers to besides its canonical name
fn aliases_for(entity_ref: EntityRef, canonical: &str) -> Vec<String> {
    let info = entity_ref.info;
    let mut aliases = vec![
        info.api_endpoint.to_string(),
        info.entity_name.to_string(),
        info.collection_name.to_string(),
    ];
    for name in [canonical, info.api_endpoint, info.collection_name] {
        let singular = singularize(name);
        if singular == name {
            aliases.push(pluralize(name));
        } else {
            aliases.push(singular);
        }
    }
    aliases
}
