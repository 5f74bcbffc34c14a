//! Filter registry for managing the available filters.

use crate::core::error::{FilterResult, PixelworksResult, RegistryError};
use crate::core::raster::Raster;
use crate::filters::kind::{apply_filter_with, ApplyOptions, FilterKind, KindTag};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named filter.
///
/// The name is for display and selection only; processing depends solely on
/// the [`FilterKind`].
#[derive(Debug, Clone)]
pub struct Filter {
    name: String,
    id: String,
    kind: FilterKind,
}

impl Filter {
    /// Create a filter. The id is derived from the name.
    pub fn new(name: impl Into<String>, kind: FilterKind) -> Self {
        let name = name.into();
        let id = slugify(&name);
        Self { name, id, kind }
    }

    /// Display name, e.g. `"Black and White"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercase identifier, e.g. `"black_and_white"`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &FilterKind {
        &self.kind
    }

    /// Apply with default options.
    pub fn apply(&self, source: &Raster) -> FilterResult<Raster> {
        self.apply_with(source, &ApplyOptions::default())
    }

    /// Apply with explicit options.
    pub fn apply_with(&self, source: &Raster, options: &ApplyOptions) -> FilterResult<Raster> {
        apply_filter_with(source, &self.kind, options)
    }

    /// Serializable summary.
    pub fn descriptor(&self) -> FilterDescriptor {
        FilterDescriptor {
            name: self.name.clone(),
            id: self.id.clone(),
            kind: self.kind.tag(),
        }
    }
}

/// Lowercase the name and join words with underscores.
fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Filter summary for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    pub name: String,
    pub id: String,
    pub kind: KindTag,
}

/// Ordered registry of filters.
///
/// Insertion order is the presentation order. Names and ids are unique and
/// a registered filter is never replaced or removed.
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    /// Filters indexed by id.
    filters: IndexMap<String, Filter>,
}

impl FilterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            filters: IndexMap::new(),
        }
    }

    /// Create a registry pre-populated with built-in filters.
    pub fn with_builtins() -> Self {
        Self {
            filters: crate::filters::builtin::all()
                .into_iter()
                .map(|filter| (filter.id.clone(), filter))
                .collect(),
        }
    }

    /// Register a filter at the end of the list.
    pub fn register(&mut self, filter: Filter) -> Result<(), RegistryError> {
        if self.filters.contains_key(&filter.id) {
            return Err(RegistryError::DuplicateName(filter.name));
        }
        self.filters.insert(filter.id.clone(), filter);
        Ok(())
    }

    /// Look up by display name or id, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&Filter> {
        self.filters.get(&slugify(name))
    }

    /// Look up a filter or report it as unknown.
    pub fn require(&self, name: &str) -> Result<&Filter, RegistryError> {
        self.get(name)
            .ok_or_else(|| RegistryError::UnknownFilter(name.to_string()))
    }

    /// Check if a filter is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Filters in order.
    pub fn filters(&self) -> impl Iterator<Item = &Filter> {
        self.filters.values()
    }

    /// Filter names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters().map(|f| f.name())
    }

    /// Serializable summaries in order.
    pub fn descriptors(&self) -> Vec<FilterDescriptor> {
        self.filters().map(Filter::descriptor).collect()
    }

    /// Apply the named filter with the given options.
    pub fn apply(
        &self,
        name: &str,
        source: &Raster,
        options: &ApplyOptions,
    ) -> PixelworksResult<Raster> {
        let filter = self.require(name)?;
        Ok(filter.apply_with(source, options)?)
    }

    /// Get the total number of registered filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
