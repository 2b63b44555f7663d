//! Named markers that tag log calls.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

// Serializes `add` so the cycle check and the insert happen as one step
// across the whole reference graph.
static GRAPH_WRITES: Mutex<()> = Mutex::new(());

/// A named tag attached to a log call, optionally referencing other markers.
///
/// Equality and hashing use the name only. References are shared, so a
/// marker obtained from a factory can grow children after it was handed out.
pub struct Marker {
    name: Arc<str>,
    references: RwLock<Vec<Arc<Self>>>,
}

impl Marker {
    /// Create a marker with no references.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            references: RwLock::new(Vec::new()),
        }
    }

    /// Marker name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a child reference.
    ///
    /// Adding a marker that already contains `self`, or one that is already
    /// referenced, is ignored so the reference graph stays acyclic.
    pub fn add(&self, reference: Arc<Self>) {
        let _graph = GRAPH_WRITES.lock().unwrap_or_else(PoisonError::into_inner);
        if reference.contains(self) {
            return;
        }
        let mut references = self
            .references
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if !references.iter().any(|existing| **existing == *reference) {
            references.push(reference);
        }
    }

    /// Remove a child reference. Returns true when one was removed.
    pub fn remove(&self, reference: &Self) -> bool {
        let mut references = self
            .references
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = references.len();
        references.retain(|existing| **existing != *reference);
        references.len() != before
    }

    /// Returns true when the marker has children.
    #[must_use]
    pub fn has_references(&self) -> bool {
        !self
            .references
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Snapshot of the direct children.
    #[must_use]
    pub fn references(&self) -> Vec<Arc<Self>> {
        self.references
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns true when `other` is this marker or any descendant.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.contains_name(other.name())
    }

    /// Returns true when `name` names this marker or any descendant.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        if *self.name == *name {
            return true;
        }
        self.references
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|reference| reference.contains_name(name))
    }
}

impl PartialEq for Marker {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Marker {}

impl Hash for Marker {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Marker {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Marker")
            .field("name", &self.name)
            .field("references", &self.references())
            .finish()
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.name)?;
        let references = self.references();
        if references.is_empty() {
            return Ok(());
        }
        formatter.write_str(" [ ")?;
        for (index, reference) in references.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{reference}")?;
        }
        formatter.write_str(" ]")
    }
}
