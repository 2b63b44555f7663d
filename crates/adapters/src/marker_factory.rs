//! In-memory marker factory.

use logbridge_domain::Marker;
use logbridge_ports::MarkerFactory;
use logbridge_shared::{NamedCache, get_or_create};
use std::sync::Arc;

/// Interns markers by name in a concurrent map.
#[derive(Debug, Default)]
pub struct BasicMarkerFactory {
    markers: NamedCache<Marker>,
}

impl BasicMarkerFactory {
    /// Create an empty factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of interned markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Returns true when no marker is interned.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl MarkerFactory for BasicMarkerFactory {
    fn get_marker(&self, name: &str) -> Arc<Marker> {
        get_or_create(&self.markers, name, || Marker::new(name))
    }

    fn exists(&self, name: &str) -> bool {
        self.markers.contains_key(name)
    }

    fn detach_marker(&self, name: &str) -> bool {
        self.markers.remove(name).is_some()
    }
}
