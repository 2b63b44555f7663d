//! Marker factory capability exposed by the provider.

use logbridge_domain::Marker;
use std::sync::Arc;

/// Creates and interns markers by name.
pub trait MarkerFactory: Send + Sync {
    /// Interned marker for `name`; repeated calls return the same instance.
    fn get_marker(&self, name: &str) -> Arc<Marker>;

    /// Returns true when a marker named `name` has been interned.
    fn exists(&self, name: &str) -> bool;

    /// Forget the interned marker for `name`. Returns true when one existed.
    fn detach_marker(&self, name: &str) -> bool;

    /// A fresh marker that is not interned.
    fn get_detached_marker(&self, name: &str) -> Arc<Marker> {
        Arc::new(Marker::new(name))
    }
}
