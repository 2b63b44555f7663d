//! Level rules: a root threshold plus per-name-prefix overrides.

use logbridge_domain::{Level, LevelFilter};

/// Resolved enablement rules for logger names.
///
/// A prefix matches a logger name when the name equals it or continues it at
/// a `.` or `::` boundary, so `svc.db` covers `svc.db.pool` but not `svc.dbx`.
/// The longest matching prefix wins; names with no match use the root filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRules {
    root: LevelFilter,
    // Sorted by descending prefix length so the first hit is the longest.
    overrides: Vec<(String, LevelFilter)>,
}

impl LevelRules {
    /// Build rules from a root filter and `(prefix, filter)` overrides.
    pub fn new(root: LevelFilter, overrides: impl IntoIterator<Item = (String, LevelFilter)>) -> Self {
        let mut overrides: Vec<(String, LevelFilter)> = overrides.into_iter().collect();
        overrides.sort_by(|left, right| {
            right
                .0
                .len()
                .cmp(&left.0.len())
                .then_with(|| left.0.cmp(&right.0))
        });
        Self { root, overrides }
    }

    /// Rules with only a root filter.
    #[must_use]
    pub const fn root_only(root: LevelFilter) -> Self {
        Self {
            root,
            overrides: Vec::new(),
        }
    }

    /// The root filter.
    #[must_use]
    pub const fn root(&self) -> LevelFilter {
        self.root
    }

    /// Number of prefix overrides.
    #[must_use]
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Effective filter for the logger `name`.
    #[must_use]
    pub fn filter_for(&self, name: &str) -> LevelFilter {
        self.overrides
            .iter()
            .find(|(prefix, _)| prefix_matches(prefix, name))
            .map_or(self.root, |(_, filter)| *filter)
    }

    /// Returns true when `level` is enabled for `name`.
    #[must_use]
    pub fn allows(&self, name: &str, level: Level) -> bool {
        self.filter_for(name).allows(level)
    }

    /// Most verbose filter any logger can have; `Off` when every rule is off.
    #[must_use]
    pub fn most_verbose(&self) -> LevelFilter {
        std::iter::once(self.root)
            .chain(self.overrides.iter().map(|(_, filter)| *filter))
            .min_by_key(|filter| filter.threshold().map_or(u8::MAX, Level::rank))
            .unwrap_or(self.root)
    }
}

fn prefix_matches(prefix: &str, name: &str) -> bool {
    let Some(rest) = name.strip_prefix(prefix) else {
        return false;
    };
    rest.is_empty() || rest.starts_with('.') || rest.starts_with("::")
}
