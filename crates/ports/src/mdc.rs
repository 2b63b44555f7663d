//! Diagnostic context (MDC) capability exposed by the provider.

use std::collections::{BTreeMap, VecDeque};

/// Snapshot of the key/value diagnostic context.
pub type ContextMap = BTreeMap<String, String>;

/// Per-thread diagnostic context: a flat map plus named stacks.
pub trait MdcAdapter: Send + Sync {
    /// Set `key` to `value` in the current context.
    fn put(&self, key: &str, value: &str);

    /// Value for `key`, if set.
    fn get(&self, key: &str) -> Option<String>;

    /// Remove `key`.
    fn remove(&self, key: &str);

    /// Remove every key and every stack.
    fn clear(&self);

    /// Copy of the current map.
    fn copy_of_context_map(&self) -> ContextMap;

    /// Replace the current map.
    fn set_context_map(&self, context: ContextMap);

    /// Push `value` onto the stack named `key`.
    fn push_by_key(&self, key: &str, value: &str);

    /// Pop the most recent value from the stack named `key`.
    fn pop_by_key(&self, key: &str) -> Option<String>;

    /// Copy of the stack named `key`, oldest first.
    fn copy_of_deque_by_key(&self, key: &str) -> Option<VecDeque<String>>;

    /// Empty the stack named `key`.
    fn clear_deque_by_key(&self, key: &str);
}
