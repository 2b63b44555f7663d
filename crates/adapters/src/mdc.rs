//! Thread-local diagnostic context.
//!
//! Every [`BasicMdcAdapter`] reads and writes the same per-thread state, so
//! values put through one handle are visible through another on the same
//! thread and invisible to other threads.

use logbridge_ports::{ContextMap, MdcAdapter};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

#[derive(Default)]
struct ThreadContext {
    values: ContextMap,
    stacks: HashMap<String, VecDeque<String>>,
}

thread_local! {
    static CONTEXT: RefCell<ThreadContext> = RefCell::new(ThreadContext::default());
}

fn with_context<R>(operation: impl FnOnce(&mut ThreadContext) -> R) -> R {
    CONTEXT.with(|context| operation(&mut context.borrow_mut()))
}

/// Diagnostic context adapter backed by thread-local storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicMdcAdapter;

impl BasicMdcAdapter {
    /// Create a handle to the calling thread's context.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MdcAdapter for BasicMdcAdapter {
    fn put(&self, key: &str, value: &str) {
        with_context(|context| {
            context.values.insert(key.to_owned(), value.to_owned());
        });
    }

    fn get(&self, key: &str) -> Option<String> {
        with_context(|context| context.values.get(key).cloned())
    }

    fn remove(&self, key: &str) {
        with_context(|context| {
            context.values.remove(key);
        });
    }

    fn clear(&self) {
        with_context(|context| {
            context.values.clear();
            context.stacks.clear();
        });
    }

    fn copy_of_context_map(&self) -> ContextMap {
        with_context(|context| context.values.clone())
    }

    fn set_context_map(&self, values: ContextMap) {
        with_context(|context| context.values = values);
    }

    fn push_by_key(&self, key: &str, value: &str) {
        with_context(|context| {
            context
                .stacks
                .entry(key.to_owned())
                .or_default()
                .push_back(value.to_owned());
        });
    }

    fn pop_by_key(&self, key: &str) -> Option<String> {
        with_context(|context| context.stacks.get_mut(key)?.pop_back())
    }

    fn copy_of_deque_by_key(&self, key: &str) -> Option<VecDeque<String>> {
        with_context(|context| context.stacks.get(key).cloned())
    }

    fn clear_deque_by_key(&self, key: &str) {
        with_context(|context| {
            if let Some(stack) = context.stacks.get_mut(key) {
                stack.clear();
            }
        });
    }
}
