//! Thread-scoped contextual store backing [`TracingSink`](crate::tracing_sink::TracingSink).
//!
//! Every sink on the same thread shares this map, the same way a mapped
//! diagnostic context works in other logging stacks. Request handlers that
//! hop threads need to re-capture on the new thread.

use std::cell::RefCell;
use std::collections::BTreeMap;

thread_local! {
    static FIELDS: RefCell<BTreeMap<String, String>> = const { RefCell::new(BTreeMap::new()) };
}

/// Insert or overwrite a field in the current thread's store.
pub fn put(key: &str, value: &str) {
    FIELDS.with(|fields| {
        fields.borrow_mut().insert(key.to_string(), value.to_string());
    });
}

/// Read a single field from the current thread's store.
pub fn get(key: &str) -> Option<String> {
    FIELDS.with(|fields| fields.borrow().get(key).cloned())
}

/// Remove every field from the current thread's store.
pub fn clear() {
    FIELDS.with(|fields| fields.borrow_mut().clear());
}

/// Copy of the current thread's store.
pub fn snapshot() -> BTreeMap<String, String> {
    FIELDS.with(|fields| fields.borrow().clone())
}
