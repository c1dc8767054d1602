use std::collections::HashMap;

use crate::api::types::{BodyId, DrawableHandle};

/// Bidirectional map between backend drawables and catalog bodies.
/// Ray hits are resolved through this map only.
#[derive(Debug, Default)]
pub struct HandleMap {
    to_body: HashMap<DrawableHandle, BodyId>,
    to_handle: HashMap<BodyId, DrawableHandle>,
}

impl HandleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `body` to `handle`, dropping any previous binding of either side.
    pub fn bind(&mut self, body: BodyId, handle: DrawableHandle) {
        if let Some(old) = self.to_handle.insert(body, handle) {
            self.to_body.remove(&old);
        }
        if let Some(prev_body) = self.to_body.insert(handle, body) {
            if prev_body != body {
                self.to_handle.remove(&prev_body);
            }
        }
    }

    /// Remove the binding for `body`, returning its handle.
    pub fn unbind(&mut self, body: BodyId) -> Option<DrawableHandle> {
        let handle = self.to_handle.remove(&body)?;
        self.to_body.remove(&handle);
        Some(handle)
    }

    pub fn body(&self, handle: DrawableHandle) -> Option<BodyId> {
        self.to_body.get(&handle).copied()
    }

    pub fn handle(&self, body: BodyId) -> Option<DrawableHandle> {
        self.to_handle.get(&body).copied()
    }

    /// All bound drawables, ordered by body id.
    pub fn handles(&self) -> Vec<DrawableHandle> {
        let mut pairs: Vec<_> = self.to_handle.iter().collect();
        pairs.sort_by_key(|(body, _)| **body);
        pairs.into_iter().map(|(_, h)| *h).collect()
    }

    pub fn len(&self) -> usize {
        self.to_handle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_handle.is_empty()
    }

    pub fn clear(&mut self) {
        self.to_body.clear();
        self.to_handle.clear();
    }
}
