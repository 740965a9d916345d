// Author: Tempo developers
// Copyright © 2026, Tempo developers, all rights reserved.
// Created: 17 October 2026

use std::{
    collections::BTreeMap,
    sync::atomic::{AtomicU64, Ordering},
};

static REQUEST_GENERATION: AtomicU64 = AtomicU64::new(0);

/// Per-call state threaded through every prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: String,
    model_name: String,
    metadata: BTreeMap<String, String>,
}

impl RequestContext {
    /// Create a context with a freshly generated request id.
    pub fn new(model_name: impl Into<String>) -> Self {
        let generation = REQUEST_GENERATION.fetch_add(1, Ordering::Relaxed);
        Self::with_request_id(model_name, format!("tempo-{:08}", generation))
    }

    /// Create a context continuing an existing request, e.g. one named by
    /// an incoming `x-request-id` header.
    pub fn with_request_id(model_name: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            model_name: model_name.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// The context a pipeline hands to one of its members.
    pub fn child(&self, model_name: impl Into<String>) -> Self {
        Self {
            request_id: self.request_id.clone(),
            model_name: model_name.into(),
            metadata: self.metadata.clone(),
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn insert_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_metadata(key, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::RequestContext;

    #[test]
    fn ids_are_unique() {
        let a = RequestContext::new("m");
        let b = RequestContext::new("m");
        assert_ne!(a.request_id(), b.request_id());
    }

    #[test]
    fn child_keeps_request() {
        let parent = RequestContext::with_request_id("pipeline", "abc").with_metadata("user", "1");
        let child = parent.child("member");

        assert_eq!(child.request_id(), "abc");
        assert_eq!(child.model_name(), "member");
        assert_eq!(child.metadata("user"), Some("1"));
        assert_eq!(parent.model_name(), "pipeline");
    }
}
