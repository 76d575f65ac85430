//! Captured route parameters.
//!
//! [`Params`] is what a handler receives and what the router keeps as the
//! result of its most recent successful match.

use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Result, RouterError};

/// Maximum number of parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Parameter storage: names are shared with the compiled route, values are
/// per-request decoded captures.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Name → decoded value, in template order.
///
/// Names are unique within one compiled route, so lookups never have to
/// choose between duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    inner: ParamVec,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_vec(inner: ParamVec) -> Self {
        Self { inner }
    }

    /// Presence check; never fails
    #[inline]
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.inner.iter().any(|(k, _)| k.as_ref() == name)
    }

    /// Value for `name`, or [`RouterError::ParamNotFound`]
    #[inline]
    pub fn get(&self, name: &str) -> Result<&str> {
        self.find(name).ok_or_else(|| RouterError::ParamNotFound {
            name: name.to_string(),
        })
    }

    /// Value for `name` if captured
    #[inline]
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate `(name, value)` pairs in template order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// Copy into a `HashMap`.
    /// Note: This allocates - use `get()` / `find()` on the dispatch path
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.inner
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.inner.len()))?;
        for (k, v) in &self.inner {
            map.serialize_entry(k.as_ref(), v)?;
        }
        map.end()
    }
}
