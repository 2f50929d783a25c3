//! Route definitions and utilities
//!
//! This module defines the core route types: the symbolic route name, the
//! declared route record and the resolved location handed to views.

use super::component::ComponentLoader;
use super::path::{Params, PathPattern};
use crate::error::RouterResult;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Unique symbolic identifier for a route
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteName(pub String);

impl RouteName {
    /// Create a new route name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RouteName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RouteName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RouteName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for RouteName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// One navigable path bound to a deferred component
#[derive(Clone)]
pub struct RouteRecord {
    /// Path pattern this route matches
    pub path: PathPattern,
    /// Unique name for this route
    pub name: RouteName,
    /// Producer of the route's component
    pub loader: Arc<dyn ComponentLoader>,
    /// Additional metadata for the route
    pub meta: BTreeMap<String, String>,
}

impl RouteRecord {
    /// Create a new route from a path pattern, a name and a loader
    pub fn new(
        path: &str,
        name: impl Into<RouteName>,
        loader: Arc<dyn ComponentLoader>,
    ) -> RouterResult<Self> {
        Ok(Self {
            path: PathPattern::parse(path)?,
            name: name.into(),
            loader,
            meta: BTreeMap::new(),
        })
    }

    /// Add metadata to this route
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}

impl fmt::Debug for RouteRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteRecord")
            .field("path", &self.path.as_str())
            .field("name", &self.name)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}

/// Router state for a resolved navigation target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLocation {
    /// Name of the matched route
    pub name: RouteName,
    /// Normalized application path, without base, query or hash
    pub path: String,
    /// Path with query and hash
    pub full_path: String,
    /// Browser href including the base prefix
    pub href: String,
    /// Params captured by dynamic segments
    pub params: Params,
    /// Decoded query pairs
    pub query: Vec<(String, String)>,
    /// Fragment without the leading `#`
    pub hash: Option<String>,
    /// Metadata declared on the matched route
    pub meta: BTreeMap<String, String>,
}

impl RouteLocation {
    /// Look up a query value by key
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether both locations land on the same route with the same params, query and hash.
    /// Spelling differences such as a trailing slash or letter case are ignored.
    pub fn is_same_target(&self, other: &RouteLocation) -> bool {
        self.name == other.name
            && self.params == other.params
            && self.query == other.query
            && self.hash == other.hash
    }

    #[cfg(test)]
    pub(crate) fn for_tests(name: &str, path: &str) -> Self {
        Self {
            name: RouteName::from(name),
            path: path.to_string(),
            full_path: path.to_string(),
            href: path.to_string(),
            params: Params::new(),
            query: Vec::new(),
            hash: None,
            meta: BTreeMap::new(),
        }
    }
}
