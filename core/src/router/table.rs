//! Ordered route table and its builder
//!
//! Insertion order is match priority: the first record whose pattern
//! matches a path wins. An optional fallback record catches everything
//! the declared routes do not.

use super::component::ComponentLoader;
use super::path::Params;
use super::route::{RouteName, RouteRecord};
use crate::error::{RouterError, RouterResult};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// A record matched against a path
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    /// Position of the record in the table
    pub index: usize,
    /// The matched record
    pub record: &'a RouteRecord,
    /// Params captured from the path
    pub params: Params,
    /// Whether the fallback record was used
    pub is_fallback: bool,
}

/// Immutable, ordered collection of route records
#[derive(Debug, Clone)]
pub struct RouteTable {
    records: Vec<RouteRecord>,
    has_fallback: bool,
}

impl RouteTable {
    /// Start building a table
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new()
    }

    /// All records in priority order, the fallback (if any) last
    pub fn records(&self) -> &[RouteRecord] {
        &self.records
    }

    /// Declared records, excluding the fallback
    pub fn routes(&self) -> &[RouteRecord] {
        if self.has_fallback {
            &self.records[..self.records.len() - 1]
        } else {
            &self.records
        }
    }

    /// The fallback record, if one is installed
    pub fn fallback(&self) -> Option<&RouteRecord> {
        if self.has_fallback {
            self.records.last()
        } else {
            None
        }
    }

    /// Number of records including the fallback
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record by name
    pub fn by_name(&self, name: &str) -> Option<(usize, &RouteRecord)> {
        self.records
            .iter()
            .enumerate()
            .find(|(_, record)| record.name.as_str() == name)
    }

    /// Match a normalized path against the declared routes, then the fallback
    pub fn resolve(&self, path: &str, sensitive: bool, strict: bool) -> Option<RouteMatch<'_>> {
        let declared = self.routes();
        for (index, record) in declared.iter().enumerate() {
            if let Some(params) = record.path.matches(path, sensitive, strict) {
                debug!(path, route = %record.name, "path matched");
                return Some(RouteMatch {
                    index,
                    record,
                    params,
                    is_fallback: false,
                });
            }
        }

        self.fallback().map(|record| {
            debug!(path, route = %record.name, "falling back");
            RouteMatch {
                index: declared.len(),
                record,
                params: record
                    .path
                    .matches(path, sensitive, strict)
                    .unwrap_or_default(),
                is_fallback: true,
            }
        })
    }
}

/// Builder for creating route tables
pub struct RouteTableBuilder {
    records: Vec<RouteRecord>,
    fallback: Option<RouteRecord>,
    sensitive: bool,
    error: Option<RouterError>,
}

impl RouteTableBuilder {
    /// Create a new route table builder
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            fallback: None,
            sensitive: false,
            error: None,
        }
    }

    /// Add a route with its deferred component
    pub fn route(
        self,
        path: &str,
        name: impl Into<RouteName>,
        loader: Arc<dyn ComponentLoader>,
    ) -> Self {
        match RouteRecord::new(path, name, loader) {
            Ok(record) => self.record(record),
            Err(err) => self.fail(err),
        }
    }

    /// Add a fully built record
    pub fn record(mut self, record: RouteRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Set the record used when no declared route matches
    pub fn fallback(
        mut self,
        path: &str,
        name: impl Into<RouteName>,
        loader: Arc<dyn ComponentLoader>,
    ) -> Self {
        match RouteRecord::new(path, name, loader) {
            Ok(record) => {
                self.fallback = Some(record);
                self
            }
            Err(err) => self.fail(err),
        }
    }

    /// Set a fully built fallback record
    pub fn fallback_record(mut self, record: RouteRecord) -> Self {
        self.fallback = Some(record);
        self
    }

    /// Treat paths differing only in case as distinct
    pub fn case_sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = sensitive;
        self
    }

    /// Validate and build the table
    pub fn build(self) -> RouterResult<RouteTable> {
        if let Some(err) = self.error {
            return Err(err);
        }

        if self.records.is_empty() {
            return Err(RouterError::NoRoutes);
        }

        let has_fallback = self.fallback.is_some();
        let mut records = self.records;
        records.extend(self.fallback);

        let mut names = HashSet::new();
        let mut signatures = HashSet::new();
        for record in &records {
            if !names.insert(record.name.as_str()) {
                return Err(RouterError::DuplicateName(record.name.to_string()));
            }
            if !signatures.insert(record.path.signature(self.sensitive)) {
                return Err(RouterError::DuplicatePath(record.path.to_string()));
            }
        }

        debug!(routes = records.len(), has_fallback, "route table built");
        Ok(RouteTable {
            records,
            has_fallback,
        })
    }

    fn fail(mut self, err: RouterError) -> Self {
        // Keep the first error, later ones are usually knock-on effects
        if self.error.is_none() {
            self.error = Some(err);
        }
        self
    }
}

impl Default for RouteTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}
