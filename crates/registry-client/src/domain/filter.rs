//! # List Filters
//!
//! Query filters for collection reads. Only filters the caller supplied are
//! sent; omission means "no filter".
//!
//! ## Zero Project Rule
//!
//! A `project_id` that is supplied but holds the zero identity is treated as
//! absent and never reaches the query. `org_id` is sent as given.

use super::value_objects::QueryParams;
use registry_types::Identity;

/// Query key for the org filter.
pub const ORG_ID_PARAM: &str = "org_id";
/// Query key for the project filter.
pub const PROJECT_ID_PARAM: &str = "project_id";
/// Query key for the exact-name filter.
pub const NAME_PARAM: &str = "name";

/// Filters for a collection read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Restrict to one org.
    pub org_id: Option<Identity>,
    /// Restrict to one project.
    pub project_id: Option<Identity>,
    /// Exact name match.
    pub name: Option<String>,
}

impl ListFilter {
    /// No filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from borrowed optional arguments.
    pub fn from_parts(
        org_id: Option<&Identity>,
        project_id: Option<&Identity>,
        name: Option<&str>,
    ) -> Self {
        Self {
            org_id: org_id.copied(),
            project_id: project_id.copied(),
            name: name.map(str::to_string),
        }
    }

    /// Builder-style method to set the org filter.
    pub fn with_org(mut self, org_id: Identity) -> Self {
        self.org_id = Some(org_id);
        self
    }

    /// Builder-style method to set the project filter.
    pub fn with_project(mut self, project_id: Identity) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Builder-style method to set the name filter.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Query parameters for this filter.
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        if let Some(org_id) = &self.org_id {
            query.set(ORG_ID_PARAM, org_id.to_string());
        }
        if let Some(project_id) = self.project_id.filter(|id| !id.is_zero()) {
            query.set(PROJECT_ID_PARAM, project_id.to_string());
        }
        if let Some(name) = &self.name {
            query.set(NAME_PARAM, name.clone());
        }
        query
    }
}
