//! Route matching logic.
//!
//! # Responsibilities
//! - Split a canonical path into resource name and optional id
//! - Build the route key used for handler lookup
//!
//! # Design Decisions
//! - Empty segments are discarded (`//api///leads/` == `/api/leads`)
//! - Segments beyond the id are ignored; there is no sub-resource routing
//! - No regex: a single pass over the path segments

/// First segment of every canonical path.
pub const RESOURCE_MARKER: &str = "api";

/// Result of matching a canonical path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Resource name (`leads`, `opportunities`, ...).
    pub resource: String,
    /// Identifier segment, if present.
    pub id: Option<String>,
    /// `/api/<resource>` or `/api/<resource>/:id`.
    pub route_key: String,
}

impl RouteMatch {
    /// Match a canonical path.
    ///
    /// Returns `None` for structurally malformed paths: fewer than two
    /// meaningful segments, or a first segment other than `api`.
    pub fn parse(path: &str) -> Option<Self> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());

        if segments.next()? != RESOURCE_MARKER {
            return None;
        }
        let resource = segments.next()?.to_string();
        let id = segments.next().map(str::to_string);

        let route_key = match id {
            Some(_) => format!("/{RESOURCE_MARKER}/{resource}/:id"),
            None => format!("/{RESOURCE_MARKER}/{resource}"),
        };

        Some(Self {
            resource,
            id,
            route_key,
        })
    }
}
