//! Handler registry.
//!
//! # Responsibilities
//! - Enumerate the closed set of handlers
//! - Resolve `(method, RouteMatch)` to a handler
//! - Return an explicit NotFound rather than a silent default
//!
//! # Design Decisions
//! - Closed enum, resolved by `match`; no runtime registration
//! - Immutable and stateless, so it is trivially shareable across threads
//! - Each handler knows its own method and route key, so the route table is
//!   derived from the handlers rather than kept in a parallel list

use std::fmt;

use crate::http::error::DispatchError;
use crate::routing::matcher::{RouteMatch, RESOURCE_MARKER};
use crate::store::CollectionKind;

/// Operation performed on a record collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn method(&self) -> &'static str {
        match self {
            Operation::List | Operation::Get => "GET",
            Operation::Create => "POST",
            Operation::Update => "PUT",
            Operation::Delete => "DELETE",
        }
    }

    /// Whether the operation addresses a single record by id.
    pub fn takes_id(&self) -> bool {
        matches!(self, Operation::Get | Operation::Update | Operation::Delete)
    }

    /// Whether the operation mutates the store.
    pub fn mutates(&self) -> bool {
        matches!(self, Operation::Create | Operation::Update | Operation::Delete)
    }
}

/// A registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    /// CRUD operation on a record collection.
    Records { kind: CollectionKind, op: Operation },
    /// Read the analytics snapshot.
    Analytics,
}

const fn records(kind: CollectionKind, op: Operation) -> Handler {
    Handler::Records { kind, op }
}

impl Handler {
    /// Every registered handler, in route-table order.
    pub const ALL: [Handler; 8] = [
        records(CollectionKind::Leads, Operation::List),
        records(CollectionKind::Leads, Operation::Get),
        records(CollectionKind::Leads, Operation::Create),
        records(CollectionKind::Leads, Operation::Update),
        records(CollectionKind::Leads, Operation::Delete),
        records(CollectionKind::Opportunities, Operation::List),
        records(CollectionKind::Opportunities, Operation::Get),
        Handler::Analytics,
    ];

    /// Resolve a handler for a method and matched route.
    ///
    /// `method` is compared case-insensitively.
    pub fn resolve(method: &str, route: &RouteMatch) -> Result<Handler, DispatchError> {
        use CollectionKind::{Leads, Opportunities};
        use Operation::{Create, Delete, Get, List, Update};

        let method = method.to_ascii_uppercase();
        let handler = match (method.as_str(), route.resource.as_str(), route.id.is_some()) {
            ("GET", "leads", false) => records(Leads, List),
            ("GET", "leads", true) => records(Leads, Get),
            ("POST", "leads", false) => records(Leads, Create),
            ("PUT", "leads", true) => records(Leads, Update),
            ("DELETE", "leads", true) => records(Leads, Delete),
            ("GET", "opportunities", false) => records(Opportunities, List),
            ("GET", "opportunities", true) => records(Opportunities, Get),
            ("GET", "analytics", false) => Handler::Analytics,
            _ => return Err(DispatchError::route_not_found(&method, &route.route_key)),
        };
        Ok(handler)
    }

    pub fn method(&self) -> &'static str {
        match self {
            Handler::Records { op, .. } => op.method(),
            Handler::Analytics => "GET",
        }
    }

    /// Route key this handler is registered under.
    pub fn route_key(&self) -> String {
        match self {
            Handler::Records { kind, op } if op.takes_id() => {
                format!("/{RESOURCE_MARKER}/{}/:id", kind.resource())
            }
            Handler::Records { kind, .. } => format!("/{RESOURCE_MARKER}/{}", kind.resource()),
            Handler::Analytics => format!("/{RESOURCE_MARKER}/analytics"),
        }
    }

    pub fn mutates(&self) -> bool {
        match self {
            Handler::Records { op, .. } => op.mutates(),
            Handler::Analytics => false,
        }
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.route_key())
    }
}

/// The route table as `"<METHOD> <routeKey>"` strings.
pub fn route_table() -> Vec<String> {
    Handler::ALL.iter().map(ToString::to_string).collect()
}
