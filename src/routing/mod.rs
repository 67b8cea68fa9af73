//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Raw URL ("/.netlify/functions/leads/1?x=y")
//!     → normalizer.rs (strip query, rewrite prefix)  → "/api/leads/1"
//!     → matcher.rs (split into resource + id)        → leads, Some("1"), "/api/leads/:id"
//!     → registry.rs (method + route → Handler)       → Records { Leads, Get }
//! ```
//!
//! # Design Decisions
//! - Handlers are a closed set fixed at compile time
//! - Deterministic: same input always resolves to the same handler
//! - Explicit NotFound rather than a silent default

pub mod matcher;
pub mod normalizer;
pub mod registry;

pub use matcher::RouteMatch;
pub use normalizer::PathNormalizer;
pub use registry::{Handler, Operation};
