//! In-memory record store.
//!
//! # Data Flow
//! ```text
//! Store::seeded()
//!     → seed.rs (initial leads, opportunities, analytics)
//!     → StoreState behind a single mutex
//!
//! Handler invocation:
//!     → list / get / create / update / delete on one collection
//!     → lock held for exactly one operation, released before any await
//! ```
//!
//! # Design Decisions
//! - One mutex over all collections: id generation and splice are atomic
//! - `id`, `createdAt`, `updatedAt` are owned by the store, never by callers
//! - Reads hand out clones, so callers cannot mutate stored records
//! - Insertion order is preserved; deletes never reorder survivors

pub mod seed;

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// A record is a mapping of named JSON fields.
pub type Record = Map<String, Value>;

/// Fields stamped by the store. Caller-supplied values are discarded.
const SERVER_FIELDS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// The record collections held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Leads,
    Opportunities,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 2] = [CollectionKind::Leads, CollectionKind::Opportunities];

    /// Resource name as it appears in a route (`/api/<resource>`).
    pub fn resource(&self) -> &'static str {
        match self {
            CollectionKind::Leads => "leads",
            CollectionKind::Opportunities => "opportunities",
        }
    }

    /// Singular name used in user-facing messages.
    pub fn record_name(&self) -> &'static str {
        match self {
            CollectionKind::Leads => "Lead",
            CollectionKind::Opportunities => "Opportunity",
        }
    }

    fn apply_defaults(&self, record: &mut Record) {
        let (field, default) = match self {
            CollectionKind::Leads => ("status", "NEW"),
            CollectionKind::Opportunities => ("stage", "PROSPECTING"),
        };
        record
            .entry(field)
            .or_insert_with(|| Value::from(default));
    }
}

/// Errors raised by store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record with the given id exists in the collection.
    #[error("{} not found", .kind.record_name())]
    NotFound { kind: CollectionKind, id: String },
}

struct StoreState {
    leads: Vec<Record>,
    opportunities: Vec<Record>,
    analytics: Value,
}

impl StoreState {
    fn collection(&self, kind: CollectionKind) -> &Vec<Record> {
        match kind {
            CollectionKind::Leads => &self.leads,
            CollectionKind::Opportunities => &self.opportunities,
        }
    }

    fn collection_mut(&mut self, kind: CollectionKind) -> &mut Vec<Record> {
        match kind {
            CollectionKind::Leads => &mut self.leads,
            CollectionKind::Opportunities => &mut self.opportunities,
        }
    }
}

/// Thread-safe in-memory store for the mock backend.
///
/// Constructed once per process (or per test) and shared via `Arc`.
pub struct Store {
    state: Mutex<StoreState>,
}

impl Store {
    /// Create a store populated with the dashboard seed data.
    pub fn seeded() -> Self {
        Self::with_state(StoreState {
            leads: seed::leads(),
            opportunities: seed::opportunities(),
            analytics: seed::analytics(),
        })
    }

    /// Create a store with empty collections and an empty analytics snapshot.
    pub fn empty() -> Self {
        Self::with_state(StoreState {
            leads: Vec::new(),
            opportunities: Vec::new(),
            analytics: Value::Object(Map::new()),
        })
    }

    fn with_state(state: StoreState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Snapshot of a collection in insertion order.
    pub fn list(&self, kind: CollectionKind) -> Vec<Record> {
        self.state.lock().collection(kind).clone()
    }

    /// Number of records currently in a collection.
    pub fn len(&self, kind: CollectionKind) -> usize {
        self.state.lock().collection(kind).len()
    }

    /// Fetch a single record by id.
    pub fn get(&self, kind: CollectionKind, id: &str) -> Result<Record, StoreError> {
        let state = self.state.lock();
        state
            .collection(kind)
            .iter()
            .find(|r| record_id(r) == Some(id))
            .cloned()
            .ok_or_else(|| not_found(kind, id))
    }

    /// Insert a new record with a fresh id and server timestamps.
    pub fn create(&self, kind: CollectionKind, fields: Record) -> Record {
        let mut state = self.state.lock();
        let collection = state.collection_mut(kind);
        let id = fresh_id(collection);
        let now = now_iso8601();

        let mut record = Record::new();
        record.insert("id".to_string(), Value::String(id));
        record.extend(client_fields(fields));
        kind.apply_defaults(&mut record);
        record.insert("createdAt".to_string(), Value::String(now.clone()));
        record.insert("updatedAt".to_string(), Value::String(now));

        collection.push(record.clone());
        tracing::debug!(collection = kind.resource(), size = collection.len(), "Record created");
        record
    }

    /// Merge `partial` over an existing record, keeping its position.
    pub fn update(&self, kind: CollectionKind, id: &str, partial: Record) -> Result<Record, StoreError> {
        let mut state = self.state.lock();
        let record = state
            .collection_mut(kind)
            .iter_mut()
            .find(|r| record_id(r) == Some(id))
            .ok_or_else(|| not_found(kind, id))?;

        record.extend(client_fields(partial));
        record.insert("updatedAt".to_string(), Value::String(now_iso8601()));
        Ok(record.clone())
    }

    /// Remove a record, returning it. Remaining records keep their order.
    pub fn delete(&self, kind: CollectionKind, id: &str) -> Result<Record, StoreError> {
        let mut state = self.state.lock();
        let collection = state.collection_mut(kind);
        let position = collection
            .iter()
            .position(|r| record_id(r) == Some(id))
            .ok_or_else(|| not_found(kind, id))?;

        let removed = collection.remove(position);
        tracing::debug!(collection = kind.resource(), size = collection.len(), "Record deleted");
        Ok(removed)
    }

    /// Snapshot of the analytics document.
    pub fn analytics(&self) -> Value {
        self.state.lock().analytics.clone()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::seeded()
    }
}

/// The `id` field of a record, if it is a string.
pub fn record_id(record: &Record) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

fn not_found(kind: CollectionKind, id: &str) -> StoreError {
    StoreError::NotFound {
        kind,
        id: id.to_string(),
    }
}

fn client_fields(fields: Record) -> impl Iterator<Item = (String, Value)> {
    fields
        .into_iter()
        .filter(|(key, _)| !SERVER_FIELDS.contains(&key.as_str()))
}

fn fresh_id(existing: &[Record]) -> String {
    loop {
        let candidate = Uuid::new_v4().to_string();
        if !existing.iter().any(|r| record_id(r) == Some(candidate.as_str())) {
            return candidate;
        }
    }
}

fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
