//! Handler implementations bound to the store.

use serde_json::Value;

use crate::http::error::DispatchError;
use crate::routing::{Handler, Operation};
use crate::store::{CollectionKind, Record, Store};

/// Value produced by a successful handler.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerOutput {
    pub data: Value,
    pub message: Option<String>,
}

impl HandlerOutput {
    fn new(data: Value) -> Self {
        Self { data, message: None }
    }

    fn record(record: Record) -> Self {
        Self::new(Value::Object(record))
    }

    fn with_message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }
}

/// Run a handler against the store.
///
/// The store is the only thing a handler may mutate.
pub fn invoke(
    handler: Handler,
    store: &Store,
    id: Option<&str>,
    body: Option<Value>,
) -> Result<HandlerOutput, DispatchError> {
    match handler {
        Handler::Analytics => Ok(HandlerOutput::new(store.analytics())),
        Handler::Records { kind, op } => invoke_records(kind, op, store, id, body),
    }
}

fn invoke_records(
    kind: CollectionKind,
    op: Operation,
    store: &Store,
    id: Option<&str>,
    body: Option<Value>,
) -> Result<HandlerOutput, DispatchError> {
    let name = kind.record_name();

    match op {
        Operation::List => {
            let records = store.list(kind).into_iter().map(Value::Object).collect();
            Ok(HandlerOutput::new(Value::Array(records)))
        }
        Operation::Get => {
            let record = store.get(kind, require_id(id)?)?;
            Ok(HandlerOutput::record(record))
        }
        Operation::Create => {
            let record = store.create(kind, object_body(body)?);
            Ok(HandlerOutput::record(record).with_message(format!("{name} created successfully")))
        }
        Operation::Update => {
            let id = require_id(id)?;
            let record = store.update(kind, id, object_body(body)?)?;
            Ok(HandlerOutput::record(record).with_message(format!("{name} updated successfully")))
        }
        Operation::Delete => {
            let record = store.delete(kind, require_id(id)?)?;
            Ok(HandlerOutput::record(record).with_message(format!("{name} deleted successfully")))
        }
    }
}

fn require_id(id: Option<&str>) -> Result<&str, DispatchError> {
    id.ok_or_else(|| DispatchError::HandlerFailure("Missing record id".to_string()))
}

// A missing body is treated as an empty object.
fn object_body(body: Option<Value>) -> Result<Record, DispatchError> {
    match body {
        None => Ok(Record::new()),
        Some(Value::Object(fields)) => Ok(fields),
        Some(_) => Err(DispatchError::HandlerFailure(
            "Request body must be a JSON object".to_string(),
        )),
    }
}
