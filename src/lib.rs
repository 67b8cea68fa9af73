//! In-process mock of the CRM dashboard REST backend.

pub mod config;
pub mod http;
pub mod latency;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::MockApiConfig;
pub use http::{ApiRequest, ApiResponse, DispatchError, Dispatcher, Envelope, MockApi};
pub use latency::{Cancelled, LatencySimulator};
pub use store::{CollectionKind, Record, Store, StoreError};
