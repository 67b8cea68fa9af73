//! Request handling subsystem.
//!
//! # Data Flow
//! ```text
//! ApiRequest (method, url, body?)
//!     → dispatcher.rs (normalize, match, resolve, parse body)
//!     → handlers.rs (invoke against the store)
//!     → response.rs (envelope + status)
//!     → api.rs (simulated latency, cancellation)
//!     → caller
//! ```

pub mod api;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod request;
pub mod response;

pub use api::MockApi;
pub use dispatcher::Dispatcher;
pub use error::DispatchError;
pub use request::{ApiRequest, RequestId};
pub use response::{ApiResponse, Envelope};
