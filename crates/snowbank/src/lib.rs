//! Named 64-bit identifier streams.
//!
//! `snowbank` issues unique, roughly-ordered 64-bit identifiers for any
//! number of independently configured streams, each resolved by name through
//! a [`Registry`]. A stream runs in one of two modes:
//!
//! - **continuous**: a pure counter starting from a configured value;
//! - **time**: the classic Snowflake partition of a 64-bit value into a
//!   41-bit elapsed-millisecond bucket, a 10-bit machine id, and a 12-bit
//!   per-millisecond sequence.
//!
//! The registry is built once at startup from a JSON settings document and
//! construction is all-or-nothing: a single invalid entry aborts it before
//! any identifier can be issued. Per-call errors ([`Error`]) are returned to
//! the caller, never retried or logged.
//!
//! Concurrent callers are safe: each generator serializes its own calls
//! behind its own lock, and callers of different streams never contend.
//!
//! # Example
//!
//! ```
//! use snowbank::{Registry, SnowflakeId};
//!
//! let registry = Registry::from_json_str(
//!     r#"{
//!         "orders": { "continuous": true, "start": 1000 },
//!         "events": { "continuous": false, "machine_id": 7 }
//!     }"#,
//! )
//! .unwrap();
//!
//! // Continuous streams count upward from their start value.
//! assert_eq!(registry.generate("orders").unwrap(), 1001);
//! assert_eq!(registry.generate_decimal("orders").unwrap(), "1002");
//!
//! // Time streams pack bucket, machine id, and sequence.
//! let id = SnowflakeId::from_raw(registry.generate("events").unwrap());
//! assert_eq!(id.machine_id(), 7);
//! ```

mod error;
mod generator;
mod id;
mod registry;
mod settings;
mod time;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::registry::*;
pub use crate::settings::*;
pub use crate::time::*;
