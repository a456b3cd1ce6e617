//! Transport layer module for the Foxtrot PLC text protocol
//!
//! This crate provides the raw stream abstraction used by the session layer,
//! a TCP implementation, and a scripted in-memory transport for tests.

pub mod error;
pub mod health;
pub mod scripted;
pub mod stream;
pub mod tcp;

pub use error::{FoxtrotError, FoxtrotResult};
pub use health::{classify_probe, LinkHealth};
pub use scripted::ScriptedTransport;
pub use stream::{StreamAccessor, TransportLayer};
pub use tcp::{TcpSettings, TcpTransport, DEFAULT_PORT};
