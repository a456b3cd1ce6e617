//! Rust client for the Foxtrot PLC text protocol
//!
//! The controller exposes a flat namespace of dotted variables over a
//! line-oriented TCP protocol (port 5010 by default). This library discovers
//! that namespace, classifies variable groups into entities (lights, PIR
//! sensors, relays, ...) and reads their values in bounded batches.
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `foxtrot-core`: errors, commands, reply parsing, wire types, entities
//! - `foxtrot-transport`: transport layer (TCP) and connection health probe
//! - `foxtrot-session`: reply framing and request/reply exchange
//! - `foxtrot-client`: discovery, batched reads and the stateful client
//!
//! # Usage
//!
//! ```no_run
//! use foxtrot::client::FoxtrotClient;
//!
//! # async fn run() -> foxtrot::FoxtrotResult<()> {
//! let mut client = FoxtrotClient::new("10.253.16.19")?;
//! client.read_variables().await?;
//!
//! for (group, entity) in client.read_quick_variables().await? {
//!     println!("{} {:?} = {:?}", group, entity.kind, entity.value);
//! }
//!
//! client.disconnect().await?;
//! # Ok(())
//! # }
//! ```

// Re-export core types
pub use foxtrot_core::{
    Command, Entity, EntityKind, EntityMap, FoxtrotError, FoxtrotResult, Namespace, Value,
    VariableCatalog, VariableName, WireType,
};

// Re-export client API
pub mod client {
    pub use foxtrot_client::*;
}

// Re-export session layer
pub mod session {
    pub use foxtrot_session::*;
}

// Re-export transport layer
pub mod transport {
    pub use foxtrot_transport::*;
}
