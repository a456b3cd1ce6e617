//! Foxtrot PLC client implementation
//!
//! This crate ties the protocol layers together:
//!
//! - [`discovery`]: `LIST` enumeration into a [`Namespace`](foxtrot_core::Namespace)
//! - [`reader`]: batched `GET` reads folded into entities
//! - [`client`]: the stateful [`FoxtrotClient`]
//! - [`builder`]: configuration via [`ClientBuilder`]

pub mod builder;
pub mod client;
pub mod discovery;
pub mod reader;

pub use builder::{ClientBuilder, ClientConfig};
pub use client::{ClientState, FoxtrotClient};
pub use discovery::{discover, parse_namespace};
pub use foxtrot_core::{FoxtrotError, FoxtrotResult};
pub use reader::{BatchReader, ReadSummary, UnknownVariablePolicy, DEFAULT_BATCH_SIZE};
