//! Core types and utilities for the Foxtrot PLC text protocol
//!
//! This crate provides the pieces shared by every layer of the client:
//! error handling, protocol commands, reply line parsing, dotted variable
//! names, wire type decoding and the entity model built from them.

pub mod command;
pub mod entity;
pub mod error;
pub mod name;
pub mod namespace;
pub mod reply;
pub mod wire;

pub use command::{Command, LINE_TERMINATOR};
pub use entity::{Attribute, Entity, EntityKind, EntityMap};
pub use error::{FoxtrotError, FoxtrotResult};
pub use name::VariableName;
pub use namespace::{Group, Namespace, VariableCatalog};
pub use reply::{parse_get_line, parse_list_line, GetEntry, ListEntry};
pub use wire::{decode, Value, WireType};
