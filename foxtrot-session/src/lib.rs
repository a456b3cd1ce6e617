//! Session layer module for the Foxtrot PLC text protocol
//!
//! The controller replies are not length-prefixed. A reply is either the
//! first chunk received after a request, or every chunk up to the one that
//! ends with an echo of the request itself.
//!
//! - [`text`]: single-byte code page used on the wire
//! - [`frame`]: reply framing
//! - [`session`]: request/reply exchange with lazy reconnect

pub mod error;
pub mod frame;
pub mod session;
pub mod text;

pub use error::{FoxtrotError, FoxtrotResult};
pub use frame::{Frame, FrameEnd, FrameMode, FrameReader, DEFAULT_CHUNK_SIZE};
pub use session::Session;
