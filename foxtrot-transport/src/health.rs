//! Connection health probe policy
//!
//! The TCP transport peeks a few bytes without blocking and without
//! consuming them. The outcome is mapped here to a tri-state so the
//! reconnect policy lives in one place.

use std::io;

/// Number of bytes requested by a health probe
pub const PROBE_LEN: usize = 16;

/// Observed state of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkHealth {
    /// Connection is usable
    Open,
    /// Connection is absent or the peer has closed it
    Closed,
    /// Probe was inconclusive; treated as open
    Unknown,
}

impl LinkHealth {
    /// Only a definite close triggers a reconnect
    pub fn needs_reconnect(self) -> bool {
        matches!(self, LinkHealth::Closed)
    }
}

/// Map the result of a non-blocking peek to a [`LinkHealth`]
///
/// `None` means the peek could not complete without blocking.
pub fn classify_probe(result: Option<io::Result<usize>>) -> LinkHealth {
    match result {
        None => LinkHealth::Open,
        Some(Ok(0)) => LinkHealth::Closed,
        Some(Ok(_)) => LinkHealth::Open,
        Some(Err(e)) => match e.kind() {
            io::ErrorKind::WouldBlock => LinkHealth::Open,
            io::ErrorKind::ConnectionReset => LinkHealth::Unknown,
            _ => {
                log::warn!("Connection probe failed: {}", e);
                LinkHealth::Unknown
            }
        },
    }
}
