//! Scripted in-memory transport
//!
//! Replays canned reply chunks, one reply per written request, and records
//! everything written to it. Used to exercise the session and client layers
//! without a socket.

use crate::error::{FoxtrotError, FoxtrotResult};
use crate::health::LinkHealth;
use crate::stream::{StreamAccessor, TransportLayer};
use async_trait::async_trait;
use std::collections::VecDeque;

/// In-memory transport driven by a script of replies
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: VecDeque<Vec<Vec<u8>>>,
    readable: VecDeque<Vec<u8>>,
    writes: Vec<Vec<u8>>,
    opens: usize,
    closes: usize,
    open: bool,
    health_override: Option<LinkHealth>,
    fail_open: bool,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the chunks answering the next written request
    pub fn reply<I, C>(mut self, chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        self.push_reply(chunks);
        self
    }

    pub fn push_reply<I, C>(&mut self, chunks: I)
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        self.replies
            .push_back(chunks.into_iter().map(|c| c.as_ref().to_vec()).collect());
    }

    /// Force the result of the next probes
    pub fn set_health(&mut self, health: Option<LinkHealth>) {
        self.health_override = health;
    }

    /// Make every subsequent `open` fail with a connection error
    pub fn fail_open(&mut self) {
        self.fail_open = true;
    }

    /// Every request written so far, one entry per `write` call
    pub fn writes(&self) -> &[Vec<u8>] {
        &self.writes
    }

    /// Written requests decoded lossily as text
    pub fn written_text(&self) -> Vec<String> {
        self.writes
            .iter()
            .map(|w| String::from_utf8_lossy(w).into_owned())
            .collect()
    }

    pub fn opens(&self) -> usize {
        self.opens
    }

    pub fn closes(&self) -> usize {
        self.closes
    }

    pub fn pending_replies(&self) -> usize {
        self.replies.len()
    }
}

#[async_trait]
impl StreamAccessor for ScriptedTransport {
    async fn read(&mut self, buf: &mut [u8]) -> FoxtrotResult<usize> {
        if !self.open {
            return Err(FoxtrotError::Connection(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "scripted transport not open",
            )));
        }

        let Some(mut chunk) = self.readable.pop_front() else {
            self.open = false;
            return Ok(0);
        };

        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            self.readable.push_front(chunk.split_off(n));
        }
        Ok(n)
    }

    async fn write(&mut self, buf: &[u8]) -> FoxtrotResult<usize> {
        if !self.open {
            return Err(FoxtrotError::Connection(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "scripted transport not open",
            )));
        }

        self.writes.push(buf.to_vec());
        if let Some(reply) = self.replies.pop_front() {
            self.readable.extend(reply);
        }
        Ok(buf.len())
    }

    async fn flush(&mut self) -> FoxtrotResult<()> {
        Ok(())
    }

    fn is_closed(&self) -> bool {
        !self.open
    }

    async fn close(&mut self) -> FoxtrotResult<()> {
        if self.open {
            self.closes += 1;
        }
        self.open = false;
        self.readable.clear();
        Ok(())
    }
}

#[async_trait]
impl TransportLayer for ScriptedTransport {
    async fn open(&mut self) -> FoxtrotResult<()> {
        if self.fail_open {
            return Err(FoxtrotError::Connection(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "scripted connection refused",
            )));
        }
        self.opens += 1;
        self.open = true;
        Ok(())
    }

    fn probe(&self) -> LinkHealth {
        match self.health_override {
            Some(health) => health,
            None if self.open => LinkHealth::Open,
            None => LinkHealth::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reply_follows_write() {
        let mut transport = ScriptedTransport::new().reply(["abc", "def"]);
        transport.open().await.unwrap();

        let mut buf = [0u8; 8];
        assert_eq!(transport.read(&mut buf).await.unwrap(), 0);
        assert!(transport.is_closed());

        transport.open().await.unwrap();
        transport.write_all(b"REQ").await.unwrap();
        assert_eq!(transport.read(&mut buf).await.unwrap(), 3);
        assert_eq!(&buf[..3], b"abc");
        assert_eq!(transport.read(&mut buf).await.unwrap(), 3);
        assert_eq!(transport.written_text(), vec!["REQ"]);
        assert_eq!(transport.opens(), 2);
    }

    #[tokio::test]
    async fn test_large_chunk_is_split_across_reads() {
        let mut transport = ScriptedTransport::new().reply(["abcdef"]);
        transport.open().await.unwrap();
        transport.write_all(b"X").await.unwrap();

        let mut buf = [0u8; 4];
        assert_eq!(transport.read(&mut buf).await.unwrap(), 4);
        assert_eq!(transport.read(&mut buf).await.unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");
    }
}
