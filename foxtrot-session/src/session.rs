//! Request/reply session over one transport connection

use crate::error::FoxtrotResult;
use crate::frame::{Frame, FrameMode, FrameReader};
use crate::text;
use foxtrot_core::Command;
use foxtrot_transport::{LinkHealth, TransportLayer};

/// Session owning one controller connection
///
/// The connection is opened lazily before a send and silently re-opened
/// when a health probe finds it closed. There is no retry beyond that: a
/// failed exchange fails the caller.
#[derive(Debug)]
pub struct Session<T: TransportLayer> {
    transport: T,
    reader: FrameReader,
    exchanges: u64,
}

impl<T: TransportLayer> Session<T> {
    /// Create a new session; nothing is connected yet
    pub fn new(transport: T) -> Self {
        Self::with_reader(transport, FrameReader::default())
    }

    pub fn with_reader(transport: T, reader: FrameReader) -> Self {
        Self {
            transport,
            reader,
            exchanges: 0,
        }
    }

    /// Make sure a usable connection exists
    pub async fn ensure_open(&mut self) -> FoxtrotResult<()> {
        let health = self.transport.probe();
        if !health.needs_reconnect() {
            return Ok(());
        }

        if self.exchanges > 0 {
            log::info!("Connection found closed, reconnecting");
        }
        self.transport.close().await?;
        self.transport.open().await
    }

    /// Send `request` and read its reply
    pub async fn exchange(&mut self, request: &str, mode: FrameMode) -> FoxtrotResult<String> {
        Ok(self.exchange_frame(request, mode).await?.text)
    }

    /// Send `request` and return the reply frame with its framing details
    pub async fn exchange_frame(&mut self, request: &str, mode: FrameMode) -> FoxtrotResult<Frame> {
        self.ensure_open().await?;

        let encoded = text::encode(request)?;
        self.transport.write_all(&encoded).await?;
        self.transport.flush().await?;
        self.exchanges += 1;

        let frame = self.reader.read_frame(&mut self.transport, request, mode).await?;
        log::debug!(
            "Exchange #{}: sent {} bytes, received {} characters in {} chunks ({:?})",
            self.exchanges,
            encoded.len(),
            frame.text.chars().count(),
            frame.chunks,
            frame.end
        );
        Ok(frame)
    }

    /// Encode and exchange a protocol command
    pub async fn send_command(
        &mut self,
        command: &Command,
        mode: FrameMode,
    ) -> FoxtrotResult<String> {
        self.exchange(&command.encode(), mode).await
    }

    /// Close the connection; the next exchange reconnects
    pub async fn close(&mut self) -> FoxtrotResult<()> {
        self.transport.close().await
    }

    /// Whether a connection is currently believed usable
    pub fn is_connected(&self) -> bool {
        !self.transport.is_closed() && self.transport.probe() != LinkHealth::Closed
    }

    /// Number of requests sent over the lifetime of the session
    pub fn exchange_count(&self) -> u64 {
        self.exchanges
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
