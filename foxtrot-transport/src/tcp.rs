//! TCP transport implementation

use crate::error::{FoxtrotError, FoxtrotResult};
use crate::health::{classify_probe, LinkHealth, PROBE_LEN};
use crate::stream::{StreamAccessor, TransportLayer};
use async_trait::async_trait;
use futures::FutureExt;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Default TCP port of the controller's text protocol
pub const DEFAULT_PORT: u16 = 5010;

/// Wrapper for TcpStream that implements Debug
struct DebugTcpStream(TcpStream);

impl fmt::Debug for DebugTcpStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TcpStream").finish()
    }
}

impl Deref for DebugTcpStream {
    type Target = TcpStream;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DebugTcpStream {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// TCP transport layer settings
///
/// Both timeouts default to `None`: connection establishment and reads then
/// block for as long as the operating system allows.
#[derive(Debug, Clone)]
pub struct TcpSettings {
    pub host: String,
    pub port: u16,
    pub connect_timeout: Option<Duration>,
    pub io_timeout: Option<Duration>,
}

impl TcpSettings {
    /// Create new TCP settings
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: None,
            io_timeout: None,
        }
    }

    /// Bound the time spent establishing a connection
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Bound every individual read and write
    pub fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = Some(timeout);
        self
    }

    /// `host:port` form accepted by the resolver
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// TCP transport layer implementation
#[derive(Debug)]
pub struct TcpTransport {
    stream: Option<DebugTcpStream>,
    settings: TcpSettings,
    closed: bool,
}

impl TcpTransport {
    /// Create a new TCP transport layer
    pub fn new(settings: TcpSettings) -> Self {
        Self {
            stream: None,
            settings,
            closed: true,
        }
    }

    pub fn settings(&self) -> &TcpSettings {
        &self.settings
    }

    fn not_connected() -> FoxtrotError {
        FoxtrotError::Connection(std::io::Error::new(
            std::io::ErrorKind::NotConnected,
            "TCP stream not connected",
        ))
    }
}

#[async_trait]
impl TransportLayer for TcpTransport {
    async fn open(&mut self) -> FoxtrotResult<()> {
        if !self.closed {
            return Err(FoxtrotError::Connection(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Connection has already been opened",
            )));
        }

        let endpoint = self.settings.endpoint();
        let stream = if let Some(timeout) = self.settings.connect_timeout {
            tokio::time::timeout(timeout, TcpStream::connect(endpoint.as_str()))
                .await
                .map_err(|_| FoxtrotError::Timeout)??
        } else {
            TcpStream::connect(endpoint.as_str()).await?
        };

        log::info!("Connected to controller at {}", endpoint);
        self.stream = Some(DebugTcpStream(stream));
        self.closed = false;
        Ok(())
    }

    fn probe(&self) -> LinkHealth {
        let stream = match self.stream.as_ref() {
            Some(stream) if !self.closed => stream,
            _ => return LinkHealth::Closed,
        };

        let mut buf = [0u8; PROBE_LEN];
        classify_probe(stream.peek(&mut buf).now_or_never())
    }
}

#[async_trait]
impl StreamAccessor for TcpTransport {
    async fn read(&mut self, buf: &mut [u8]) -> FoxtrotResult<usize> {
        let stream = self.stream.as_mut().ok_or_else(Self::not_connected)?;

        let result = if let Some(timeout) = self.settings.io_timeout {
            tokio::time::timeout(timeout, stream.read(buf))
                .await
                .map_err(|_| FoxtrotError::Timeout)?
                .map_err(FoxtrotError::Connection)
        } else {
            stream.read(buf).await.map_err(FoxtrotError::Connection)
        };

        match result {
            Ok(0) => {
                self.closed = true;
                Ok(0)
            }
            Ok(n) => Ok(n),
            Err(e) => {
                self.closed = true;
                Err(e)
            }
        }
    }

    async fn write(&mut self, buf: &[u8]) -> FoxtrotResult<usize> {
        let stream = self.stream.as_mut().ok_or_else(Self::not_connected)?;

        if let Some(timeout) = self.settings.io_timeout {
            tokio::time::timeout(timeout, stream.write(buf))
                .await
                .map_err(|_| FoxtrotError::Timeout)?
                .map_err(FoxtrotError::Connection)
        } else {
            stream.write(buf).await.map_err(FoxtrotError::Connection)
        }
    }

    async fn flush(&mut self) -> FoxtrotResult<()> {
        let stream = self.stream.as_mut().ok_or_else(Self::not_connected)?;
        stream.flush().await.map_err(FoxtrotError::Connection)
    }

    fn is_closed(&self) -> bool {
        self.closed
    }

    async fn close(&mut self) -> FoxtrotResult<()> {
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.shutdown().await;
            log::info!("Disconnected from controller at {}", self.settings.endpoint());
        }
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_tcp_settings() {
        let settings = TcpSettings::new("10.0.0.5", DEFAULT_PORT);
        assert_eq!(settings.endpoint(), "10.0.0.5:5010");
        assert!(settings.connect_timeout.is_none());
        assert!(settings.io_timeout.is_none());
    }

    #[tokio::test]
    async fn test_unopened_transport_probes_closed() {
        let transport = TcpTransport::new(TcpSettings::new("127.0.0.1", 1));
        assert_eq!(transport.probe(), LinkHealth::Closed);
        assert!(transport.is_closed());
    }

    #[tokio::test]
    async fn test_open_write_read_close() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 64];
            let n = socket.read(&mut buf).await.unwrap();
            socket.write_all(&buf[..n]).await.unwrap();
        });

        let mut transport = TcpTransport::new(TcpSettings::new("127.0.0.1", port));
        transport.open().await.unwrap();
        assert!(!transport.is_closed());
        assert!(transport.open().await.is_err());

        transport.write_all(b"LIST:\r\n").await.unwrap();
        transport.flush().await.unwrap();
        let mut buf = [0u8; 64];
        let n = transport.read(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], b"LIST:\r\n");

        server.await.unwrap();
        let n = transport.read(&mut buf).await.unwrap();
        assert_eq!(n, 0);
        assert!(transport.is_closed());
        assert_eq!(transport.probe(), LinkHealth::Closed);

        transport.close().await.unwrap();
        assert!(transport.is_closed());
    }

    #[tokio::test]
    async fn test_idle_peer_close_is_detected_by_peek() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let (release, hold) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 64];
            socket.read(&mut buf).await.unwrap();
            socket.write_all(b"GET:A.B,1\r\n").await.unwrap();
            // keep the socket until the client has checked the live link
            let _ = hold.await;
        });

        let mut transport = TcpTransport::new(TcpSettings::new("127.0.0.1", port));
        transport.open().await.unwrap();
        transport.write_all(b"GET:A.B\r\n").await.unwrap();
        transport.flush().await.unwrap();
        let mut buf = [0u8; 64];
        let n = transport.read(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], b"GET:A.B,1\r\n");
        assert_eq!(transport.probe(), LinkHealth::Open);

        release.send(()).unwrap();
        server.await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        // nothing was read after the reply, so only the peek can see the EOF
        assert!(!transport.closed);
        assert_eq!(transport.probe(), LinkHealth::Closed);
    }

    #[tokio::test]
    async fn test_read_without_connection_fails() {
        let mut transport = TcpTransport::new(TcpSettings::new("127.0.0.1", 1));
        let mut buf = [0u8; 4];
        assert!(matches!(
            transport.read(&mut buf).await,
            Err(FoxtrotError::Connection(_))
        ));
    }
}
