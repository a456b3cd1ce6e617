//! Stream accessor trait for transport layer

use crate::error::{FoxtrotError, FoxtrotResult};
use crate::health::LinkHealth;
use async_trait::async_trait;

/// Stream accessor interface to access a raw byte stream to a controller
#[async_trait]
pub trait StreamAccessor: Send + Sync {
    /// Read data from the stream
    ///
    /// # Arguments
    ///
    /// * `buf` - Buffer to read into
    ///
    /// # Returns
    ///
    /// Number of bytes read, or 0 if the peer closed the stream
    async fn read(&mut self, buf: &mut [u8]) -> FoxtrotResult<usize>;

    /// Write data to the stream
    ///
    /// # Returns
    ///
    /// Number of bytes written
    async fn write(&mut self, buf: &[u8]) -> FoxtrotResult<usize>;

    /// Write all data to the stream
    async fn write_all(&mut self, buf: &[u8]) -> FoxtrotResult<()> {
        let mut written = 0;
        while written < buf.len() {
            let n = self.write(&buf[written..]).await?;
            if n == 0 {
                return Err(FoxtrotError::Connection(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "Failed to write all data",
                )));
            }
            written += n;
        }
        Ok(())
    }

    /// Flush any buffered data
    async fn flush(&mut self) -> FoxtrotResult<()>;

    /// Check if the stream is known to be closed
    fn is_closed(&self) -> bool;

    /// Close the stream
    async fn close(&mut self) -> FoxtrotResult<()>;
}

/// Transport layer trait that extends StreamAccessor
#[async_trait]
pub trait TransportLayer: StreamAccessor {
    /// Open the physical connection
    async fn open(&mut self) -> FoxtrotResult<()>;

    /// Check connection health without blocking or consuming data
    fn probe(&self) -> LinkHealth;
}
