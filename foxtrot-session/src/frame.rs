//! Reply framing
//!
//! In multi-line mode the controller terminates a complete reply by echoing
//! the submitted request. The echo is matched against each decoded chunk on
//! its own, not against the accumulated reply.

use crate::error::FoxtrotResult;
use crate::text;
use foxtrot_transport::StreamAccessor;

/// Default size of a single read
pub const DEFAULT_CHUNK_SIZE: usize = 16000;

/// How the end of a reply is detected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameMode {
    /// The first chunk is the whole reply
    SingleShot,
    /// Read until a chunk ends with the echoed request
    Multiline,
}

/// Why a frame ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEnd {
    /// Single-shot mode stopped after one chunk
    FirstChunk,
    /// A chunk ended with the echoed request
    Echo,
    /// The peer closed the stream
    PeerClosed,
}

/// A decoded reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub chunks: usize,
    pub end: FrameEnd,
}

/// Reads one reply frame from a stream
#[derive(Debug, Clone)]
pub struct FrameReader {
    chunk_size: usize,
}

impl Default for FrameReader {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl FrameReader {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Read the reply to `request`
    ///
    /// Blocks until the termination condition of `mode` is met. No timeout is
    /// applied here.
    pub async fn read_frame<S>(
        &self,
        stream: &mut S,
        request: &str,
        mode: FrameMode,
    ) -> FoxtrotResult<Frame>
    where
        S: StreamAccessor + ?Sized,
    {
        let mut buf = vec![0u8; self.chunk_size];
        let mut text = String::new();
        let mut chunks = 0;

        loop {
            let n = stream.read(&mut buf).await?;
            if n == 0 {
                return Ok(Frame {
                    text,
                    chunks,
                    end: FrameEnd::PeerClosed,
                });
            }

            let chunk = text::decode(&buf[..n]);
            chunks += 1;
            text.push_str(&chunk);

            match mode {
                FrameMode::SingleShot => {
                    return Ok(Frame {
                        text,
                        chunks,
                        end: FrameEnd::FirstChunk,
                    });
                }
                FrameMode::Multiline if chunk.ends_with(request) => {
                    return Ok(Frame {
                        text,
                        chunks,
                        end: FrameEnd::Echo,
                    });
                }
                FrameMode::Multiline => {}
            }
        }
    }
}
