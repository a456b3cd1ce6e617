//! Client builder
//!
//! This module provides a builder for [`FoxtrotClient`] with the defaults
//! the controller expects: port 5010, batches of 150 `GET` directives and
//! 16000-byte reads.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use foxtrot_client::ClientBuilder;
//! use std::time::Duration;
//!
//! # async fn run() -> foxtrot_client::FoxtrotResult<()> {
//! let mut client = ClientBuilder::new("192.168.1.20")
//!     .port(5010)
//!     .batch_size(100)
//!     .connect_timeout(Duration::from_secs(5))
//!     .build()?;
//!
//! client.read_variables().await?;
//! client.disconnect().await?;
//! # Ok(())
//! # }
//! ```

use crate::client::FoxtrotClient;
use crate::reader::{UnknownVariablePolicy, DEFAULT_BATCH_SIZE};
use foxtrot_core::{FoxtrotError, FoxtrotResult};
use foxtrot_session::DEFAULT_CHUNK_SIZE;
use foxtrot_transport::{TcpSettings, TcpTransport, TransportLayer, DEFAULT_PORT};
use std::fmt;
use std::time::Duration;

/// Validated client configuration
#[derive(Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    /// Accepted for compatibility; the protocol has no login step
    pub username: String,
    pub password: String,
    pub batch_size: usize,
    pub chunk_size: usize,
    pub connect_timeout: Option<Duration>,
    pub io_timeout: Option<Duration>,
    pub unknown_variable_policy: UnknownVariablePolicy,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("batch_size", &self.batch_size)
            .field("chunk_size", &self.chunk_size)
            .field("connect_timeout", &self.connect_timeout)
            .field("io_timeout", &self.io_timeout)
            .field("unknown_variable_policy", &self.unknown_variable_policy)
            .finish()
    }
}

impl ClientConfig {
    /// TCP settings derived from this configuration
    pub fn tcp_settings(&self) -> TcpSettings {
        TcpSettings {
            host: self.host.clone(),
            port: self.port,
            connect_timeout: self.connect_timeout,
            io_timeout: self.io_timeout,
        }
    }
}

/// Builder for [`FoxtrotClient`]
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    host: String,
    port: u16,
    username: String,
    password: String,
    batch_size: usize,
    chunk_size: usize,
    connect_timeout: Option<Duration>,
    io_timeout: Option<Duration>,
    unknown_variable_policy: UnknownVariablePolicy,
}

impl ClientBuilder {
    /// Create a builder for the controller at `host`
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            username: String::new(),
            password: String::new(),
            batch_size: DEFAULT_BATCH_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            connect_timeout: None,
            io_timeout: None,
            unknown_variable_policy: UnknownVariablePolicy::default(),
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Maximum number of `GET` directives per request
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Size of a single socket read
    pub fn read_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Deadline for each individual read and write
    pub fn io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = Some(timeout);
        self
    }

    pub fn unknown_variable_policy(mut self, policy: UnknownVariablePolicy) -> Self {
        self.unknown_variable_policy = policy;
        self
    }

    /// Validate and produce the configuration
    pub fn build_config(self) -> FoxtrotResult<ClientConfig> {
        if self.host.trim().is_empty() {
            return Err(FoxtrotError::InvalidConfig("controller address is empty".to_string()));
        }
        if self.batch_size == 0 {
            return Err(FoxtrotError::InvalidConfig("batch size must be at least 1".to_string()));
        }
        if self.chunk_size == 0 {
            return Err(FoxtrotError::InvalidConfig(
                "read chunk size must be at least 1".to_string(),
            ));
        }

        Ok(ClientConfig {
            host: self.host,
            port: self.port,
            username: self.username,
            password: self.password,
            batch_size: self.batch_size,
            chunk_size: self.chunk_size,
            connect_timeout: self.connect_timeout,
            io_timeout: self.io_timeout,
            unknown_variable_policy: self.unknown_variable_policy,
        })
    }

    /// Build a client connected over TCP (lazily, on first use)
    pub fn build(self) -> FoxtrotResult<FoxtrotClient<TcpTransport>> {
        let config = self.build_config()?;
        let transport = TcpTransport::new(config.tcp_settings());
        Ok(FoxtrotClient::with_transport(config, transport))
    }

    /// Build a client over a caller-supplied transport
    pub fn build_with_transport<T: TransportLayer>(
        self,
        transport: T,
    ) -> FoxtrotResult<FoxtrotClient<T>> {
        let config = self.build_config()?;
        Ok(FoxtrotClient::with_transport(config, transport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientBuilder::new("10.253.16.19").build_config().unwrap();
        assert_eq!(config.port, 5010);
        assert_eq!(config.batch_size, 150);
        assert_eq!(config.chunk_size, 16000);
        assert!(config.username.is_empty());
        assert!(config.password.is_empty());
        assert!(config.connect_timeout.is_none());
        assert_eq!(config.unknown_variable_policy, UnknownVariablePolicy::Skip);
    }

    #[test]
    fn test_overrides() {
        let config = ClientBuilder::new("plc.local")
            .port(6000)
            .credentials("admin", "secret")
            .batch_size(20)
            .read_chunk_size(512)
            .connect_timeout(Duration::from_secs(3))
            .unknown_variable_policy(UnknownVariablePolicy::Fail)
            .build_config()
            .unwrap();
        assert_eq!(config.tcp_settings().endpoint(), "plc.local:6000");
        assert_eq!(config.batch_size, 20);
        assert_eq!(config.chunk_size, 512);
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(3)));
        assert_eq!(config.username, "admin");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            ClientBuilder::new("").build_config(),
            Err(FoxtrotError::InvalidConfig(_))
        ));
        assert!(matches!(
            ClientBuilder::new("h").batch_size(0).build_config(),
            Err(FoxtrotError::InvalidConfig(_))
        ));
        assert!(matches!(
            ClientBuilder::new("h").read_chunk_size(0).build_config(),
            Err(FoxtrotError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ClientBuilder::new("h").credentials("u", "hunter2").build_config().unwrap();
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
