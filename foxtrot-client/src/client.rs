//! Stateful Foxtrot client
//!
//! # State Machine
//!
//! - `Uninitialized` -> `Discovered` (`discover()`)
//! - `Discovered` -> `Populated` (`read_variables()`)
//! - `Populated` -> `QuickRefreshed` (`read_quick_variables()`)
//!
//! `read_variables()` discovers first when nothing has been discovered, and
//! `read_quick_variables()` runs a full read first when there are no quick
//! variables. Calling `discover()` again replaces the namespace and the
//! entities wholesale.

use crate::builder::{ClientBuilder, ClientConfig};
use crate::discovery;
use crate::reader::{BatchReader, ReadSummary};
use foxtrot_core::{Command, Entity, EntityMap, FoxtrotResult, Namespace};
use foxtrot_session::{FrameMode, FrameReader, Session};
use foxtrot_transport::{TcpTransport, TransportLayer};

/// Client lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    /// Nothing discovered yet
    Uninitialized,
    /// Namespace known, no values read
    Discovered,
    /// A full read has completed
    Populated,
    /// Quick variables were refreshed on top of a full read
    QuickRefreshed,
}

/// Client for one controller
///
/// Not meant to be shared: every operation takes `&mut self` and performs
/// its exchanges one after another.
#[derive(Debug)]
pub struct FoxtrotClient<T: TransportLayer = TcpTransport> {
    config: ClientConfig,
    session: Session<T>,
    reader: BatchReader,
    namespace: Namespace,
    entities: EntityMap,
    state: ClientState,
}

impl FoxtrotClient<TcpTransport> {
    /// Client for `host` with default settings
    pub fn new(host: impl Into<String>) -> FoxtrotResult<Self> {
        ClientBuilder::new(host).build()
    }
}

impl<T: TransportLayer> FoxtrotClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let session = Session::with_reader(transport, FrameReader::new(config.chunk_size));
        let reader = BatchReader::new(config.batch_size, config.unknown_variable_policy);
        Self {
            config,
            session,
            reader,
            namespace: Namespace::new(),
            entities: EntityMap::new(),
            state: ClientState::Uninitialized,
        }
    }

    /// Enumerate the namespace and classify its groups
    ///
    /// Replaces the catalog, groups and entities from any earlier pass.
    pub async fn discover(&mut self) -> FoxtrotResult<&Namespace> {
        let namespace = discovery::discover(&mut self.session).await?;
        self.entities = namespace.entity_skeleton();
        self.namespace = namespace;
        self.state = ClientState::Discovered;
        Ok(&self.namespace)
    }

    async fn ensure_discovered(&mut self) -> FoxtrotResult<()> {
        if self.namespace.is_empty() {
            self.discover().await?;
        }
        Ok(())
    }

    /// Read every discovered variable into a rebuilt entity map
    pub async fn read_variables(&mut self) -> FoxtrotResult<&EntityMap> {
        self.ensure_discovered().await?;

        let entities = self
            .reader
            .read_all(&mut self.session, &self.namespace, &self.namespace.catalog.all)
            .await?;
        self.entities = entities;
        self.state = ClientState::Populated;
        Ok(&self.entities)
    }

    /// Refresh only the value-carrying variables, merging into the
    /// entities of the last full read
    pub async fn read_quick_variables(&mut self) -> FoxtrotResult<&EntityMap> {
        if self.namespace.catalog.quick.is_empty() {
            self.read_variables().await?;
        }

        self.reader
            .read_into(
                &mut self.session,
                &self.namespace,
                &self.namespace.catalog.quick,
                &mut self.entities,
            )
            .await?;
        self.state = ClientState::QuickRefreshed;
        Ok(&self.entities)
    }

    /// Read arbitrary variables into a fresh entity map
    ///
    /// Leaves the client's own entities untouched.
    pub async fn read_all(&mut self, names: &[String]) -> FoxtrotResult<EntityMap> {
        self.ensure_discovered().await?;
        self.reader.read_all(&mut self.session, &self.namespace, names).await
    }

    /// Read one batch of variables with a single request into `entities`
    pub async fn read_batch(
        &mut self,
        names: &[String],
        entities: &mut EntityMap,
    ) -> FoxtrotResult<ReadSummary> {
        self.ensure_discovered().await?;
        self.reader
            .read_batch(&mut self.session, &self.namespace, names, entities)
            .await
    }

    /// Raw `LIST` reply
    pub async fn list_raw(&mut self) -> FoxtrotResult<String> {
        self.session.send_command(&Command::List, FrameMode::Multiline).await
    }

    /// Raw reply to a single `GET`
    pub async fn get_raw(&mut self, name: &str) -> FoxtrotResult<String> {
        self.session.send_command(&Command::get(name), FrameMode::Multiline).await
    }

    /// Write a variable; the raw reply is returned undecoded
    pub async fn set(&mut self, name: &str, value: &str) -> FoxtrotResult<String> {
        self.session
            .send_command(&Command::set(name, value), FrameMode::Multiline)
            .await
    }

    /// Entity for a group name
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    pub fn entities(&self) -> &EntityMap {
        &self.entities
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session<T> {
        &self.session
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    /// Close the connection; entities and namespace are kept
    pub async fn disconnect(&mut self) -> FoxtrotResult<()> {
        self.session.close().await
    }
}
