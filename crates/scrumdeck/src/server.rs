//! `ScrumdeckServer` builder and accept loop.
//!
//! This is the entry point for running a Scrumdeck server. It ties the
//! layers together: transport → room actors, with one handler task per
//! connection.

use std::sync::Arc;

use scrumdeck_room::RoomManager;
use scrumdeck_transport::{Transport, WebSocketTransport};
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;

use crate::ScrumdeckError;
use crate::handler::handle_connection;

/// Outbound channel feeding a connection's writer task.
pub(crate) type Outbound = UnboundedSender<Vec<u8>>;

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. The room
/// manager lock is held only for handle lookup, never across I/O.
pub(crate) struct ServerState {
    pub(crate) rooms: Mutex<RoomManager<Outbound>>,
}

/// Builder for configuring and starting a Scrumdeck server.
pub struct ScrumdeckServerBuilder {
    bind_addr: String,
}

impl ScrumdeckServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Binds the listener and builds the server.
    pub async fn build(self) -> Result<ScrumdeckServer, ScrumdeckError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;
        let state = Arc::new(ServerState {
            rooms: Mutex::new(RoomManager::new()),
        });
        Ok(ScrumdeckServer { transport, state })
    }
}

impl Default for ScrumdeckServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Scrumdeck server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct ScrumdeckServer {
    transport: WebSocketTransport,
    state: Arc<ServerState>,
}

impl ScrumdeckServer {
    /// Creates a new builder.
    pub fn builder() -> ScrumdeckServerBuilder {
        ScrumdeckServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the server accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task for each.
    /// A failed accept (including a refused upgrade) never stops the
    /// loop. Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), ScrumdeckError> {
        tracing::info!("Scrumdeck server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::debug!(error = %e, "accept failed");
                }
            }
        }
    }
}
