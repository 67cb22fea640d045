//! # Scrumdeck
//!
//! Real-time planning poker room server.
//!
//! Scrumdeck keeps estimation rooms in sync over WebSockets: every
//! participant command flows into a per-room actor that owns the room's
//! state, and every accepted change is broadcast back to all connected
//! clients as a full state snapshot.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scrumdeck::prelude::*;
//!
//! # async fn run() -> Result<(), ScrumdeckError> {
//! let server = ScrumdeckServer::builder()
//!     .bind("0.0.0.0:8080")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::ScrumdeckError;
pub use server::{ScrumdeckServer, ScrumdeckServerBuilder};

/// Common imports for building and talking to a Scrumdeck server.
pub mod prelude {
    pub use scrumdeck_protocol::{
        Card, ClientCommand, Deck, ErrorNotice, Participant, ParticipantId,
        RoomKey, StateSnapshot,
    };
    pub use scrumdeck_room::{Role, RoomError};
    pub use scrumdeck_session::SessionId;
    pub use scrumdeck_transport::{ConnectParams, TransportError};

    pub use crate::error::ScrumdeckError;
    pub use crate::server::{ScrumdeckServer, ScrumdeckServerBuilder};
}
