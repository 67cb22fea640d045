//! Codec trait and implementations for serializing/deserializing messages.
//!
//! The room core doesn't care how messages become bytes — it goes through
//! the [`Codec`] trait. [`JsonCodec`] is the only implementation today
//! (the client is a browser, so JSON is the wire format), but the seam
//! keeps the core testable without touching serde directly.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;
#[cfg(feature = "json")]
use crate::types::ClientCommand;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` because the codec is owned by long-lived room
/// actor tasks.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are malformed or
    /// don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Behind the default-on `json` feature flag.
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

/// Parses an inbound frame into a [`ClientCommand`], separating the two
/// failure classes the room treats differently:
///
/// - `Err(_)` — the frame isn't valid JSON. The room reports this back to
///   the originating channel as an error notice.
/// - `Ok(None)` — valid JSON, but not a recognized command (unknown or
///   malformed `type`, wrong field shapes). The room silently ignores it.
/// - `Ok(Some(cmd))` — a recognized command, ready for dispatch.
#[cfg(feature = "json")]
pub fn parse_client_command(
    data: &[u8],
) -> Result<Option<ClientCommand>, ProtocolError> {
    let value: serde_json::Value =
        serde_json::from_slice(data).map_err(ProtocolError::Decode)?;
    Ok(serde_json::from_value(value).ok())
}

// =========================================================================
// Tests
// =========================================================================
