//! Handshake parameters carried in the connection URL.
//!
//! Clients connect to `/rooms/{code}?id={participant}&spectator={flag}`.
//! The room code and participant id are mandatory; `spectator` defaults
//! to `false` and accepts `true` or `1`.

/// Identity and room selection presented by a connecting client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectParams {
    /// Room code from the request path.
    pub room: String,
    /// Participant identity from the `id` query parameter.
    pub participant: String,
    /// Whether the client joins as a non-voting observer.
    pub spectator: bool,
}

impl ConnectParams {
    /// Parses connection parameters from a request path and query string.
    ///
    /// Returns a human-readable rejection reason on failure, suitable for
    /// an HTTP error body.
    pub fn parse(path: &str, query: Option<&str>) -> Result<Self, String> {
        let room = path
            .strip_prefix("/rooms/")
            .filter(|code| !code.is_empty() && !code.contains('/'))
            .ok_or_else(|| format!("unsupported path '{path}'"))?;

        let mut participant = None;
        let mut spectator = false;
        for pair in query.unwrap_or_default().split('&') {
            match pair.split_once('=') {
                Some(("id", value)) if !value.is_empty() => {
                    participant = Some(value.to_string());
                }
                Some(("spectator", value)) => {
                    spectator = value == "true" || value == "1";
                }
                _ => {}
            }
        }

        let participant =
            participant.ok_or_else(|| "missing 'id' query parameter".to_string())?;

        Ok(Self {
            room: room.to_string(),
            participant,
            spectator,
        })
    }
}
