use futures::future::BoxFuture;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("Handshake failed: {0}")]
    Handshake(String),

    #[error("Send failed: {0}")]
    Send(String),

    #[error("Connection closed")]
    Closed,
}

/// A live viewer channel, as seen by the broadcast hub.
///
/// Implemented once per transport. `id` is the identity used for
/// registration, so two handles with the same id are the same connection.
pub trait Connection: Send + Sync {
    fn id(&self) -> Uuid;

    /// Completes the handshake; the connection only receives events after it
    /// succeeded.
    fn accept(&self) -> BoxFuture<'_, Result<(), ConnectionError>>;

    fn send<'a>(&'a self, payload: &'a str) -> BoxFuture<'a, Result<(), ConnectionError>>;

    fn close(&self) -> BoxFuture<'_, ()>;
}
