use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Errors reported by a [`NetworkSink`] implementation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// The message could not be handed to the transport.
    #[error("failed to send network event: {0}")]
    SendFailed(String),
}

/// Write-only handle to the p2p layer.
///
/// The pool emits a single event type,
/// [`NETWORK_EVENT_COMMIT_MESSAGES`](crate::NETWORK_EVENT_COMMIT_MESSAGES),
/// carrying an encoded
/// [`SingleCommitsPacket`](crate::SingleCommitsPacket). Delivery is
/// fire-and-forget; a failed send is never retried.
#[async_trait]
pub trait NetworkSink: Send + Sync {
    /// Broadcast `payload` to peers under the given event name.
    async fn send(&self, event: &'static str, payload: Bytes) -> Result<(), NetworkError>;
}

#[async_trait]
impl<T: NetworkSink + ?Sized> NetworkSink for Arc<T> {
    async fn send(&self, event: &'static str, payload: Bytes) -> Result<(), NetworkError> {
        (**self).send(event, payload).await
    }
}
