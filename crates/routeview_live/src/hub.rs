use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
};

use futures::future::join_all;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::connection::{Connection, ConnectionError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BroadcastError {
    #[error("No active connections to broadcast to")]
    NoActiveTargets,
}

/// Registry of live viewer connections.
///
/// The lock only guards the map. Sends run on a snapshot taken under the
/// lock, so a slow connection never blocks others from joining or leaving.
#[derive(Default)]
pub struct BroadcastHub {
    connections: RwLock<HashMap<Uuid, Arc<dyn Connection>>>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts and registers a connection.
    ///
    /// Returns `false` when the connection was already registered. An already
    /// registered handle is not accepted again, but two concurrent connects of
    /// the same unregistered handle may both run `accept`; only one of them
    /// registers it.
    pub async fn connect(&self, connection: Arc<dyn Connection>) -> Result<bool, ConnectionError> {
        let id = connection.id();

        if self.connections.read().await.contains_key(&id) {
            debug!(%id, "connection already registered");
            return Ok(false);
        }

        connection.accept().await?;

        let registered = match self.connections.write().await.entry(id) {
            Entry::Vacant(entry) => {
                entry.insert(connection);
                true
            }
            Entry::Occupied(_) => false,
        };

        if registered {
            info!(%id, "connection registered");
        }

        Ok(registered)
    }

    /// Unregisters a connection. Unknown ids are ignored.
    pub async fn disconnect(&self, id: Uuid) -> bool {
        let removed = self.connections.write().await.remove(&id).is_some();

        if removed {
            info!(%id, "connection unregistered");
        }

        removed
    }

    /// Sends `payload` to every registered connection and returns how many
    /// deliveries succeeded. Connections that fail are dropped.
    pub async fn broadcast(&self, payload: &str) -> Result<usize, BroadcastError> {
        let targets: Vec<Arc<dyn Connection>> =
            self.connections.read().await.values().cloned().collect();

        if targets.is_empty() {
            return Err(BroadcastError::NoActiveTargets);
        }

        let results = join_all(targets.iter().map(|target| target.send(payload))).await;

        let mut delivered = 0;
        for (target, result) in targets.iter().zip(results) {
            match result {
                Ok(()) => delivered += 1,
                Err(error) => {
                    warn!(id = %target.id(), %error, "dropping connection after failed send");
                    if self.disconnect(target.id()).await {
                        target.close().await;
                    }
                }
            }
        }

        info!(
            delivered,
            failed = targets.len() - delivered,
            "broadcast complete"
        );

        if delivered == 0 {
            Err(BroadcastError::NoActiveTargets)
        } else {
            Ok(delivered)
        }
    }

    pub async fn contains(&self, id: Uuid) -> bool {
        self.connections.read().await.contains_key(&id)
    }

    pub async fn len(&self) -> usize {
        self.connections.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.connections.read().await.is_empty()
    }
}
