use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use futures::{FutureExt, future::BoxFuture};
use parking_lot::Mutex;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::connection::{Connection, ConnectionError};

#[derive(Default)]
pub struct MockConnection {
    id: Uuid,
    fail_accept: bool,
    fail_send: bool,
    gate: Option<Arc<Notify>>,
    pub accepted: AtomicUsize,
    pub closed: AtomicBool,
    sent: Mutex<Vec<String>>,
}

impl MockConnection {
    pub fn new() -> Arc<Self> {
        Arc::new(MockConnection {
            id: Uuid::new_v4(),
            ..Default::default()
        })
    }

    pub fn failing_send() -> Arc<Self> {
        Arc::new(MockConnection {
            id: Uuid::new_v4(),
            fail_send: true,
            ..Default::default()
        })
    }

    pub fn failing_accept() -> Arc<Self> {
        Arc::new(MockConnection {
            id: Uuid::new_v4(),
            fail_accept: true,
            ..Default::default()
        })
    }

    /// Sends only complete once `gate` is notified.
    pub fn gated(gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(MockConnection {
            id: Uuid::new_v4(),
            gate: Some(gate),
            ..Default::default()
        })
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }
}

impl Connection for MockConnection {
    fn id(&self) -> Uuid {
        self.id
    }

    fn accept(&self) -> BoxFuture<'_, Result<(), ConnectionError>> {
        async move {
            self.accepted.fetch_add(1, Ordering::SeqCst);
            if self.fail_accept {
                Err(ConnectionError::Handshake("refused".to_owned()))
            } else {
                Ok(())
            }
        }
        .boxed()
    }

    fn send<'a>(&'a self, payload: &'a str) -> BoxFuture<'a, Result<(), ConnectionError>> {
        async move {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.fail_send {
                return Err(ConnectionError::Send("broken pipe".to_owned()));
            }
            self.sent.lock().push(payload.to_owned());
            Ok(())
        }
        .boxed()
    }

    fn close(&self) -> BoxFuture<'_, ()> {
        async move {
            self.closed.store(true, Ordering::SeqCst);
        }
        .boxed()
    }
}
