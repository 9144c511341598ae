use std::sync::Arc;

use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{
    FutureExt, SinkExt, StreamExt,
    future::BoxFuture,
    stream::SplitSink,
};
use routeview_live::connection::{Connection, ConnectionError};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::state::AppState;

/// Outgoing half of an upgraded viewer socket.
pub struct WsConnection {
    id: Uuid,
    sink: Mutex<SplitSink<WebSocket, Message>>,
}

impl WsConnection {
    pub fn new(sink: SplitSink<WebSocket, Message>) -> Self {
        WsConnection {
            id: Uuid::new_v4(),
            sink: Mutex::new(sink),
        }
    }
}

impl Connection for WsConnection {
    fn id(&self) -> Uuid {
        self.id
    }

    // the upgrade already completed the handshake
    fn accept(&self) -> BoxFuture<'_, Result<(), ConnectionError>> {
        async { Ok(()) }.boxed()
    }

    fn send<'a>(&'a self, payload: &'a str) -> BoxFuture<'a, Result<(), ConnectionError>> {
        async move {
            self.sink
                .lock()
                .await
                .send(Message::Text(payload.to_owned().into()))
                .await
                .map_err(|error| ConnectionError::Send(error.to_string()))
        }
        .boxed()
    }

    fn close(&self) -> BoxFuture<'_, ()> {
        async move {
            if let Err(error) = self.sink.lock().await.close().await {
                debug!(id = %self.id, %error, "websocket already closed");
            }
        }
        .boxed()
    }
}

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sink, mut stream) = socket.split();
    let connection = Arc::new(WsConnection::new(sink));
    let id = connection.id();

    if let Err(error) = state.hub.connect(connection).await {
        warn!(%id, %error, "websocket registration failed");
        return;
    }

    // viewers only listen; incoming frames are drained until the socket closes
    while let Some(message) = stream.next().await {
        match message {
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => {}
        }
    }

    state.hub.disconnect(id).await;
}
