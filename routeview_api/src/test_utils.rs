use std::{
    path::PathBuf,
    sync::Arc,
};

use futures::{FutureExt, future::BoxFuture};
use parking_lot::Mutex;
use routeview_datasets::registry::RegistryConfig;
use routeview_geometry::route_geometry::PrecisionPolicy;
use routeview_live::connection::{Connection, ConnectionError};
use uuid::Uuid;

use crate::state::AppState;

/// Data root under the system temp directory, removed on drop.
pub struct TestDataRoot {
    path: PathBuf,
}

impl TestDataRoot {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("routeview-api-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&path).unwrap();
        TestDataRoot { path }
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.path.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::new(AppState::new(
            RegistryConfig {
                data_root: self.path.clone(),
                base_name: "nextbillion_response".to_owned(),
                default_file: None,
            },
            PrecisionPolicy::default(),
        ))
    }
}

impl Drop for TestDataRoot {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Connection double that records every payload it receives.
pub struct RecordingConnection {
    id: Uuid,
    pub sent: Mutex<Vec<String>>,
}

impl RecordingConnection {
    pub fn new() -> Arc<Self> {
        Arc::new(RecordingConnection {
            id: Uuid::new_v4(),
            sent: Mutex::new(Vec::new()),
        })
    }
}

impl Connection for RecordingConnection {
    fn id(&self) -> Uuid {
        self.id
    }

    fn accept(&self) -> BoxFuture<'_, Result<(), ConnectionError>> {
        async { Ok(()) }.boxed()
    }

    fn send<'a>(&'a self, payload: &'a str) -> BoxFuture<'a, Result<(), ConnectionError>> {
        async move {
            self.sent.lock().push(payload.to_owned());
            Ok(())
        }
        .boxed()
    }

    fn close(&self) -> BoxFuture<'_, ()> {
        async {}.boxed()
    }
}
