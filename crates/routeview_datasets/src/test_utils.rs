use std::{
    fs::{self, File},
    path::{Path, PathBuf},
    time::SystemTime,
};

use uuid::Uuid;

/// Scratch data root under the system temp directory, removed on drop.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("routeview-{}", Uuid::new_v4()));
        fs::create_dir_all(&path).unwrap();
        ScratchDir {
            path: fs::canonicalize(path).unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.path.join(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    pub fn set_modified(&self, relative: &str, time: SystemTime) {
        File::options()
            .write(true)
            .open(self.path.join(relative))
            .unwrap()
            .set_modified(time)
            .unwrap();
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}
