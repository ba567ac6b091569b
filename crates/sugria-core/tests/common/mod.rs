#![allow(dead_code)]

use std::path::PathBuf;

use sugria_core::{Portal, PortalBuilder};
use tempfile::TempDir;
use wiremock::MockServer;

/// Helper function to create a test portal talking to `server`
pub async fn create_test_portal(server: &MockServer) -> (TempDir, Portal) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let portal = PortalBuilder::new()
        .with_database_path(Some(&db_path))
        .with_api_url(Some(server.uri()))
        .build()
        .await
        .expect("Failed to create portal");
    (temp_dir, portal)
}

/// Write a small file with the given name into `dir`
pub fn write_file(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).expect("Failed to write test file");
    path
}
