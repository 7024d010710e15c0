//! Snapshot capture contract
//!
//! The rendering surface lives outside this crate. All the browser needs is
//! a way to ask it for the current visual state as encoded image bytes.

use std::future::Future;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("No renderable surface is attached")]
    NoSurface,

    #[error("Capture failed: {0}")]
    Capture(String),
}

/// Something that can capture the page currently on screen.
pub trait Snapshotter {
    fn capture(&self) -> impl Future<Output = Result<Vec<u8>, SnapshotError>> + Send;
}
