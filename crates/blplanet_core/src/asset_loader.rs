//! Background asset loading
//!
//! The [`AssetLoader`] owns a worker thread that reads and validates asset
//! files. Results come back over a channel; the frame loop drains them at the
//! start of every tick.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::asset_error::AssetError;
use crate::assets::{AssetKind, LoadedAsset};

/// Request to load an asset in the background
struct LoadRequest {
    path: PathBuf,
    kind: AssetKind,
}

/// Result of a background asset load
#[derive(Debug)]
pub struct LoadResult {
    /// Path that was requested
    pub path: PathBuf,
    /// Kind that was requested
    pub kind: AssetKind,
    /// The loaded asset or error
    pub result: Result<LoadedAsset, AssetError>,
}

/// Background asset loader using a dedicated worker thread
///
/// Requests are processed in submission order. There is no retry and no
/// cancellation; every request produces exactly one [`LoadResult`].
pub struct AssetLoader {
    sender: Sender<LoadRequest>,
    receiver: Receiver<LoadResult>,
}

impl AssetLoader {
    /// Create a new loader with a background worker thread
    ///
    /// The worker thread runs until the loader is dropped.
    pub fn new() -> Self {
        let (request_tx, request_rx) = channel::<LoadRequest>();
        let (result_tx, result_rx) = channel::<LoadResult>();

        thread::spawn(move || {
            while let Ok(request) = request_rx.recv() {
                log::debug!("Loading {:?} from {}", request.kind, request.path.display());
                let result = request.kind.load(&request.path);
                let load_result = LoadResult {
                    path: request.path,
                    kind: request.kind,
                    result,
                };
                if result_tx.send(load_result).is_err() {
                    break;
                }
            }
        });

        Self {
            sender: request_tx,
            receiver: result_rx,
        }
    }

    /// Queue `path` to be loaded as `kind`
    pub fn request(&self, path: impl Into<PathBuf>, kind: AssetKind) {
        let request = LoadRequest {
            path: path.into(),
            kind,
        };
        if self.sender.send(request).is_err() {
            log::error!("Asset loader worker has exited; request dropped");
        }
    }

    /// Take one completed load, if any (non-blocking)
    pub fn poll(&self) -> Option<LoadResult> {
        self.receiver.try_recv().ok()
    }

    /// Collect all completed loads (non-blocking)
    pub fn poll_all(&self) -> Vec<LoadResult> {
        self.receiver.try_iter().collect()
    }

    /// Wait up to `timeout` for the next completed load
    pub fn poll_timeout(&self, timeout: Duration) -> Option<LoadResult> {
        match self.receiver.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}
