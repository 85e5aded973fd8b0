//! Load diagnostics
//!
//! A [`LoadObserver`] is told when a file load starts and finishes. The
//! default observer reports through `tracing`; callers can install their own
//! through [`IniFileBuilder::observer`](crate::IniFileBuilder::observer).

use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Receives load notifications from [`IniFile`](crate::IniFile)
pub trait LoadObserver: Send {
    fn load_started(&self, _path: &Path) {}

    fn load_finished(&self, _path: &Path, _lines: usize, _elapsed: Duration) {}
}

/// Reports loads as tracing events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl LoadObserver for TracingObserver {
    fn load_started(&self, path: &Path) {
        debug!("Loading {:?}", path);
    }

    fn load_finished(&self, path: &Path, lines: usize, elapsed: Duration) {
        info!("Loaded {:?}: {} lines in {:?}", path, lines, elapsed);
    }
}

/// Discards every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl LoadObserver for SilentObserver {}
