/// Post-store notification hook.
///
/// After a successful non-empty batch write the scheduler announces the
/// station name to a collaborator. The production implementation spawns a
/// user-configured executable; failures there are the collaborator's problem
/// and are only logged, never propagated into the collection cycle.

use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, warn};

pub trait Notifier {
    fn notify(&self, station_name: &str);
}

impl Notifier for Box<dyn Notifier> {
    fn notify(&self, station_name: &str) {
        (**self).notify(station_name)
    }
}

/// Runs the configured callback executable with the station name as its
/// single argument.
pub struct ExecNotifier {
    callback: PathBuf,
}

impl ExecNotifier {
    pub fn new(callback: PathBuf) -> Self {
        Self { callback }
    }
}

impl Notifier for ExecNotifier {
    fn notify(&self, station_name: &str) {
        debug!(callback = %self.callback.display(), station_name, "running callback");
        match Command::new(&self.callback).arg(station_name).status() {
            Ok(status) if status.success() => {}
            Ok(status) => warn!(
                callback = %self.callback.display(),
                code = status.code().unwrap_or(-1),
                "callback exited with failure"
            ),
            Err(e) => warn!(
                callback = %self.callback.display(),
                error = %e,
                "callback failed to run"
            ),
        }
    }
}

/// Used when no callback is configured.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _station_name: &str) {}
}
