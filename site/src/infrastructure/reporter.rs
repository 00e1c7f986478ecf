use folio_core::ports::ProgressReporter;
use tracing::{debug, info, warn};

/// `ProgressReporter` que vuelca el progreso a los logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
  fn start(&self, total_records: usize) {
    info!("Formatting {total_records} records");
  }

  fn on_success(&self, origin: &str) {
    debug!("Formatted {origin}");
  }

  fn on_error(&self, origin: &str, error: &str) {
    warn!("Could not format {origin}: {error}");
  }

  fn finish(&self, accepted: usize, rejected: usize) {
    info!("Formatting done: {accepted} accepted, {rejected} rejected");
  }
}
