//! The host's message surface.

/// Receives user-visible error messages from the IDE layer.
///
/// Providers never propagate formatting failures to the caller; they report
/// them here and return a degraded result instead.
pub trait Notifier: Send + Sync {
    fn show_error(&self, message: &str);
}

/// Forwards messages to `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_error(&self, message: &str) {
        tracing::error!("{message}");
    }
}
