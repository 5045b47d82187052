//! User confirmation and alert channel.

/// Blocking confirm/alert dialogs.
///
/// Destructive operations ask [`Prompter::confirm`] before issuing a request,
/// and report their outcome through [`Prompter::alert`].
pub trait Prompter: Send + Sync {
    fn confirm(&self, message: &str) -> bool;

    fn alert(&self, message: &str);
}

/// Confirms everything; alerts go to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl Prompter for AutoConfirm {
    fn confirm(&self, message: &str) -> bool {
        tracing::debug!(message, "Auto-confirmed prompt");
        true
    }

    fn alert(&self, message: &str) {
        tracing::info!(message, "Alert");
    }
}

/// Declines every confirmation; used where no user is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractive;

impl Prompter for NonInteractive {
    fn confirm(&self, message: &str) -> bool {
        tracing::debug!(message, "Declined prompt without a terminal");
        false
    }

    fn alert(&self, message: &str) {
        tracing::info!(message, "Alert");
    }
}
