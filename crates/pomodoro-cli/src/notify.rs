//! Desktop notifications.
//!
//! Only compiled against notify-rust on desktop targets; elsewhere the
//! desktop notifier quietly does nothing.

use pomodoro_core::storage::config::NotificationsConfig;
use pomodoro_core::NotifyError;

pub trait Notifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError>;
}

/// Used when notifications are switched off.
pub struct Silent;

impl Notifier for Silent {
    fn notify(&self, _title: &str, _body: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

pub struct DesktopNotifier {
    timeout_ms: u32,
}

#[cfg(any(
    target_os = "linux",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly",
    target_os = "macos",
    target_os = "windows"
))]
impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .timeout(notify_rust::Timeout::Milliseconds(self.timeout_ms))
            .show()
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "freebsd",
    target_os = "openbsd",
    target_os = "netbsd",
    target_os = "dragonfly",
    target_os = "macos",
    target_os = "windows"
)))]
impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, _body: &str) -> Result<(), NotifyError> {
        tracing::debug!(
            timeout_ms = self.timeout_ms,
            "no desktop notifications on this platform, skipping '{title}'"
        );
        Ok(())
    }
}

pub fn from_config(config: &NotificationsConfig, disabled: bool) -> Box<dyn Notifier> {
    if disabled || !config.enabled {
        Box::new(Silent)
    } else {
        Box::new(DesktopNotifier {
            timeout_ms: config.timeout_ms,
        })
    }
}
