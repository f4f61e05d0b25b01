//! Status line mirror of the log.

use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiLogLevel {
    Warning,
    Error,
    Info,
}

impl UiLogLevel {
    pub fn as_str(&self) -> &str {
        match self {
            UiLogLevel::Warning => "Warning",
            UiLogLevel::Error => "Error",
            UiLogLevel::Info => "Info",
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            UiLogLevel::Warning => Color32::YELLOW,
            UiLogLevel::Error => Color32::RED,
            UiLogLevel::Info => Color32::WHITE,
        }
    }
}

/// Pushes messages to both the log and the status line, where they stay
/// until they time out.
#[derive(Clone, Default)]
pub struct UiLogger {
    message: Option<(String, UiLogLevel)>,
    message_time: Option<Instant>,
    timeout: Option<u64>,
}

impl UiLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(&self) -> Option<(&str, UiLogLevel)> {
        self.message.as_ref().map(|(m, l)| (m.as_str(), *l))
    }

    fn set_message(&mut self, msg: String, level: UiLogLevel, timeout: Option<u64>) {
        self.message = Some((msg, level));
        self.message_time = Some(Instant::now());
        self.timeout = timeout;
    }

    pub fn warn(&mut self, msg: impl Into<String>, timeout: Option<u64>) {
        let msg = msg.into();
        log::warn!("{}", msg);
        self.set_message(msg, UiLogLevel::Warning, timeout);
    }

    pub fn error(&mut self, msg: impl Into<String>, timeout: Option<u64>) {
        let msg = msg.into();
        log::error!("{}", msg);
        self.set_message(msg, UiLogLevel::Error, timeout);
    }

    pub fn info(&mut self, msg: impl Into<String>, timeout: Option<u64>) {
        let msg = msg.into();
        log::info!("{}", msg);
        self.set_message(msg, UiLogLevel::Info, timeout);
    }

    /// Call once per frame.
    pub fn clear_expired(&mut self) {
        if let Some(t) = self.message_time {
            let timeout = self.timeout.unwrap_or(LOG_TIMEOUT);
            if t.elapsed() >= Duration::from_secs(timeout) {
                self.message = None;
                self.message_time = None;
            }
        }
    }
}
