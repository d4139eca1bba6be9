//! Operator notifications.
//!
//! Every user-visible outcome (success, validation warning, backend error)
//! flows through a `Notifier`. The binary installs the terminal sink; tests
//! install a recording one. No notice is fatal to the session.

/// Severity of an operator-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

/// A transient notice surfaced to the operator.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// Sink for operator notices.
pub trait Notifier: Send {
    fn notify(&self, notice: Notice);
}

/// Writes notices to stderr with a timestamp and mirrors them to tracing.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        let ts = chrono::Local::now().format("%H:%M:%S");
        let tag = match notice.level {
            Level::Success => "ok",
            Level::Info => "info",
            Level::Warning => "warn",
            Level::Error => "error",
        };
        match notice.level {
            Level::Error => tracing::error!("{}", notice.message),
            Level::Warning => tracing::warn!("{}", notice.message),
            _ => tracing::info!("{}", notice.message),
        }
        eprintln!("[{ts}] {tag}: {}", notice.message);
    }
}
