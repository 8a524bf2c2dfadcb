//! User-visible notices emitted by the session layer.
//!
//! Same indirection pattern as [`crate::navigator`]: the host installs a
//! handler (typically wired to its toast system); until then notices are
//! logged so they are never dropped.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{error, info};

/// Global notices the session layer can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The session could not be recovered; the user must sign in again.
    SessionExpired,
    /// The backend answered with a 5xx.
    ServerFault,
}

impl Notice {
    /// User-facing message for this notice.
    pub fn message(&self) -> &'static str {
        match self {
            Notice::SessionExpired => "Tu sesión expiró. Vuelve a iniciar sesión.",
            Notice::ServerFault => "Error del servidor. Intenta más tarde.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

type NoticeFn = Arc<dyn Fn(Notice) + Send + Sync>;

/// Sink for global notices, with an `install`/`emit` interface.
pub struct NoticeSink {
    inner: RwLock<NoticeFn>,
}

impl NoticeSink {
    /// Create a sink with the logging fallback installed.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Arc::new(fallback_notify)),
        }
    }

    /// Install the host's notice handler.
    pub fn install(&self, f: impl Fn(Notice) + Send + Sync + 'static) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(f);
    }

    /// Raise a notice.
    pub fn emit(&self, notice: Notice) {
        let notify = {
            let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(&guard)
        };
        notify(notice);
    }
}

impl Default for NoticeSink {
    fn default() -> Self {
        Self::new()
    }
}

fn fallback_notify(notice: Notice) {
    match notice {
        Notice::SessionExpired => info!(notice = %notice, "session notice"),
        Notice::ServerFault => error!(notice = %notice, "session notice"),
    }
}
