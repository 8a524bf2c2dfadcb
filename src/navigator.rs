//! Late-bound navigation indirection.
//!
//! The HTTP client lives outside any UI component tree but still has to
//! trigger route changes (session expiry, forbidden, not-found). The host
//! installs its router's navigation function here once at startup; until
//! then a hard-redirect fallback logs the target so a navigation request
//! is never silently dropped.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

/// Options accompanying a navigation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigateOptions {
    /// Shorthand for a history-replacing navigation.
    pub fn replace() -> Self {
        Self { replace: true }
    }
}

type NavigateFn = Arc<dyn Fn(&str, NavigateOptions) + Send + Sync>;

/// Process-wide navigation cell with a narrow `install`/`navigate_to`
/// interface. Constructed once and injected into the HTTP client.
pub struct Navigator {
    inner: RwLock<NavigateFn>,
}

impl Navigator {
    /// Create a navigator with the hard-redirect fallback installed.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Arc::new(fallback_navigate)),
        }
    }

    /// Install the host's navigation function. All subsequent
    /// `navigate_to` calls go through it.
    pub fn install(&self, f: impl Fn(&str, NavigateOptions) + Send + Sync + 'static) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(f);
        debug!("navigator installed");
    }

    /// Route the process to `path`.
    pub fn navigate_to(&self, path: &str, opts: NavigateOptions) {
        let nav = {
            let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(&guard)
        };
        nav(path, opts);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-install fallback: the equivalent of a full page redirect. Logged
/// loudly because reaching it usually means the host forgot to call
/// `install` during startup.
fn fallback_navigate(path: &str, opts: NavigateOptions) {
    warn!(
        target_path = %path,
        replace = opts.replace,
        "no navigator installed, falling back to hard redirect"
    );
}
