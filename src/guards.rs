//! Route-guard decisions.
//!
//! Pure functions over a [`SessionSnapshot`]; the UI layer maps the
//! outcome onto its router. The role→home-route table is the host's
//! concern and is passed in as a resolver.

use crate::auth::session::SessionSnapshot;
use crate::navigator::NavigateOptions;

/// What a guard tells the presentation layer to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session still bootstrapping; render nothing yet.
    Suspend,
    /// Render the guarded content.
    Render,
    /// Navigate away instead of rendering.
    Redirect {
        to: String,
        opts: NavigateOptions,
    },
}

impl GuardOutcome {
    fn redirect(to: &str) -> Self {
        GuardOutcome::Redirect {
            to: to.to_string(),
            opts: NavigateOptions::replace(),
        }
    }
}

/// Gate for authenticated routes.
///
/// While loading, suspend. Without a user, off to `/login`. With a
/// non-empty `required_roles` that excludes the user's role, off to
/// `/forbidden`. Otherwise render.
pub fn protected_route(snapshot: &SessionSnapshot, required_roles: &[&str]) -> GuardOutcome {
    if snapshot.loading {
        return GuardOutcome::Suspend;
    }
    let Some(user) = &snapshot.user else {
        return GuardOutcome::redirect("/login");
    };

    if !required_roles.is_empty() && !required_roles.contains(&user.rol.nombre.as_str()) {
        return GuardOutcome::redirect("/forbidden");
    }
    GuardOutcome::Render
}

/// Gate for public-only routes such as the login page.
///
/// An already-authenticated user is sent to the home route their role
/// resolves to; `role_home` decides that mapping (and where roleless
/// users land, conventionally `/unauthorized`).
pub fn public_route(
    snapshot: &SessionSnapshot,
    role_home: impl Fn(&str) -> String,
) -> GuardOutcome {
    if snapshot.loading {
        return GuardOutcome::Suspend;
    }
    if let Some(user) = &snapshot.user {
        return GuardOutcome::Redirect {
            to: role_home(&user.rol.nombre),
            opts: NavigateOptions::replace(),
        };
    }
    GuardOutcome::Render
}
