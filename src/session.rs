//! Session Authority: turns identity-provider session events into an
//! admin/non-admin verdict and gates every mutating catalog operation.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;

/// The identity attached to an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub email: String,
}

impl Principal {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Authority state. `Authenticating` is the bootstrap state until the first
/// session resolution completes; `NonAdminAuthenticated` is transient — the
/// authority signs such sessions out and settles in `Unauthenticated` before
/// reporting back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    Authenticating,
    Unauthenticated,
    AdminAuthenticated,
    NonAdminAuthenticated,
}

impl AuthState {
    pub const fn label(self) -> &'static str {
        match self {
            AuthState::Authenticating => "authenticating",
            AuthState::Unauthenticated => "unauthenticated",
            AuthState::AdminAuthenticated => "admin_authenticated",
            AuthState::NonAdminAuthenticated => "non_admin_authenticated",
        }
    }
}

/// Injectable authorization policy so multi-admin or role-based checks can
/// replace the single-address comparison without touching the authority.
pub trait AdminPolicy: Send + Sync {
    fn is_admin(&self, principal: &Principal) -> bool;
}

/// Exact, case-sensitive match against one configured administrator address.
#[derive(Debug, Clone)]
pub struct SingleAdminPolicy {
    admin_email: String,
}

impl SingleAdminPolicy {
    pub fn new(admin_email: impl Into<String>) -> Self {
        Self {
            admin_email: admin_email.into(),
        }
    }
}

impl AdminPolicy for SingleAdminPolicy {
    fn is_admin(&self, principal: &Principal) -> bool {
        principal.email == self.admin_email
    }
}

/// Contract over the external identity provider. The catalog consumes session
/// events and issues sign-outs; the OAuth handshake itself lives elsewhere.
pub trait IdentityGateway: Send + Sync {
    fn sign_out(&self) -> Result<(), IdentityError>;
    /// Redirect target that starts the provider's sign-in flow.
    fn authorize_url(&self, redirect_to: &str) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("administrator session required")]
    Unauthorized { state: AuthState },
    #[error("identity provider error: {0}")]
    Identity(String),
}

/// State machine re-evaluated on every session-change event.
pub struct SessionAuthority {
    policy: Box<dyn AdminPolicy>,
    identity: Box<dyn IdentityGateway>,
    state: Mutex<AuthState>,
}

impl SessionAuthority {
    pub fn new(policy: Box<dyn AdminPolicy>, identity: Box<dyn IdentityGateway>) -> Self {
        Self {
            policy,
            identity,
            state: Mutex::new(AuthState::Authenticating),
        }
    }

    pub fn state(&self) -> AuthState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set(&self, next: AuthState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Apply a session-change event from the identity provider.
    ///
    /// A session held by anyone other than the administrator is invalidated
    /// on the spot: the authority signs it out and lands in `Unauthenticated`,
    /// so an admin surface never observes a logged-in-but-unauthorized state.
    /// That holds even when the sign-out call itself fails.
    pub fn on_session_change(
        &self,
        principal: Option<&Principal>,
    ) -> Result<AuthState, SessionError> {
        let next = match principal {
            None => AuthState::Unauthenticated,
            Some(principal) if self.policy.is_admin(principal) => {
                tracing::info!(email = %principal.email, "administrator session established");
                AuthState::AdminAuthenticated
            }
            Some(principal) => {
                tracing::warn!(email = %principal.email, "non-administrator session rejected");
                self.set(AuthState::NonAdminAuthenticated);
                let signed_out = self.identity.sign_out();
                self.set(AuthState::Unauthenticated);
                signed_out.map_err(|err| SessionError::Identity(err.to_string()))?;
                AuthState::Unauthenticated
            }
        };

        self.set(next);
        Ok(next)
    }

    /// Gate for admin-only operations; callers perform no write on error.
    pub fn require_admin(&self) -> Result<(), SessionError> {
        let state = self.state();
        if state == AuthState::AdminAuthenticated {
            Ok(())
        } else {
            Err(SessionError::Unauthorized { state })
        }
    }

    pub fn sign_in_url(&self, redirect_to: &str) -> String {
        self.identity.authorize_url(redirect_to)
    }
}

impl std::fmt::Debug for SessionAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAuthority")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
