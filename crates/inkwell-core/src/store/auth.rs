// ── Session actions ──

use secrecy::SecretString;
use tracing::{debug, info, warn};

use super::Store;
use crate::error::CoreError;
use crate::model::User;

impl Store {
    /// Ask the current-user endpoint whether the session is live.
    ///
    /// Returns whether a session is active and never fails. On success the
    /// user is loaded unless already cached; on failure it is cleared.
    pub async fn check_authentication(&self) -> bool {
        match self.client.users().current_user().await {
            Ok(_) => {
                self.set_authenticated(true);
                if self.user.current().is_none() {
                    self.fetch_current_user().await;
                }
                self.is_authenticated()
            }
            Err(e) => {
                let e = CoreError::from(e);
                if e.is_connectivity() {
                    warn!(error = %e, "backend unreachable, treating session as signed out");
                } else {
                    debug!(error = %e, "authentication check failed");
                }
                self.set_authenticated(false);
                self.user.set_current(None);
                false
            }
        }
    }

    /// Log in through the session auth form and load the user.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<User, CoreError> {
        self.client.login(username, password).await?;
        self.fetch_current_user().await;

        match self.user.current() {
            Some(user) => {
                info!(username = %user.username, "logged in");
                Ok(user)
            }
            None => Err(CoreError::AuthenticationFailed {
                message: self
                    .user
                    .snapshot()
                    .error
                    .unwrap_or_else(|| "session was not accepted".into()),
            }),
        }
    }

    /// End the server session (best effort) and clear all local state.
    pub async fn logout(&self) {
        if let Err(e) = self.client.logout().await {
            warn!(error = %e, "logout request failed");
        }
        self.clear_all();
    }
}
