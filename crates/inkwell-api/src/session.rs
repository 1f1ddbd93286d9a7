// Session authentication
//
// The backend authenticates with a session cookie issued by its browsable
// login view (`/api-auth/login/`), a form-and-redirect flow rather than a
// JSON endpoint. Login fetches the form to obtain the CSRF cookie, posts
// the credentials, and succeeds iff a session cookie lands in the jar.

use reqwest::Method;
use reqwest::header::REFERER;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::client::{ApiClient, CSRF_COOKIE, CSRF_HEADER, SESSION_COOKIE};
use crate::error::Error;

impl ApiClient {
    /// Browser redirect target for the login view, returning to `next`.
    pub fn login_url(&self, next: Option<&str>) -> Result<Url, Error> {
        let mut url = self.endpoints().auth_url("login/")?;
        if let Some(next) = next {
            url.query_pairs_mut().append_pair("next", next);
        }
        Ok(url)
    }

    /// Browser redirect target for the logout view, returning to `next`.
    pub fn logout_url(&self, next: Option<&str>) -> Result<Url, Error> {
        let mut url = self.endpoints().auth_url("logout/")?;
        if let Some(next) = next {
            url.query_pairs_mut().append_pair("next", next);
        }
        Ok(url)
    }

    /// Whether the jar currently holds a session cookie for the API origin.
    ///
    /// Presence only; the check in [`Users::current_user`](crate::Users::current_user)
    /// is the authority on whether the session is still valid.
    pub fn has_session(&self) -> bool {
        self.cookie(self.endpoints().api_base(), SESSION_COOKIE)
            .is_some()
    }

    /// Authenticate with username/password through the login form.
    ///
    /// On success the session cookie is stored in the client's cookie jar
    /// and used for all subsequent requests. Requires a client built with
    /// [`ApiClient::new`] (a client without a jar reference cannot observe
    /// the issued cookies).
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.login_url(None)?;
        debug!("fetching login form at {}", url);

        let resp = self.http().get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Authentication {
                message: format!("login page unavailable (HTTP {status})"),
            });
        }

        let token = self
            .cookie(&url, CSRF_COOKIE)
            .ok_or_else(|| Error::Authentication {
                message: "backend did not issue a CSRF cookie".into(),
            })?;

        let next = self.endpoints().api_base().path().to_owned();
        let form = [
            ("username", username),
            ("password", password.expose_secret()),
            ("csrfmiddlewaretoken", token.as_str()),
            ("next", next.as_str()),
        ];

        debug!(username, "submitting login form");
        let resp = self
            .http()
            .post(url.clone())
            .header(CSRF_HEADER, token.as_str())
            .header(REFERER, url.as_str())
            .form(&form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status})"),
            });
        }

        if !self.has_session() {
            return Err(Error::Authentication {
                message: "invalid username or password".into(),
            });
        }

        debug!("login successful");
        Ok(())
    }

    /// End the current session.
    ///
    /// `POST /api-auth/logout/` with the CSRF header.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.logout_url(None)?;
        debug!("logging out at {}", url);
        let builder = self.request(Method::POST, url);
        self.execute(builder).await?;
        debug!("logout complete");
        Ok(())
    }
}
