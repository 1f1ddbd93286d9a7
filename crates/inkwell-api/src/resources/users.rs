use crate::client::ApiClient;
use crate::envelope::ListResponse;
use crate::error::Error;
use crate::models::User;
use crate::request::{QueryParams, ResourceKind};

const KIND: ResourceKind = ResourceKind::Users;

/// Read-only user endpoints: `/users/...`. All require a session.
pub struct Users<'c> {
    client: &'c ApiClient,
}

impl<'c> Users<'c> {
    pub const fn new(client: &'c ApiClient) -> Self {
        Self { client }
    }

    /// `GET /users/`
    pub async fn list(&self, params: &QueryParams) -> Result<ListResponse<User>, Error> {
        self.client.list(KIND, params).await
    }

    /// `GET /users/{id}/`
    pub async fn get(&self, id: i64) -> Result<User, Error> {
        self.client.get(KIND, id).await
    }

    /// The session user. Doubles as the authentication check.
    ///
    /// `GET /users/me/`
    pub async fn current_user(&self) -> Result<User, Error> {
        self.client
            .get_json(&KIND.action_path("me"), &QueryParams::new())
            .await
    }
}

impl ApiClient {
    pub const fn users(&self) -> Users<'_> {
        Users::new(self)
    }
}
