use tracing::debug;

use crate::client::ApiClient;
use crate::envelope::ListResponse;
use crate::error::Error;
use crate::models::{Category, CategoryPatch, NewCategory, Post};
use crate::request::{QueryParams, ResourceKind};

const KIND: ResourceKind = ResourceKind::Categories;

/// Category endpoints: `/categories/...`
pub struct Categories<'c> {
    client: &'c ApiClient,
}

impl<'c> Categories<'c> {
    pub const fn new(client: &'c ApiClient) -> Self {
        Self { client }
    }

    /// `GET /categories/`
    pub async fn list(&self, params: &QueryParams) -> Result<ListResponse<Category>, Error> {
        debug!("listing categories");
        self.client.list(KIND, params).await
    }

    /// `GET /categories/{id}/`
    pub async fn get(&self, id: i64) -> Result<Category, Error> {
        self.client.get(KIND, id).await
    }

    /// `POST /categories/`
    pub async fn create(&self, body: &NewCategory) -> Result<Category, Error> {
        debug!(name = %body.name, "creating category");
        self.client.create(KIND, body).await
    }

    /// `PUT /categories/{id}/`
    pub async fn update(&self, id: i64, body: &NewCategory) -> Result<Category, Error> {
        debug!(id, "replacing category");
        self.client.update(KIND, id, body).await
    }

    /// `PATCH /categories/{id}/`
    pub async fn partial_update(&self, id: i64, body: &CategoryPatch) -> Result<Category, Error> {
        debug!(id, "patching category");
        self.client.partial_update(KIND, id, body).await
    }

    /// `DELETE /categories/{id}/`
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting category");
        self.client.delete(KIND, id).await
    }

    /// All posts in one category.
    ///
    /// `GET /categories/{id}/posts/` (never paginated, but tolerated)
    pub async fn posts(&self, id: i64) -> Result<ListResponse<Post>, Error> {
        self.client
            .get_json(&KIND.item_action_path(id, "posts"), &QueryParams::new())
            .await
    }
}

impl ApiClient {
    pub const fn categories(&self) -> Categories<'_> {
        Categories::new(self)
    }
}
