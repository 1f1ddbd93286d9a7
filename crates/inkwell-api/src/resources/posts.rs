use tracing::debug;

use crate::client::ApiClient;
use crate::envelope::ListResponse;
use crate::error::Error;
use crate::models::{NewPost, Post, PostPatch};
use crate::request::{QueryParams, ResourceKind};

const KIND: ResourceKind = ResourceKind::Posts;

/// Server-side filters accepted by `GET /posts/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostQuery {
    /// Only posts in this category.
    pub category: Option<i64>,
    /// Only published (`true`) or draft (`false`) posts.
    pub published: Option<bool>,
    /// Page number when the backend paginates.
    pub page: Option<u32>,
}

impl PostQuery {
    pub fn in_category(mut self, category: i64) -> Self {
        self.category = Some(category);
        self
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(category) = self.category {
            params.push("category", category);
        }
        if let Some(published) = self.published {
            params.push("published", published);
        }
        if let Some(page) = self.page {
            params.push("page", page);
        }
        params
    }
}

/// Post endpoints: `/posts/...`
pub struct Posts<'c> {
    client: &'c ApiClient,
}

impl<'c> Posts<'c> {
    pub const fn new(client: &'c ApiClient) -> Self {
        Self { client }
    }

    /// `GET /posts/?category=..&published=..`
    pub async fn list(&self, query: &PostQuery) -> Result<ListResponse<Post>, Error> {
        debug!(?query, "listing posts");
        self.client.list(KIND, &query.to_params()).await
    }

    /// `GET /posts/{id}/`
    pub async fn get(&self, id: i64) -> Result<Post, Error> {
        self.client.get(KIND, id).await
    }

    /// `POST /posts/`. The backend assigns the author from the session.
    pub async fn create(&self, body: &NewPost) -> Result<Post, Error> {
        debug!(title = %body.title, category_id = body.category_id, "creating post");
        self.client.create(KIND, body).await
    }

    /// `PUT /posts/{id}/`
    pub async fn update(&self, id: i64, body: &NewPost) -> Result<Post, Error> {
        debug!(id, "replacing post");
        self.client.update(KIND, id, body).await
    }

    /// `PATCH /posts/{id}/`
    pub async fn partial_update(&self, id: i64, body: &PostPatch) -> Result<Post, Error> {
        debug!(id, "patching post");
        self.client.partial_update(KIND, id, body).await
    }

    /// `DELETE /posts/{id}/`
    pub async fn delete(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting post");
        self.client.delete(KIND, id).await
    }

    /// Posts authored by the session user.
    ///
    /// `GET /posts/my_posts/` (401 with `detail` when anonymous)
    pub async fn my_items(&self) -> Result<ListResponse<Post>, Error> {
        self.client
            .get_json(&KIND.action_path("my_posts"), &QueryParams::new())
            .await
    }
}

impl ApiClient {
    pub const fn posts(&self) -> Posts<'_> {
        Posts::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_has_no_params() {
        assert!(PostQuery::default().to_params().is_empty());
    }

    #[test]
    fn query_params_in_declared_order() {
        let params = PostQuery::default()
            .published(false)
            .in_category(3)
            .to_params();
        assert_eq!(
            params.as_slice(),
            &[
                ("category".to_owned(), "3".to_owned()),
                ("published".to_owned(), "false".to_owned()),
            ]
        );
    }
}
