// ── Fetch actions ──
//
// List fetches never fail outward: the error lands on the collection and
// a warning is logged. Single-item fetches record and also return it.

use std::sync::Arc;

use tracing::{debug, warn};

use inkwell_api::{PostQuery, QueryParams};

use super::Store;
use crate::error::CoreError;
use crate::model::{Category, Post};

impl Store {
    /// Replace the cached category list with the server's.
    pub async fn fetch_categories(&self) {
        let guard = self.categories.begin_load();
        match self.client.categories().list(&QueryParams::new()).await {
            Ok(list) => {
                let items = list.into_items();
                debug!(count = items.len(), "categories loaded");
                guard.succeed(|s| s.items = Arc::new(items));
            }
            Err(e) => {
                let err = CoreError::from(e);
                warn!(error = %err, "failed to fetch categories");
                guard.fail(err.to_string());
            }
        }
    }

    /// Load one category into `current`.
    pub async fn fetch_category(&self, id: i64) -> Result<Category, CoreError> {
        let guard = self.categories.begin_load();
        match self.client.categories().get(id).await {
            Ok(category) => {
                guard.succeed(|s| s.current = Some(category.clone()));
                Ok(category)
            }
            Err(e) => {
                let err = CoreError::from(e);
                guard.fail(err.to_string());
                Err(err)
            }
        }
    }

    /// Replace the cached post list with the server's, optionally filtered.
    ///
    /// Overlapping calls are not cancelled or sequenced: whichever
    /// response arrives last wins.
    pub async fn fetch_posts(&self, query: &PostQuery) {
        let guard = self.posts.begin_load();
        match self.client.posts().list(query).await {
            Ok(list) => {
                let items = list.into_items();
                debug!(count = items.len(), ?query, "posts loaded");
                guard.succeed(|s| s.items = Arc::new(items));
            }
            Err(e) => {
                let err = CoreError::from(e);
                warn!(error = %err, "failed to fetch posts");
                guard.fail(err.to_string());
            }
        }
    }

    /// Load one post into `current`.
    pub async fn fetch_post(&self, id: i64) -> Result<Post, CoreError> {
        let guard = self.posts.begin_load();
        match self.client.posts().get(id).await {
            Ok(post) => {
                guard.succeed(|s| s.current = Some(post.clone()));
                Ok(post)
            }
            Err(e) => {
                let err = CoreError::from(e);
                guard.fail(err.to_string());
                Err(err)
            }
        }
    }

    /// Load the signed-in user. Success marks the session authenticated;
    /// any failure clears the user and marks it unauthenticated.
    pub async fn fetch_current_user(&self) {
        let guard = self.user.begin_load();
        match self.client.users().current_user().await {
            Ok(user) => {
                debug!(username = %user.username, "current user loaded");
                guard.succeed(|s| s.current = Some(user));
                self.set_authenticated(true);
            }
            Err(e) => {
                let err = CoreError::from(e);
                warn!(error = %err, "failed to fetch current user");
                guard.fail(err.to_string());
                self.user.set_current(None);
                self.set_authenticated(false);
            }
        }
    }

    /// Posts authored by the signed-in user. Leaves the cache untouched.
    pub async fn fetch_my_posts(&self) -> Result<Vec<Post>, CoreError> {
        let list = self.client.posts().my_items().await?;
        Ok(list.into_items())
    }

    /// Posts in one category, straight from the server. Leaves the cache
    /// untouched.
    pub async fn fetch_category_posts(&self, id: i64) -> Result<Vec<Post>, CoreError> {
        let list = self.client.categories().posts(id).await?;
        Ok(list.into_items())
    }

    /// Fetch categories, posts, and the current user concurrently.
    pub async fn load_all(&self) {
        let query = PostQuery::default();
        tokio::join!(
            self.fetch_categories(),
            self.fetch_posts(&query),
            self.fetch_current_user(),
        );
    }
}
