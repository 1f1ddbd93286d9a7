// ── Mutation actions ──
//
// Each mutation clears the kind's error, calls the server, and patches the
// cache from the response. Failures are recorded and returned. Mutations
// leave the loading flag alone.

use tracing::debug;

use super::{Store, record};
use crate::error::CoreError;
use crate::model::{Category, CategoryPatch, NewCategory, NewPost, Post, PostPatch};

impl Store {
    // ── Categories ───────────────────────────────────────────────────

    /// Create a category and append it to the cached list.
    pub async fn create_category(&self, data: &NewCategory) -> Result<Category, CoreError> {
        self.categories.clear_error();
        let created = record(
            &self.categories,
            self.client.categories().create(data).await,
        )?;
        debug!(id = created.id, name = %created.name, "category created");
        self.categories.append(created.clone());
        Ok(created)
    }

    /// Replace a category. A category missing from the cache is not added.
    pub async fn update_category(
        &self,
        id: i64,
        data: &NewCategory,
    ) -> Result<Category, CoreError> {
        self.categories.clear_error();
        let updated = record(
            &self.categories,
            self.client.categories().update(id, data).await,
        )?;
        if !self.categories.replace_by_id(id, updated.clone()) {
            debug!(id, "updated category not cached");
        }
        Ok(updated)
    }

    /// Update selected category fields. Cache handling matches
    /// [`update_category`](Self::update_category).
    pub async fn patch_category(
        &self,
        id: i64,
        data: &CategoryPatch,
    ) -> Result<Category, CoreError> {
        self.categories.clear_error();
        let updated = record(
            &self.categories,
            self.client.categories().partial_update(id, data).await,
        )?;
        self.categories.replace_by_id(id, updated.clone());
        Ok(updated)
    }

    /// Delete a category and drop every cached entry with its id.
    pub async fn delete_category(&self, id: i64) -> Result<(), CoreError> {
        self.categories.clear_error();
        record(&self.categories, self.client.categories().delete(id).await)?;
        let removed = self.categories.remove_by_id(id);
        debug!(id, removed, "category deleted");
        Ok(())
    }

    // ── Posts ────────────────────────────────────────────────────────

    /// Create a post and put it at the front of the cached list.
    pub async fn create_post(&self, data: &NewPost) -> Result<Post, CoreError> {
        self.posts.clear_error();
        let created = record(&self.posts, self.client.posts().create(data).await)?;
        debug!(id = created.id, title = %created.title, "post created");
        self.posts.prepend(created.clone());
        Ok(created)
    }

    /// Replace a post. A post missing from the cache is not added.
    pub async fn update_post(&self, id: i64, data: &NewPost) -> Result<Post, CoreError> {
        self.posts.clear_error();
        let updated = record(&self.posts, self.client.posts().update(id, data).await)?;
        if !self.posts.replace_by_id(id, updated.clone()) {
            debug!(id, "updated post not cached");
        }
        Ok(updated)
    }

    /// Update selected post fields.
    pub async fn patch_post(&self, id: i64, data: &PostPatch) -> Result<Post, CoreError> {
        self.posts.clear_error();
        let updated = record(
            &self.posts,
            self.client.posts().partial_update(id, data).await,
        )?;
        self.posts.replace_by_id(id, updated.clone());
        Ok(updated)
    }

    /// Delete a post and drop every cached entry with its id.
    pub async fn delete_post(&self, id: i64) -> Result<(), CoreError> {
        self.posts.clear_error();
        record(&self.posts, self.client.posts().delete(id).await)?;
        let removed = self.posts.remove_by_id(id);
        debug!(id, removed, "post deleted");
        Ok(())
    }
}
