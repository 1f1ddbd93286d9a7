// ── Derived views ──
//
// Pure functions of the cached lists, recomputed on each call.

use super::Store;
use crate::model::{CategoryWithCount, Post};

impl Store {
    /// Cached posts whose category id matches, in cache order.
    pub fn posts_by_category(&self, category_id: i64) -> Vec<Post> {
        self.posts
            .items()
            .iter()
            .filter(|p| p.category.id == category_id)
            .cloned()
            .collect()
    }

    /// Cached posts with the published flag set, in cache order.
    pub fn published_posts(&self) -> Vec<Post> {
        self.posts
            .items()
            .iter()
            .filter(|p| p.published)
            .cloned()
            .collect()
    }

    /// Every cached category with the number of cached posts in it.
    pub fn categories_with_counts(&self) -> Vec<CategoryWithCount> {
        let posts = self.posts.items();
        self.categories
            .items()
            .iter()
            .map(|category| CategoryWithCount {
                category: category.clone(),
                post_count: posts
                    .iter()
                    .filter(|p| p.category.id == category.id)
                    .count(),
            })
            .collect()
    }
}
