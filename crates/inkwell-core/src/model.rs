// ── Domain model ──
//
// Resource records are the wire types from `inkwell-api`; the core crate
// only adds identity lookup and the derived view types.

use serde::Serialize;

pub use inkwell_api::{Category, CategoryPatch, NewCategory, NewPost, Post, PostPatch, User};

/// Anything the store can find by server-assigned id.
pub trait Identified {
    fn id(&self) -> i64;
}

impl Identified for Category {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Post {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for User {
    fn id(&self) -> i64 {
        self.id
    }
}

/// A category paired with the number of cached posts that reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub post_count: usize,
}
