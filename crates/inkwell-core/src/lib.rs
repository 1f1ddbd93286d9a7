// inkwell-core: reactive local mirror of the blog backend
//
// Wraps `inkwell-api` in a `Store` that caches categories, posts, and the
// signed-in user, tracks per-kind loading and error state, and publishes
// every change through `watch` channels.

pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod stream;

pub use config::{Credentials, StoreConfig};
pub use error::CoreError;
pub use model::{
    Category, CategoryPatch, CategoryWithCount, Identified, NewCategory, NewPost, Post, PostPatch,
    User,
};
pub use store::{ResourceState, Store};
pub use stream::ResourceStream;

pub use inkwell_api::{ApiClient, Endpoints, Environment, PostQuery};
