// inkwell-api: async Rust client for the blog REST API (categories, posts, users)

pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod models;
pub mod request;
pub mod resources;
pub mod session;
pub mod transport;

pub use client::{ApiClient, CSRF_COOKIE, CSRF_HEADER, SESSION_COOKIE};
pub use endpoints::{Endpoints, Environment};
pub use envelope::{ListResponse, Page, Payload};
pub use error::Error;
pub use models::{Category, CategoryPatch, NewCategory, NewPost, Post, PostPatch, User};
pub use request::{QueryParams, ResourceKind};
pub use resources::{Categories, PostQuery, Posts, Users};
pub use transport::TransportConfig;

pub use reqwest::Method;
