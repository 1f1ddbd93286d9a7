// ── Synchronized state store ──
//
// Mirrors the backend's categories, posts, and signed-in user into local
// reactive state. Actions live in `fetch`, `mutate`, and `auth`; derived
// read-only views in `views`.

mod auth;
mod collection;
mod fetch;
mod mutate;
mod views;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use inkwell_api::ApiClient;

use crate::config::StoreConfig;
use crate::error::CoreError;
use crate::model::{Category, Post, User};
use crate::stream::ResourceStream;

pub use collection::ResourceState;

use collection::ResourceCollection;

/// Local mirror of the backend, one reactive collection per resource kind.
///
/// All actions take `&self`; wrap the store in an `Arc` to share it.
pub struct Store {
    client: Arc<ApiClient>,
    categories: ResourceCollection<Category>,
    posts: ResourceCollection<Post>,
    user: ResourceCollection<User>,
    authenticated: watch::Sender<bool>,
}

impl Store {
    /// Create an empty store driving `client`.
    pub fn new(client: Arc<ApiClient>) -> Self {
        let (authenticated, _) = watch::channel(false);
        Self {
            client,
            categories: ResourceCollection::new(),
            posts: ResourceCollection::new(),
            user: ResourceCollection::new(),
            authenticated,
        }
    }

    /// Build the client from `config` and, when credentials are present,
    /// establish a session before returning.
    pub async fn connect(config: &StoreConfig) -> Result<Self, CoreError> {
        let endpoints = config.endpoints()?;
        debug!(api = %endpoints.api_base(), auth = %endpoints.auth_base(), "connecting");
        let client = ApiClient::new(endpoints, &config.transport())?;
        let store = Self::new(Arc::new(client));

        if let Some(ref creds) = config.credentials {
            store.login(&creds.username, &creds.password).await?;
        }
        Ok(store)
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // ── Snapshots ────────────────────────────────────────────────────

    pub fn categories(&self) -> ResourceState<Category> {
        self.categories.snapshot()
    }

    pub fn posts(&self) -> ResourceState<Post> {
        self.posts.snapshot()
    }

    pub fn user(&self) -> ResourceState<User> {
        self.user.snapshot()
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.current()
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.borrow()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_categories(&self) -> ResourceStream<Category> {
        ResourceStream::new(self.categories.subscribe())
    }

    pub fn subscribe_posts(&self) -> ResourceStream<Post> {
        ResourceStream::new(self.posts.subscribe())
    }

    pub fn subscribe_user(&self) -> ResourceStream<User> {
        ResourceStream::new(self.user.subscribe())
    }

    pub fn subscribe_authenticated(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    // ── Clearing ─────────────────────────────────────────────────────

    pub fn clear_categories(&self) {
        self.categories.clear();
    }

    pub fn clear_posts(&self) {
        self.posts.clear();
    }

    /// Forget the signed-in user and mark the session unauthenticated.
    pub fn clear_user(&self) {
        self.user.clear();
        self.set_authenticated(false);
    }

    pub fn clear_all(&self) {
        self.clear_categories();
        self.clear_posts();
        self.clear_user();
    }

    fn set_authenticated(&self, value: bool) {
        self.authenticated.send_if_modified(|current| {
            let changed = *current != value;
            *current = value;
            changed
        });
    }
}

/// Convert an API failure, recording its message on `collection`.
fn record<T, U>(
    collection: &ResourceCollection<T>,
    result: Result<U, inkwell_api::Error>,
) -> Result<U, CoreError>
where
    T: Clone + Send + Sync + 'static,
{
    result.map_err(|e| {
        let err = CoreError::from(e);
        collection.set_error(err.to_string());
        err
    })
}
