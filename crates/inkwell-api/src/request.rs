use std::fmt;

/// The three REST resource collections the backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    Categories,
    Posts,
    Users,
}

impl ResourceKind {
    /// Collection path relative to the API base: `categories/`.
    pub fn collection_path(self) -> String {
        format!("{self}/")
    }

    /// Single-item path relative to the API base: `categories/{id}/`.
    pub fn item_path(self, id: i64) -> String {
        format!("{self}/{id}/")
    }

    /// Path of a collection-level extra action: `posts/my_posts/`.
    pub fn action_path(self, action: &str) -> String {
        format!("{self}/{action}/")
    }

    /// Path of an item-level extra action: `categories/{id}/posts/`.
    pub fn item_action_path(self, id: i64, action: &str) -> String {
        format!("{self}/{id}/{action}/")
    }
}

/// Flat query-string parameters. Keys and values are plain strings;
/// nested structures are not representable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter, coercing the value to its string form.
    pub fn push(&mut self, key: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.push(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.push(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn paths_follow_router_layout() {
        assert_eq!(ResourceKind::Categories.collection_path(), "categories/");
        assert_eq!(ResourceKind::Posts.item_path(4), "posts/4/");
        assert_eq!(ResourceKind::Posts.action_path("my_posts"), "posts/my_posts/");
        assert_eq!(ResourceKind::Users.action_path("me"), "users/me/");
        assert_eq!(
            ResourceKind::Categories.item_action_path(2, "posts"),
            "categories/2/posts/"
        );
        assert_eq!(ResourceKind::iter().count(), 3);
    }

    #[test]
    fn params_coerce_values_to_strings() {
        let params = QueryParams::new().with("published", true).with("page", 2);
        assert_eq!(
            params.as_slice(),
            &[
                ("published".to_owned(), "true".to_owned()),
                ("page".to_owned(), "2".to_owned())
            ]
        );

        let collected: QueryParams = [("category", 3)].into_iter().collect();
        assert!(!collected.is_empty());
    }
}
