// Typed resource handles.
//
// Each handle borrows the client and exposes the endpoints of one
// collection; the generic kind-keyed operations on `ApiClient` do the work.

pub mod categories;
pub mod posts;
pub mod users;

pub use categories::Categories;
pub use posts::{PostQuery, Posts};
pub use users::Users;
