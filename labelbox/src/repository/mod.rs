//! Repository contract for group-scoped persistence
//!
//! - [`GroupScopedRepository`]: CRUD over entities owned by a tenant group
//! - [`Identified`]: update payloads whose id is stamped by the server
//! - [`RepositoryError`]: structured failures with a tagged `NotFound` kind

mod error;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use traits::{GroupScopedRepository, Identified, RepositoryResult};
