//! Repository trait definitions
//!
//! Traits use RPITIT (Return Position Impl Trait In Traits) so implementations
//! can be written with plain `async fn` and no `async_trait` boxing.

use std::future::Future;

use super::error::RepositoryError;
use crate::ids::GroupId;

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// CRUD access to entities that live inside a tenant group
///
/// Every method takes the [`GroupId`] explicitly. Implementations must treat an
/// entity that exists under a different group exactly like one that does not
/// exist at all, returning [`RepositoryErrorKind::NotFound`].
///
/// Implementations are shared across concurrent requests behind an `Arc` and
/// own whatever synchronization their storage needs.
///
/// [`RepositoryErrorKind::NotFound`]: super::RepositoryErrorKind::NotFound
///
/// # Example
///
/// ```rust,ignore
/// impl GroupScopedRepository for LabelStore {
///     type Id = LabelId;
///     type Summary = LabelSummary;
///     type Detail = LabelOut;
///     type Create = LabelCreate;
///     type Update = LabelUpdate;
///
///     const ENTITY: &'static str = "Label";
///
///     async fn get_all(&self, group: GroupId) -> RepositoryResult<Vec<LabelSummary>> {
///         // ...
///     }
///     // ... other methods
/// }
/// ```
pub trait GroupScopedRepository: Send + Sync + 'static {
    /// Identifier type carried in URL paths
    type Id: Send + Sync;
    /// Representation returned by list and create
    type Summary: Send;
    /// Representation returned by get and update
    type Detail: Send;
    /// Create payload
    type Create: Send;
    /// Update payload; its identifier is set by the caller before the call
    type Update: Identified<Self::Id> + Send;

    /// Entity name used in errors and logs
    const ENTITY: &'static str;

    /// List every entity in the group
    fn get_all(
        &self,
        group: GroupId,
    ) -> impl Future<Output = RepositoryResult<Vec<Self::Summary>>> + Send;

    /// Create an entity in the group
    fn create(
        &self,
        group: GroupId,
        data: Self::Create,
    ) -> impl Future<Output = RepositoryResult<Self::Summary>> + Send;

    /// Fetch one entity, failing with `NotFound` if it is not in the group
    fn get_one_by_group(
        &self,
        group: GroupId,
        id: Self::Id,
    ) -> impl Future<Output = RepositoryResult<Self::Detail>> + Send;

    /// Hard delete one entity, failing with `NotFound` if it is not in the group
    fn delete_by_group(
        &self,
        group: GroupId,
        id: Self::Id,
    ) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// Apply an update payload to the entity it identifies within the group
    fn update_by_group(
        &self,
        group: GroupId,
        data: Self::Update,
    ) -> impl Future<Output = RepositoryResult<Self::Detail>> + Send;
}

/// Payloads whose identifier is assigned by the server
///
/// The HTTP dispatcher calls [`set_id`](Identified::set_id) with the path
/// identifier, replacing whatever the body carried.
pub trait Identified<Id> {
    /// Overwrite the payload's identifier
    fn set_id(&mut self, id: Id);

    /// The identifier currently set, if any
    fn id(&self) -> Option<&Id>;
}
