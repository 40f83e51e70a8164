use async_trait::async_trait;

use super::domain::User;
use crate::errors::ServiceError;

/// Record store accessor for the `users` table.
///
/// Implementations own the read/write path to the backing store and must be
/// safe to share across concurrent requests.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Write the full record, overwriting any record with the same id.
    async fn put(&self, user: User) -> Result<(), ServiceError>;

    /// `Ok(None)` when no record exists for `id`.
    async fn get(&self, id: &str) -> Result<Option<User>, ServiceError>;
}
