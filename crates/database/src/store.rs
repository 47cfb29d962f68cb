use crate::error::StoreError;
use async_trait::async_trait;
use core_types::{NewSchool, School};

/// The generic, abstract interface to the persistence service.
/// Handlers depend on this trait only, so the backend (REST, PostgreSQL or a
/// test double) can be swapped without touching them.
#[async_trait]
pub trait SchoolStore: Send + Sync {
    /// Inserts one row and returns it as stored, including its assigned id.
    async fn insert(&self, school: &NewSchool) -> Result<School, StoreError>;

    /// Returns every stored row, in whatever order the service yields them.
    async fn list_all(&self) -> Result<Vec<School>, StoreError>;
}
