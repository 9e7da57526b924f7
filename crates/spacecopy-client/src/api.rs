//! Seam between the copy adapter and the Kibana spaces API.

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::model::CopySavedObjectsParams;

/// Operations the copy adapter needs from Kibana.
#[async_trait]
pub trait SpacesApi: Send + Sync {
    /// Copy saved objects out of `source_space` into the spaces named in `params`.
    ///
    /// # Errors
    ///
    /// Returns the transport or API failure as reported by the backend.
    async fn copy_saved_objects(
        &self,
        params: &CopySavedObjectsParams,
        source_space: &str,
    ) -> ClientResult<()>;
}
