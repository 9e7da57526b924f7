//! Fake Kibana clients.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use reqwest::StatusCode;
use spacecopy_client::{ClientError, ClientResult, CopySavedObjectsParams, SpacesApi};

/// One copy call observed by [`RecordingSpacesApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCopy {
    /// Request body that would have been sent.
    pub params: CopySavedObjectsParams,
    /// Source space the call was scoped to.
    pub source_space: String,
}

#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<RecordedCopy>,
    failure: Option<(StatusCode, String)>,
}

/// In-memory [`SpacesApi`] that records every call.
///
/// Clones share the same recording, so a test can keep one handle while the
/// code under test owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpacesApi {
    inner: Arc<Mutex<Recorder>>,
}

impl RecordingSpacesApi {
    /// Fake that accepts every call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent calls fail with `status` and `body`.
    ///
    /// Unknown status codes fall back to `500`.
    pub fn fail_with(&self, status: u16, body: impl Into<String>) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.lock().failure = Some((status, body.into()));
    }

    /// Make subsequent calls succeed again.
    pub fn recover(&self) {
        self.lock().failure = None;
    }

    /// Calls observed so far, failed ones included.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCopy> {
        self.lock().calls.clone()
    }

    /// Number of calls observed so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> MutexGuard<'_, Recorder> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SpacesApi for RecordingSpacesApi {
    async fn copy_saved_objects(
        &self,
        params: &CopySavedObjectsParams,
        source_space: &str,
    ) -> ClientResult<()> {
        let mut recorder = self.lock();
        recorder.calls.push(RecordedCopy {
            params: params.clone(),
            source_space: source_space.to_string(),
        });
        match &recorder.failure {
            Some((status, body)) => Err(ClientError::Api {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}
