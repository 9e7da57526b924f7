//! reqwest-backed implementation of [`SpacesApi`].

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use spacecopy_config::{ClientSettings, Credentials};
use tracing::debug;

use crate::api::SpacesApi;
use crate::error::{ClientError, ClientResult};
use crate::model::CopySavedObjectsParams;

/// Header Kibana requires on every mutating request.
pub const HEADER_KBN_XSRF: &str = "kbn-xsrf";
/// Correlation header attached when a request id is supplied.
pub const HEADER_REQUEST_ID: &str = "x-request-id";

const COPY_SAVED_OBJECTS_PATH: &str = "api/spaces/_copy_saved_objects";
const DEFAULT_SPACE: &str = "default";

/// Kibana HTTP client.
#[derive(Clone)]
pub struct KibanaClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl KibanaClient {
    /// Build a client from validated connection settings.
    ///
    /// `request_id`, when present, is sent as `x-request-id` on every call.
    ///
    /// # Errors
    ///
    /// Returns an error when the request id is not a valid header value or
    /// the underlying HTTP client cannot be constructed.
    pub fn new(settings: &ClientSettings, request_id: Option<&str>) -> ClientResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            HeaderName::from_static(HEADER_KBN_XSRF),
            HeaderValue::from_static("true"),
        );
        if let Some(request_id) = request_id {
            let value =
                HeaderValue::from_str(request_id).map_err(|_| ClientError::InvalidHeader {
                    name: HEADER_REQUEST_ID,
                })?;
            default_headers.insert(HeaderName::from_static(HEADER_REQUEST_ID), value);
        }

        let client = Client::builder()
            .timeout(settings.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|source| ClientError::Build { source })?;

        Ok(Self {
            client,
            base_url: with_trailing_slash(settings.base_url.clone()),
            credentials: settings.credentials.clone(),
        })
    }

    /// Base URL every API path is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|source| ClientError::InvalidBaseUrl {
                path: path.to_string(),
                source,
            })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Credentials::Anonymous => request,
            Credentials::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
            Credentials::ApiKey(key) => request.header(AUTHORIZATION, format!("ApiKey {key}")),
        }
    }
}

#[async_trait]
impl SpacesApi for KibanaClient {
    async fn copy_saved_objects(
        &self,
        params: &CopySavedObjectsParams,
        source_space: &str,
    ) -> ClientResult<()> {
        let url = self.endpoint(&copy_path(source_space))?;
        debug!(%url, source_space, spaces = ?params.spaces, "copying saved objects");

        let response = self
            .authorize(self.client.post(url))
            .json(params)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                operation: "copy_saved_objects",
                source,
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status.as_u16() >= 300 {
            return Err(ClientError::Api { status, body });
        }

        debug!(%status, body = %body, "copy saved objects response");
        Ok(())
    }
}

/// API path for copying out of `source_space`; the default space has no prefix.
fn copy_path(source_space: &str) -> String {
    if source_space.is_empty() || source_space == DEFAULT_SPACE {
        COPY_SAVED_OBJECTS_PATH.to_string()
    } else {
        format!("s/{source_space}/{COPY_SAVED_OBJECTS_PATH}")
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
