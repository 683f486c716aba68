//! Generic request builder, executor and response parser shared by every
//! resource service.
//!
//! # Design
//! A resource kind is a zero-sized type implementing `Resource`: it names
//! its entity type and its update verb. `ResourceClient<R>` turns one of the
//! four verbs into one `HttpRequest`, hands it to the connection's transport
//! and parses the `HttpResponse` into `R::Entity`. The `build_request` and
//! `parse_*` halves are pure, so the I/O boundary stays explicit.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::connection::Connection;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::validation::is_dot_segment;

/// Per-resource configuration for `ResourceClient`.
pub trait Resource {
    /// Record type returned by add, update, get and query.
    type Entity: Serialize + DeserializeOwned + Send + Sync;

    /// Used in log events.
    const NAME: &'static str;

    /// Verb used by `update` and `update_discarding`. Resources disagree on
    /// PUT versus PATCH, so each declares its own.
    const UPDATE_METHOD: HttpMethod;
}

/// Ordered path segments below the base server URI.
///
/// Segments are percent-encoded individually when resolved, so an
/// identifier containing `/` or spaces stays a single segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segment(mut self, segment: impl ToString) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    /// Join onto `base`, replacing a trailing empty segment. The query and
    /// fragment of `base` are dropped.
    ///
    /// # Errors
    /// `InvalidArgument` when a segment is `.` or `..`: the URL would
    /// silently lose it and address a different resource.
    pub fn resolve(&self, base: &reqwest::Url) -> Result<reqwest::Url, ApiError> {
        if self.segments.iter().any(|s| is_dot_segment(s)) {
            return Err(ApiError::InvalidArgument {
                name: "path segment",
                reason: "cannot be `.` or `..`",
            });
        }
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidConfig(format!("server URI {base} cannot be a base")))?
            .pop_if_empty()
            .extend(&self.segments);
        Ok(url)
    }
}

/// Four-verb client for one resource kind.
pub struct ResourceClient<R: Resource> {
    connection: Connection,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self::new(self.connection.clone())
    }
}

impl<R: Resource> std::fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &R::NAME)
            .field("connection", &self.connection)
            .finish()
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(connection: Connection) -> Self {
        Self {
            connection,
            _resource: PhantomData,
        }
    }

    /// POST `entity` and return the server's representation of it.
    pub async fn add<B>(&self, path: &ResourcePath, entity: &B) -> Result<R::Entity, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(HttpMethod::Post, path, Some(entity)).await?;
        parse_entity(response)
    }

    /// Send `body` with `R::UPDATE_METHOD` and return the updated entity.
    pub async fn update<B>(&self, path: &ResourcePath, body: &B) -> Result<R::Entity, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(R::UPDATE_METHOD, path, Some(body)).await?;
        parse_entity(response)
    }

    /// Send `body` with `R::UPDATE_METHOD`, ignoring the response body.
    pub async fn update_discarding<B>(&self, path: &ResourcePath, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(R::UPDATE_METHOD, path, Some(body)).await?;
        parse_empty(response)
    }

    /// PUT `body` regardless of `R::UPDATE_METHOD`.
    pub async fn replace<B>(&self, path: &ResourcePath, body: &B) -> Result<R::Entity, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.send(HttpMethod::Put, path, Some(body)).await?;
        parse_entity(response)
    }

    pub async fn remove(&self, path: &ResourcePath) -> Result<(), ApiError> {
        let response = self.send::<()>(HttpMethod::Delete, path, None).await?;
        parse_empty(response)
    }

    pub async fn get(&self, path: &ResourcePath) -> Result<R::Entity, ApiError> {
        let response = self.send::<()>(HttpMethod::Get, path, None).await?;
        parse_entity(response)
    }

    /// GET the whole collection at `path`. There is no paging.
    pub async fn query(&self, path: &ResourcePath) -> Result<Vec<R::Entity>, ApiError> {
        let response = self.send::<()>(HttpMethod::Get, path, None).await?;
        parse_entity(response)
    }

    async fn send<B>(
        &self,
        method: HttpMethod,
        path: &ResourcePath,
        body: Option<&B>,
    ) -> Result<HttpResponse, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = path.resolve(self.connection.server_uri())?;
        let request = build_request(method, url, body)?;
        debug!(resource = R::NAME, %method, url = %request.url, "sending request");

        match self.connection.transport().execute(request).await {
            Ok(response) => {
                debug!(resource = R::NAME, %method, status = response.status, "received response");
                Ok(response)
            }
            Err(err) => {
                warn!(resource = R::NAME, %method, error = %err, "transport failed");
                Err(err.into())
            }
        }
    }
}

/// Build a request for `url`, serializing `body` as JSON when present.
pub fn build_request<B>(
    method: HttpMethod,
    url: reqwest::Url,
    body: Option<&B>,
) -> Result<HttpRequest, ApiError>
where
    B: Serialize + ?Sized,
{
    let (headers, body) = match body {
        Some(body) => {
            let json = serde_json::to_string(body)
                .map_err(|e| ApiError::SerializationError(e.to_string()))?;
            (
                vec![("content-type".to_string(), "application/json".to_string())],
                Some(json),
            )
        }
        None => (Vec::new(), None),
    };
    Ok(HttpRequest {
        method,
        url: url.into(),
        headers,
        body,
    })
}

/// Check the status and deserialize the body.
pub fn parse_entity<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Check the status; the body is ignored.
pub fn parse_empty(response: HttpResponse) -> Result<(), ApiError> {
    check_status(&response)
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
