use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::auth::session::Session;
use crate::error::{ClientError, ClientResult};
use crate::http::{ApiRequest, ApiResponse, Method, MultipartForm, RequestBody, Transport};
use crate::models::Wrapped;

/// Handle used by every API call: a transport plus the explicit session.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            session: None,
        }
    }

    /// Same transport, different session.
    pub fn with_session(&self, session: Session) -> Self {
        Self {
            transport: self.transport.clone(),
            session: Some(session),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Session that must be present for protected screens.
    pub fn require_session(&self) -> ClientResult<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| ClientError::Unauthorized("Not logged in".to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.get_with(path, Vec::new()).await
    }

    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> ClientResult<T> {
        let mut request = ApiRequest::new(Method::Get, path);
        request.query = query;
        self.execute(request).await
    }

    /// GET for a resource that may not exist yet: `null`, `{}` and an empty
    /// body all mean `None`.
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Option<T>> {
        let value: Value = self.get(path).await?;
        match value {
            Value::Null => Ok(None),
            Value::Object(ref fields) if fields.is_empty() => Ok(None),
            found => Ok(Some(serde_json::from_value(found)?)),
        }
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(Method::Post, path, body).await
    }

    /// POST without a body, used by action endpoints (`/approve`, `/cancel`).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(ApiRequest::new(Method::Post, path)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(Method::Put, path, body).await
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(Method::Patch, path, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(ApiRequest::new(Method::Delete, path)).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: MultipartForm,
    ) -> ClientResult<T> {
        let mut request = ApiRequest::new(Method::Post, path);
        request.body = RequestBody::Multipart(form);
        self.execute(request).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut request = ApiRequest::new(method, path);
        request.body = RequestBody::Json(serde_json::to_value(body)?);
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(&self, mut request: ApiRequest) -> ClientResult<T> {
        request.bearer = self.session.as_ref().map(|s| s.token().to_string());
        let method = request.method;
        let path = request.path.clone();

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            let err = ClientError::from_response(response.status, &response.body);
            error!(error = %err, %method, path = %path, "API call failed");
            return Err(err);
        }
        debug!(%method, path = %path, status = response.status, "API call succeeded");

        decode(&response)
    }
}

/// Decode a success body, accepting both `{"data": ...}` and bare payloads.
/// Empty bodies (204) decode as an empty object.
pub fn decode<T: DeserializeOwned>(response: &ApiResponse) -> ClientResult<T> {
    let value: Value = if response.body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(&response.body)?
    };
    let wrapped: Wrapped<T> = serde_json::from_value(value)?;
    Ok(wrapped.into_inner())
}
