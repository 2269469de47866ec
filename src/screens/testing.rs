//! Scripted transport for screen flows.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Notify;

use crate::auth::session::test_session;
use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::http::{ApiRequest, ApiResponse, Transport};

/// Answers requests from a queue, in order, and records every request. With
/// a gate, each request waits for one `notify_one` before answering.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<ApiResponse>>,
    requests: Mutex<Vec<ApiRequest>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn reply(self, status: u16, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(ApiResponse::json(status, body));
        self
    }

    pub fn ok(self, data: Value) -> Self {
        self.reply(200, json!({ "data": data }))
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.responses.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| ApiResponse::json(500, json!({}))))
    }
}

pub fn client_with(transport: Arc<ScriptedTransport>, role: &str) -> ApiClient {
    ApiClient::new(transport).with_session(test_session(role, Some(uuid::Uuid::new_v4())))
}

/// Declines every prompt.
pub struct Decline;

impl super::Confirm for Decline {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}
