use crate::domain::gateway::{GatewayResponse, decline_message};
use crate::domain::payment::OrderRequest;
use crate::domain::ports::PaymentGateway;
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Statuses the gateway reports for a charge that went through or is
/// waiting on the customer.
const ACCEPTED_STATUSES: [&str; 4] = ["Authorized", "Pending", "Card Verified", "Captured"];

/// One queued outcome of `send_payment_request`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScriptedReply {
    /// The transport failed before a response was read.
    Failure { transport_error: String },
    Response(GatewayResponse),
}

/// A gateway client that replays queued replies and records every request.
///
/// `Clone` shares the queue and the request log, so a test can keep a handle
/// after boxing the gateway into the orchestrator.
#[derive(Default, Clone)]
pub struct ScriptedGateway {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    requests: Arc<Mutex<Vec<OrderRequest>>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            requests: Arc::default(),
        }
    }

    pub async fn push_response(&self, body: serde_json::Value) {
        self.replies
            .lock()
            .await
            .push_back(ScriptedReply::Response(GatewayResponse::new(body)));
    }

    pub async fn push_failure(&self, error: impl Into<String>) {
        self.replies.lock().await.push_back(ScriptedReply::Failure {
            transport_error: error.into(),
        });
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<OrderRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn send_payment_request(&self, request: &OrderRequest) -> Result<GatewayResponse> {
        self.requests.lock().await.push(request.clone());
        match self.replies.lock().await.pop_front() {
            Some(ScriptedReply::Response(response)) => Ok(response),
            Some(ScriptedReply::Failure { transport_error }) => {
                Err(CheckoutError::GatewayError(transport_error))
            }
            None => Err(CheckoutError::GatewayError(
                "no scripted response left".to_string(),
            )),
        }
    }

    fn is_valid_response(&self, response: &GatewayResponse) -> bool {
        let body = response.as_value();
        if body.get("error_type").is_some() {
            return false;
        }
        let approved = body
            .get("approved")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        let accepted_status = body
            .get("status")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|status| ACCEPTED_STATUSES.contains(&status));
        approved || accepted_status
    }

    fn error_message(&self, code: &str) -> String {
        decline_message(code).to_string()
    }
}
