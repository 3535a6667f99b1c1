use serde::{Deserialize, Serialize};

pub const GENERIC_DECLINE_MESSAGE: &str = "The transaction could not be processed.";

/// Raw response returned by the payment gateway.
///
/// The body is kept opaque; only the redirect link and the response code
/// are ever read from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GatewayResponse(serde_json::Value);

impl GatewayResponse {
    pub fn new(body: serde_json::Value) -> Self {
        Self(body)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// `_links.redirect.href`, present when the customer must be sent to
    /// the gateway (3DS challenge, hosted page).
    pub fn redirect_url(&self) -> Option<&str> {
        self.0
            .pointer("/_links/redirect/href")
            .and_then(serde_json::Value::as_str)
            .filter(|href| !href.is_empty())
    }

    /// The decline code, accepted either as a string or a number.
    pub fn response_code(&self) -> Option<String> {
        match self.0.get("response_code")? {
            serde_json::Value::String(code) if !code.is_empty() => Some(code.clone()),
            serde_json::Value::Number(code) => Some(code.to_string()),
            _ => None,
        }
    }
}

/// Customer-facing text for the gateway's decline codes.
pub fn decline_message(code: &str) -> &'static str {
    match code {
        "20005" => "Declined - Do not honour",
        "20012" => "Invalid transaction",
        "20014" => "Invalid card number",
        "20051" => "Insufficient funds",
        "20054" => "Expired card",
        "20057" => "Transaction not permitted to cardholder",
        "20059" => "Suspected fraud",
        "20062" => "Restricted card",
        "20087" => "Bad track data",
        "20150" => "Card not 3D Secure enabled",
        _ => GENERIC_DECLINE_MESSAGE,
    }
}
