use super::money::{Amount, CurrencyCode};
use crate::error::CheckoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const CARD_METHOD_CODE: &str = "checkoutcom_card_payment";
pub const VAULT_METHOD_CODE: &str = "checkoutcom_vault";

/// The payment methods this checkout can place orders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// A card tokenized in the browser during this checkout.
    #[serde(rename = "checkoutcom_card_payment")]
    Card,
    /// A card previously stored in the customer's vault.
    #[serde(rename = "checkoutcom_vault")]
    Vault,
}

impl PaymentMethod {
    pub fn code(&self) -> &'static str {
        match self {
            PaymentMethod::Card => CARD_METHOD_CODE,
            PaymentMethod::Vault => VAULT_METHOD_CODE,
        }
    }

    pub fn from_code(code: &str) -> Result<Self, CheckoutError> {
        match code {
            CARD_METHOD_CODE => Ok(PaymentMethod::Card),
            VAULT_METHOD_CODE => Ok(PaymentMethod::Vault),
            other => Err(CheckoutError::ValidationError(format!(
                "Unsupported payment method: {other}"
            ))),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// What the customer picked in the payment step, as written by the method
/// components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionPaymentSelection {
    pub card_token: Option<String>,
    pub card_bin: Option<String>,
    pub preferred_scheme: Option<String>,
    pub save_card: bool,
    pub vault_public_hash: Option<String>,
}

impl SessionPaymentSelection {
    /// Extracts the payload for `method`.
    ///
    /// Returns `None` when the token the method depends on is missing or
    /// blank; such an attempt must not reach the gateway.
    pub fn payload_for(&self, method: PaymentMethod) -> Option<TokenPayload> {
        match method {
            PaymentMethod::Card => {
                let token = non_blank(self.card_token.as_deref())?;
                Some(TokenPayload::Card {
                    card_token: token.to_string(),
                    card_bin: self.card_bin.clone(),
                    preferred_scheme: self.preferred_scheme.clone(),
                    save_card: self.save_card,
                })
            }
            PaymentMethod::Vault => {
                let hash = non_blank(self.vault_public_hash.as_deref())?;
                Some(TokenPayload::Vault {
                    public_hash: hash.to_string(),
                })
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Method-specific part of a payment request. Exactly one variant is
/// populated per attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TokenPayload {
    Card {
        card_token: String,
        card_bin: Option<String>,
        preferred_scheme: Option<String>,
        #[serde(with = "bool_string")]
        save_card: bool,
    },
    Vault {
        public_hash: String,
    },
}

impl TokenPayload {
    pub fn method(&self) -> PaymentMethod {
        match self {
            TokenPayload::Card { .. } => PaymentMethod::Card,
            TokenPayload::Vault { .. } => PaymentMethod::Vault,
        }
    }

    /// Metadata safe to keep on the order. The raw card token is left out.
    pub fn metadata(&self) -> serde_json::Value {
        match self {
            TokenPayload::Card {
                card_bin,
                preferred_scheme,
                save_card,
                ..
            } => serde_json::json!({
                "methodId": CARD_METHOD_CODE,
                "cardBin": card_bin,
                "preferredScheme": preferred_scheme,
                "saveCard": if *save_card { "true" } else { "false" },
            }),
            TokenPayload::Vault { public_hash } => serde_json::json!({
                "methodId": VAULT_METHOD_CODE,
                "publicHash": public_hash,
            }),
        }
    }
}

/// The save-card flag travels to the gateway as `"true"`/`"false"`.
mod bool_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.eq_ignore_ascii_case("true"))
    }
}

/// A single charge request, derived per placement attempt and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub amount: Amount,
    pub currency_code: CurrencyCode,
    pub reference: String,
    pub method: PaymentMethod,
    pub token_payload: TokenPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_code() {
        assert_eq!(
            PaymentMethod::from_code("checkoutcom_card_payment").unwrap(),
            PaymentMethod::Card
        );
        assert_eq!(
            "checkoutcom_vault".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::Vault
        );
        assert!(matches!(
            PaymentMethod::from_code("checkmo"),
            Err(CheckoutError::ValidationError(_))
        ));
    }

    #[test]
    fn test_card_payload_requires_token() {
        let mut selection = SessionPaymentSelection {
            card_bin: Some("424242".to_string()),
            ..Default::default()
        };
        assert!(selection.payload_for(PaymentMethod::Card).is_none());

        selection.card_token = Some("   ".to_string());
        assert!(selection.payload_for(PaymentMethod::Card).is_none());

        selection.card_token = Some("tok_123".to_string());
        let payload = selection.payload_for(PaymentMethod::Card).unwrap();
        assert_eq!(payload.method(), PaymentMethod::Card);
    }

    #[test]
    fn test_vault_payload_ignores_card_fields() {
        let selection = SessionPaymentSelection {
            card_token: Some("tok_123".to_string()),
            vault_public_hash: Some("abc123".to_string()),
            ..Default::default()
        };
        assert_eq!(
            selection.payload_for(PaymentMethod::Vault),
            Some(TokenPayload::Vault {
                public_hash: "abc123".to_string()
            })
        );
    }

    #[test]
    fn test_card_metadata_omits_token() {
        let payload = TokenPayload::Card {
            card_token: "tok_secret".to_string(),
            card_bin: Some("424242".to_string()),
            preferred_scheme: Some("visa".to_string()),
            save_card: true,
        };
        let metadata = payload.metadata();
        assert_eq!(metadata["saveCard"], "true");
        assert!(!metadata.to_string().contains("tok_secret"));
    }

    #[test]
    fn test_save_card_serialized_as_string() {
        let payload = TokenPayload::Card {
            card_token: "tok".to_string(),
            card_bin: None,
            preferred_scheme: None,
            save_card: false,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["save_card"], "false");
        assert_eq!(json["kind"], "card");
    }
}
