use super::gateway::GatewayResponse;
use super::money::CurrencyCode;
use super::payment::{OrderRequest, PaymentMethod};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingAddress {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

/// The customer's cart at the moment an order is placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: u64,
    pub customer_id: Option<u32>,
    pub grand_total: Decimal,
    pub currency_code: CurrencyCode,
    /// Code of the payment method selected at checkout, if any.
    pub payment_method: Option<String>,
    #[serde(default)]
    pub billing_address: BillingAddress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    AwaitingPayment,
    /// Terminal state for orders created before a declined authorization.
    Canceled,
}

/// An order as handed back by the order subsystem.
///
/// This crate only sets `status` and `payment_data`; everything else is
/// owned upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub increment_id: String,
    pub quote_id: u64,
    pub grand_total: Decimal,
    pub currency_code: CurrencyCode,
    pub method: PaymentMethod,
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_data: Option<serde_json::Value>,
    #[serde(default)]
    pub comments: Vec<String>,
}

impl Order {
    pub fn new(increment_id: String, quote: &Quote, method: PaymentMethod) -> Self {
        Self {
            increment_id,
            quote_id: quote.id,
            grand_total: quote.grand_total,
            currency_code: quote.currency_code.clone(),
            method,
            status: OrderStatus::Pending,
            payment_data: None,
            comments: Vec::new(),
        }
    }

    /// Stores the gateway response next to the request metadata.
    pub fn attach_payment(&mut self, response: &GatewayResponse, request: &OrderRequest) {
        self.payment_data = Some(serde_json::json!({
            "transaction_info": response.as_value(),
            "request": request.token_payload.metadata(),
            "reference": request.reference,
        }));
    }

    pub fn mark_awaiting_payment(&mut self) {
        self.status = OrderStatus::AwaitingPayment;
    }

    pub fn mark_payment_failed(&mut self, comment: impl Into<String>) {
        self.status = OrderStatus::Canceled;
        self.comments.push(comment.into());
    }
}
