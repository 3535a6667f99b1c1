use crate::domain::config::{CheckoutConfig, OrderPlacementPolicy, Scope};
use crate::domain::gateway::{GENERIC_DECLINE_MESSAGE, GatewayResponse};
use crate::domain::money::{Amount, CurrencyCode};
use crate::domain::order::Quote;
use crate::domain::payment::{OrderRequest, PaymentMethod, TokenPayload};
use crate::domain::ports::{
    ConfigProviderRef, OrderRepositoryBox, OrderServiceBox, PaymentGatewayBox,
};
use crate::domain::session::CheckoutSession;
use crate::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

pub const INVALID_CARD_MESSAGE: &str = "Please enter valid card details.";
pub const ORDER_NOT_PROCESSED_MESSAGE: &str = "The order could not be processed.";
pub const FALLBACK_ERROR_MESSAGE: &str =
    "An error has occurred, please select another payment method";

pub const SUCCESS_PATH: &str = "checkout/onepage/success";
pub const CART_PATH: &str = "checkout/cart";

/// Where the storefront sends the customer after a placement attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum RedirectTarget {
    /// A URL handed back by the gateway (3DS challenge, hosted page).
    Gateway(String),
    Success,
    Cart,
}

impl RedirectTarget {
    pub fn path(&self) -> &str {
        match self {
            RedirectTarget::Gateway(url) => url,
            RedirectTarget::Success => SUCCESS_PATH,
            RedirectTarget::Cart => CART_PATH,
        }
    }
}

/// Result of one `place_order` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementOutcome {
    pub success: bool,
    pub redirect: RedirectTarget,
    /// The banner text shown to the customer, on failure only.
    pub message: Option<String>,
    pub order_id: Option<String>,
}

/// What an attempt produced before the shared exit path runs.
#[derive(Debug, Default)]
struct Attempt {
    success: bool,
    redirect_url: Option<String>,
    message: Option<String>,
    debug_message: Option<String>,
    order_id: Option<String>,
}

impl Attempt {
    fn rejected(message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Default::default()
        }
    }
}

/// Places an order against the payment token stored in the session.
///
/// Every call ends in exactly one `PlacementOutcome`: errors raised by a
/// collaborator are logged and reported as a generic failure.
pub struct PlaceOrderService {
    config: ConfigProviderRef,
    orders: OrderServiceBox,
    repository: OrderRepositoryBox,
    gateway: PaymentGatewayBox,
    scope: Scope,
}

impl PlaceOrderService {
    pub fn new(
        config: ConfigProviderRef,
        orders: OrderServiceBox,
        repository: OrderRepositoryBox,
        gateway: PaymentGatewayBox,
    ) -> Self {
        Self {
            config,
            orders,
            repository,
            gateway,
            scope: Scope::Default,
        }
    }

    /// Reads configuration for `scope` instead of the default scope.
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub async fn place_order(
        &self,
        quote: &Quote,
        session: &mut CheckoutSession,
    ) -> PlacementOutcome {
        let active_quote = session.active_quote_id;
        let attempt = match self.attempt(quote, session).await {
            Ok(attempt) => attempt,
            Err(e) => {
                error!(quote_id = quote.id, error = %e, "Order placement failed unexpectedly");
                // Only undo a cart emptied by this attempt.
                if active_quote.is_some() && session.active_quote_id.is_none() {
                    session.restore_quote();
                }
                Attempt::default()
            }
        };
        self.finish(quote, attempt, session)
    }

    async fn attempt(&self, quote: &Quote, session: &mut CheckoutSession) -> Result<Attempt> {
        let code = quote.payment_method.as_deref().ok_or_else(|| {
            CheckoutError::ValidationError("Quote has no payment method".to_string())
        })?;
        let method = PaymentMethod::from_code(code)?;

        let Some(payload) = session.selection.payload_for(method) else {
            return Ok(Attempt::rejected(INVALID_CARD_MESSAGE));
        };

        let config = CheckoutConfig::new(self.config.as_ref(), &self.scope);
        let policy = config.order_placement_policy();
        debug!(quote_id = quote.id, %method, ?policy, "Placing order");

        let (mut order, reference) = match policy {
            OrderPlacementPolicy::PaymentFirst => {
                match self.orders.reserve_reference(quote).await? {
                    Some(reference) => (None, reference),
                    None => return Ok(Attempt::rejected(ORDER_NOT_PROCESSED_MESSAGE)),
                }
            }
            OrderPlacementPolicy::OrderFirst => {
                match self.orders.handle_order(quote, method).await? {
                    Some(order) => {
                        session.record_order(&order);
                        let reference = order.increment_id.clone();
                        (Some(order), reference)
                    }
                    None => return Ok(Attempt::rejected(ORDER_NOT_PROCESSED_MESSAGE)),
                }
            }
        };

        let (total, currency) = match &order {
            Some(order) => (order.grand_total, order.currency_code.clone()),
            None => (quote.grand_total, quote.currency_code.clone()),
        };
        let request = build_request(total, currency, reference, payload)?;

        let response = self.gateway.send_payment_request(&request).await?;
        let valid = self.gateway.is_valid_response(&response);
        info!(
            reference = %request.reference,
            amount = %request.amount,
            currency = %request.currency_code,
            valid,
            "Gateway responded"
        );

        if valid {
            let mut order = match order {
                Some(order) => order,
                None => match self.orders.handle_order(quote, method).await? {
                    Some(order) => {
                        session.record_order(&order);
                        order
                    }
                    None => {
                        return Err(CheckoutError::OrderError(format!(
                            "Payment {} authorized but no order could be created",
                            request.reference
                        )));
                    }
                },
            };
            order.attach_payment(&response, &request);
            order.mark_awaiting_payment();
            let redirect_url = response.redirect_url().map(str::to_string);
            let order_id = order.increment_id.clone();
            self.repository.save(order).await?;

            return Ok(Attempt {
                success: true,
                redirect_url,
                order_id: Some(order_id),
                ..Default::default()
            });
        }

        let (message, debug_message) = self.decline_message(&response, &config)?;
        session.restore_quote();
        if let Some(order) = order.as_mut() {
            self.orders.handle_failed_payment(order).await?;
        }

        Ok(Attempt {
            message: Some(message),
            debug_message,
            order_id: order.map(|o| o.increment_id),
            ..Default::default()
        })
    }

    /// Message for a rejected charge, plus the raw response when debugging
    /// asks for it and the gateway gave no code.
    fn decline_message(
        &self,
        response: &GatewayResponse,
        config: &CheckoutConfig<'_>,
    ) -> Result<(String, Option<String>)> {
        if let Some(code) = response.response_code() {
            return Ok((self.gateway.error_message(&code), None));
        }
        let debug_message = if config.is_debug() && config.logs_gateway_responses() {
            Some(serde_json::to_string(response)?)
        } else {
            None
        };
        Ok((GENERIC_DECLINE_MESSAGE.to_string(), debug_message))
    }

    fn finish(
        &self,
        quote: &Quote,
        attempt: Attempt,
        session: &mut CheckoutSession,
    ) -> PlacementOutcome {
        if attempt.success {
            let redirect = match attempt.redirect_url {
                Some(url) => RedirectTarget::Gateway(url),
                None => RedirectTarget::Success,
            };
            info!(
                quote_id = quote.id,
                order_id = attempt.order_id.as_deref().unwrap_or_default(),
                redirect = redirect.path(),
                "Order placed"
            );
            return PlacementOutcome {
                success: true,
                redirect,
                message: None,
                order_id: attempt.order_id,
            };
        }

        let message = attempt
            .message
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
        warn!(quote_id = quote.id, %message, "Order placement unsuccessful");
        if let Some(raw) = &attempt.debug_message {
            debug!(response = %raw, "Gateway response");
        }
        session.add_error_message(message.clone());

        PlacementOutcome {
            success: false,
            redirect: RedirectTarget::Cart,
            message: Some(message),
            order_id: attempt.order_id,
        }
    }
}

fn build_request(
    total: Decimal,
    currency_code: CurrencyCode,
    reference: String,
    token_payload: TokenPayload,
) -> Result<OrderRequest> {
    Ok(OrderRequest {
        amount: Amount::new(total)?,
        currency_code,
        reference,
        method: token_payload.method(),
        token_payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{DEBUG, GATEWAY_RESPONSES, ORDER_CREATION};
    use crate::domain::order::{BillingAddress, OrderStatus};
    use crate::domain::ports::OrderRepository;
    use crate::infrastructure::in_memory::InMemoryOrderStore;
    use crate::infrastructure::scripted_gateway::ScriptedGateway;
    use crate::infrastructure::static_config::StaticConfig;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::sync::Arc;

    fn quote(method: &str) -> Quote {
        Quote {
            id: 1,
            customer_id: Some(10),
            grand_total: dec!(99.95),
            currency_code: CurrencyCode::new("EUR").unwrap(),
            payment_method: Some(method.to_string()),
            billing_address: BillingAddress::default(),
        }
    }

    fn service(
        config: StaticConfig,
        store: &InMemoryOrderStore,
        gateway: &ScriptedGateway,
    ) -> PlaceOrderService {
        PlaceOrderService::new(
            Arc::new(config),
            Box::new(store.clone()),
            Box::new(store.clone()),
            Box::new(gateway.clone()),
        )
    }

    #[tokio::test]
    async fn test_missing_card_token_skips_gateway() {
        let store = InMemoryOrderStore::new();
        let gateway = ScriptedGateway::new();
        let service = service(StaticConfig::new(), &store, &gateway);
        let quote = quote("checkoutcom_card_payment");
        let mut session = CheckoutSession::new("s").with_quote(&quote);

        let outcome = service.place_order(&quote, &mut session).await;

        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some(INVALID_CARD_MESSAGE));
        assert_eq!(outcome.redirect, RedirectTarget::Cart);
        assert!(gateway.requests().await.is_empty());
        assert!(store.all().await.unwrap().is_empty());
        assert_eq!(session.messages[0].text, INVALID_CARD_MESSAGE);
    }

    #[tokio::test]
    async fn test_vault_payment_with_redirect() {
        let store = InMemoryOrderStore::new();
        let gateway = ScriptedGateway::new();
        gateway
            .push_response(json!({
                "id": "pay_1",
                "status": "Pending",
                "_links": {"redirect": {"href": "https://3ds.example/c"}}
            }))
            .await;
        let service = service(StaticConfig::new(), &store, &gateway);
        let quote = quote("checkoutcom_vault");
        let mut session = CheckoutSession::new("s").with_quote(&quote);
        session.selection.vault_public_hash = Some("abc123".to_string());

        let outcome = service.place_order(&quote, &mut session).await;

        assert!(outcome.success);
        assert_eq!(
            outcome.redirect,
            RedirectTarget::Gateway("https://3ds.example/c".to_string())
        );
        let order = store
            .get(outcome.order_id.as_deref().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.status, OrderStatus::AwaitingPayment);
        assert!(order.payment_data.is_some());
        assert!(session.messages.is_empty());
    }

    #[tokio::test]
    async fn test_decline_code_maps_to_message() {
        let store = InMemoryOrderStore::new();
        let gateway = ScriptedGateway::new();
        gateway
            .push_response(json!({"approved": false, "response_code": "20051"}))
            .await;
        let service = service(StaticConfig::new(), &store, &gateway);
        let quote = quote("checkoutcom_card_payment");
        let mut session = CheckoutSession::new("s").with_quote(&quote);
        session.selection.card_token = Some("tok_1".to_string());

        let outcome = service.place_order(&quote, &mut session).await;

        assert_eq!(outcome.message.as_deref(), Some("Insufficient funds"));
        assert_eq!(session.active_quote_id, Some(quote.id));
        let order = store.all().await.unwrap().pop().unwrap();
        assert_eq!(order.status, OrderStatus::Canceled);
    }

    #[tokio::test]
    async fn test_payment_first_uses_reserved_reference() {
        let store = InMemoryOrderStore::new();
        let gateway = ScriptedGateway::new();
        gateway.push_response(json!({"approved": true})).await;
        let config = StaticConfig::new().with(ORDER_CREATION, "after_auth");
        let service = service(config, &store, &gateway);
        let quote = quote("checkoutcom_card_payment");
        let mut session = CheckoutSession::new("s").with_quote(&quote);
        session.selection.card_token = Some("tok_1".to_string());

        let outcome = service.place_order(&quote, &mut session).await;

        assert!(outcome.success);
        assert_eq!(outcome.redirect, RedirectTarget::Success);
        let requests = gateway.requests().await;
        assert_eq!(requests[0].reference, "000000001");
        assert_eq!(requests[0].amount.value(), dec!(99.95));
        assert_eq!(outcome.order_id.as_deref(), Some("000000001"));
    }

    #[tokio::test]
    async fn test_gateway_error_collapses_to_fallback() {
        let store = InMemoryOrderStore::new();
        let gateway = ScriptedGateway::new();
        gateway.push_failure("connection reset").await;
        let service = service(StaticConfig::new(), &store, &gateway);
        let quote = quote("checkoutcom_card_payment");
        let mut session = CheckoutSession::new("s").with_quote(&quote);
        session.selection.card_token = Some("tok_1".to_string());

        let outcome = service.place_order(&quote, &mut session).await;

        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some(FALLBACK_ERROR_MESSAGE));
        assert_eq!(outcome.redirect, RedirectTarget::Cart);
        assert_eq!(session.active_quote_id, Some(quote.id));
        assert_eq!(session.last_order_id, None);
    }

    #[tokio::test]
    async fn test_error_before_order_keeps_previous_cart_state() {
        let store = InMemoryOrderStore::new();
        let gateway = ScriptedGateway::new();
        let service = service(StaticConfig::new(), &store, &gateway);
        let quote = quote("checkmo");
        let mut session = CheckoutSession::new("s");
        session.last_quote_id = Some(99);

        service.place_order(&quote, &mut session).await;

        assert_eq!(session.active_quote_id, None);
    }

    #[tokio::test]
    async fn test_debug_dump_only_without_code() {
        let store = InMemoryOrderStore::new();
        let gateway = ScriptedGateway::new();
        let config = StaticConfig::new()
            .with(DEBUG, "1")
            .with(GATEWAY_RESPONSES, "1");
        let service = service(config, &store, &gateway);
        let scope = Scope::Default;
        let view = CheckoutConfig::new(service.config.as_ref(), &scope);

        let (message, dump) = service
            .decline_message(&GatewayResponse::new(json!({"approved": false})), &view)
            .unwrap();
        assert_eq!(message, GENERIC_DECLINE_MESSAGE);
        assert!(dump.unwrap().contains("approved"));

        let (message, dump) = service
            .decline_message(
                &GatewayResponse::new(json!({"approved": false, "response_code": 20005})),
                &view,
            )
            .unwrap();
        assert_eq!(message, "Declined - Do not honour");
        assert!(dump.is_none());
    }

    #[tokio::test]
    async fn test_unknown_method_is_generic_failure() {
        let store = InMemoryOrderStore::new();
        let gateway = ScriptedGateway::new();
        let service = service(StaticConfig::new(), &store, &gateway);
        let quote = quote("checkmo");
        let mut session = CheckoutSession::new("s").with_quote(&quote);

        let outcome = service.place_order(&quote, &mut session).await;

        assert_eq!(outcome.message.as_deref(), Some(FALLBACK_ERROR_MESSAGE));
        assert!(gateway.requests().await.is_empty());
    }
}
