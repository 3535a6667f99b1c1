use super::config::Scope;
use super::gateway::GatewayResponse;
use super::order::{Order, Quote};
use super::payment::{OrderRequest, PaymentMethod};
use super::session::CheckoutSession;
use super::vault::VaultToken;
use crate::error::Result;
use async_trait::async_trait;

/// Read-only store settings lookup.
pub trait ConfigProvider: Send + Sync {
    fn value(&self, path: &str, scope: &Scope) -> Option<String>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, session_id: &str) -> Result<Option<CheckoutSession>>;
    async fn save(&self, session: CheckoutSession) -> Result<()>;
    async fn clear(&self, session_id: &str) -> Result<()>;
}

/// Quote and order helpers of the order subsystem.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Reserves the increment id a later order will use. `None` when the
    /// quote cannot be ordered.
    async fn reserve_reference(&self, quote: &Quote) -> Result<Option<String>>;
    /// Creates the order for `quote`, reusing its reserved reference.
    async fn handle_order(&self, quote: &Quote, method: PaymentMethod) -> Result<Option<Order>>;
    async fn handle_failed_payment(&self, order: &mut Order) -> Result<()>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn save(&self, order: Order) -> Result<()>;
    async fn get(&self, increment_id: &str) -> Result<Option<Order>>;
    async fn all(&self) -> Result<Vec<Order>>;
}

/// Client of the external payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn send_payment_request(&self, request: &OrderRequest) -> Result<GatewayResponse>;
    fn is_valid_response(&self, response: &GatewayResponse) -> bool;
    fn error_message(&self, code: &str) -> String;
}

#[async_trait]
pub trait VaultTokenStore: Send + Sync {
    async fn user_cards(&self, customer_id: u32) -> Result<Vec<VaultToken>>;
}

/// Turns one stored card into a presentational fragment.
pub trait CardRenderer: Send + Sync {
    fn render(&self, token: &VaultToken) -> String;
}

pub type SessionStoreBox = Box<dyn SessionStore>;
pub type OrderServiceBox = Box<dyn OrderService>;
pub type OrderRepositoryBox = Box<dyn OrderRepository>;
pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
pub type VaultTokenStoreBox = Box<dyn VaultTokenStore>;
pub type ConfigProviderRef = std::sync::Arc<dyn ConfigProvider>;
