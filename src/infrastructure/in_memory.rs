use crate::domain::order::{Order, OrderStatus, Quote};
use crate::domain::payment::PaymentMethod;
use crate::domain::ports::{OrderRepository, OrderService, SessionStore, VaultTokenStore};
use crate::domain::session::CheckoutSession;
use crate::domain::vault::VaultToken;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory session store.
///
/// Sessions are isolated by id; `Clone` shares the underlying map.
#[derive(Default, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, CheckoutSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<CheckoutSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(session_id).cloned())
    }

    async fn save(&self, session: CheckoutSession) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn clear(&self, session_id: &str) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id);
        Ok(())
    }
}

#[derive(Default)]
struct OrderBook {
    orders: HashMap<String, Order>,
    /// Reserved increment id per quote.
    reservations: HashMap<u64, String>,
    last_increment: u64,
}

impl OrderBook {
    fn reserve(&mut self, quote_id: u64) -> String {
        if let Some(reference) = self.reservations.get(&quote_id) {
            return reference.clone();
        }
        self.last_increment += 1;
        let reference = format!("{:09}", self.last_increment);
        self.reservations.insert(quote_id, reference.clone());
        reference
    }
}

/// In-memory order subsystem: reserves increment ids, creates orders and
/// persists them.
///
/// A second `handle_order` for the same quote returns the existing order
/// unless that order was canceled. Increment ids start at `000000001`.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    book: Arc<RwLock<OrderBook>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderService for InMemoryOrderStore {
    async fn reserve_reference(&self, quote: &Quote) -> Result<Option<String>> {
        let mut book = self.book.write().await;
        Ok(Some(book.reserve(quote.id)))
    }

    async fn handle_order(&self, quote: &Quote, method: PaymentMethod) -> Result<Option<Order>> {
        let mut book = self.book.write().await;
        let mut increment_id = book.reserve(quote.id);
        if let Some(existing) = book.orders.get(&increment_id).cloned() {
            if existing.status != OrderStatus::Canceled {
                return Ok(Some(existing));
            }
            // A canceled order is never reused; the quote gets a new id.
            book.reservations.remove(&quote.id);
            increment_id = book.reserve(quote.id);
        }
        let order = Order::new(increment_id.clone(), quote, method);
        book.orders.insert(increment_id, order.clone());
        Ok(Some(order))
    }

    async fn handle_failed_payment(&self, order: &mut Order) -> Result<()> {
        order.mark_payment_failed("Payment authorization declined by the gateway.");
        let mut book = self.book.write().await;
        book.orders.insert(order.increment_id.clone(), order.clone());
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderStore {
    async fn save(&self, order: Order) -> Result<()> {
        let mut book = self.book.write().await;
        book.orders.insert(order.increment_id.clone(), order);
        Ok(())
    }

    async fn get(&self, increment_id: &str) -> Result<Option<Order>> {
        let book = self.book.read().await;
        Ok(book.orders.get(increment_id).cloned())
    }

    async fn all(&self) -> Result<Vec<Order>> {
        let book = self.book.read().await;
        let mut orders: Vec<Order> = book.orders.values().cloned().collect();
        orders.sort_by(|a, b| a.increment_id.cmp(&b.increment_id));
        Ok(orders)
    }
}

/// In-memory vault keeping each customer's cards in insertion order.
#[derive(Default, Clone)]
pub struct InMemoryVaultStore {
    tokens: Arc<RwLock<Vec<VaultToken>>>,
}

impl InMemoryVaultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, token: VaultToken) {
        self.tokens.write().await.push(token);
    }
}

impl From<Vec<VaultToken>> for InMemoryVaultStore {
    fn from(tokens: Vec<VaultToken>) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(tokens)),
        }
    }
}

#[async_trait]
impl VaultTokenStore for InMemoryVaultStore {
    async fn user_cards(&self, customer_id: u32) -> Result<Vec<VaultToken>> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .iter()
            .filter(|t| t.customer_id == customer_id)
            .cloned()
            .collect())
    }
}
