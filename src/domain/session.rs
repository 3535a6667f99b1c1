use super::order::{Order, Quote};
use super::payment::SessionPaymentSelection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Error,
    Notice,
}

/// A banner message queued for the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub level: MessageLevel,
    pub text: String,
}

/// Request-scoped checkout state for one customer session.
///
/// Passed explicitly to every component that reads or writes it. A
/// `SessionStore` keeps it between requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub customer_id: Option<u32>,
    #[serde(default)]
    pub selection: SessionPaymentSelection,
    /// Quote currently shown as the customer's cart.
    #[serde(default)]
    pub active_quote_id: Option<u64>,
    #[serde(default)]
    pub last_quote_id: Option<u64>,
    #[serde(default)]
    pub last_order_id: Option<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl CheckoutSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            customer_id: None,
            selection: SessionPaymentSelection::default(),
            active_quote_id: None,
            last_quote_id: None,
            last_order_id: None,
            messages: Vec::new(),
        }
    }

    pub fn with_quote(mut self, quote: &Quote) -> Self {
        self.customer_id = quote.customer_id;
        self.active_quote_id = Some(quote.id);
        self
    }

    pub fn is_logged_in(&self) -> bool {
        self.customer_id.is_some()
    }

    /// Called once an order exists for the active quote: the cart is
    /// emptied and the quote remembered so it can be restored.
    pub fn record_order(&mut self, order: &Order) {
        self.last_quote_id = Some(order.quote_id);
        self.last_order_id = Some(order.increment_id.clone());
        self.active_quote_id = None;
    }

    /// Puts the last ordered quote back into the cart.
    ///
    /// Returns `false` when there is nothing to restore.
    pub fn restore_quote(&mut self) -> bool {
        match self.last_quote_id {
            Some(quote_id) => {
                self.active_quote_id = Some(quote_id);
                self.last_order_id = None;
                true
            }
            None => false,
        }
    }

    pub fn add_error_message(&mut self, text: impl Into<String>) {
        self.messages.push(Message {
            level: MessageLevel::Error,
            text: text.into(),
        });
    }

    /// Drains queued messages, the way a page render consumes them.
    pub fn take_messages(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages)
    }

    /// Forgets the payment selection; cart state is left alone.
    pub fn reset(&mut self) {
        self.selection = SessionPaymentSelection::default();
    }
}
