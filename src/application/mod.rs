//! Application layer: the checkout use cases.
//!
//! `PlaceOrderService` drives a placement attempt from the session's payment
//! selection to a redirect target. The method components write that
//! selection, `VaultRenderer` lists stored cards, and `card_holder_details`
//! backs the card holder lookup.

pub mod card_holder;
pub mod methods;
pub mod place_order;
pub mod vault_renderer;
