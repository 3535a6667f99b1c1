//! Setters the payment-step UI calls to record the customer's choice.

use crate::domain::session::CheckoutSession;

/// Card entry component.
///
/// `save_card` mirrors the "save this card" checkbox and is written to the
/// session together with the token.
#[derive(Debug, Default, Clone)]
pub struct CardMethodComponent {
    pub save_card: Option<bool>,
}

impl CardMethodComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_payment_token(
        &self,
        session: &mut CheckoutSession,
        token: &str,
        bin: &str,
        preferred_scheme: &str,
    ) {
        session.selection.card_token = Some(token.to_string());
        session.selection.card_bin = Some(bin.to_string());
        session.selection.preferred_scheme = Some(preferred_scheme.to_string());
        self.set_save_card(session, self.save_card);
    }

    pub fn set_scheme(&self, session: &mut CheckoutSession, preferred_scheme: &str) {
        session.selection.preferred_scheme = Some(preferred_scheme.to_string());
    }

    pub fn set_save_card(&self, session: &mut CheckoutSession, save_card: Option<bool>) {
        session.selection.save_card = save_card.unwrap_or(false);
    }
}

/// Stored-card picker component.
#[derive(Debug, Default, Clone)]
pub struct VaultMethodComponent {
    pub public_hash: Option<String>,
}

impl VaultMethodComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_public_hash(&mut self, session: &mut CheckoutSession, public_hash: &str) {
        session.selection.vault_public_hash = Some(public_hash.to_string());
        self.public_hash = Some(public_hash.to_string());
    }
}
