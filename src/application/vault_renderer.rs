use crate::domain::config::{CheckoutConfig, Scope};
use crate::domain::ports::{CardRenderer, ConfigProviderRef, VaultTokenStoreBox};
use crate::error::Result;
use tracing::debug;

/// Lists a customer's stored cards as rendered fragments.
pub struct VaultRenderer<R: CardRenderer> {
    config: ConfigProviderRef,
    vault: VaultTokenStoreBox,
    renderer: R,
    scope: Scope,
}

impl<R: CardRenderer> VaultRenderer<R> {
    pub fn new(config: ConfigProviderRef, vault: VaultTokenStoreBox, renderer: R) -> Self {
        Self {
            config,
            vault,
            renderer,
            scope: Scope::Default,
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// One fragment per stored card, in the order the vault returns them.
    /// Empty when the vault is switched off.
    pub async fn list_cards(&self, customer_id: u32) -> Result<Vec<String>> {
        if !CheckoutConfig::new(self.config.as_ref(), &self.scope).is_vault_enabled() {
            debug!(customer_id, "Vault disabled, no cards listed");
            return Ok(Vec::new());
        }

        let cards = self.vault.user_cards(customer_id).await?;
        debug!(customer_id, count = cards.len(), "Rendering stored cards");
        Ok(cards.iter().map(|card| self.renderer.render(card)).collect())
    }

    /// All fragments concatenated, as embedded in the payment step.
    pub async fn cards_html(&self, customer_id: u32) -> Result<String> {
        Ok(self.list_cards(customer_id).await?.concat())
    }
}
