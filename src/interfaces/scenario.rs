use crate::application::methods::{CardMethodComponent, VaultMethodComponent};
use crate::domain::order::Quote;
use crate::domain::session::CheckoutSession;
use crate::error::Result;
use crate::infrastructure::scripted_gateway::ScriptedReply;
use serde::Deserialize;
use std::io::Read;

fn default_session_id() -> String {
    "cli".to_string()
}

/// What the customer entered in the payment step.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ScenarioSelection {
    Card {
        token: Option<String>,
        #[serde(default)]
        bin: String,
        #[serde(default)]
        scheme: String,
        save_card: Option<bool>,
    },
    Vault {
        public_hash: String,
    },
}

/// A checkout replayed from JSON: the quote, the customer's selection and
/// the replies the gateway will give.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_session_id")]
    pub session_id: String,
    pub quote: Quote,
    pub selection: Option<ScenarioSelection>,
    #[serde(default)]
    pub gateway_responses: Vec<ScriptedReply>,
}

impl Scenario {
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Ok(serde_json::from_reader(source)?)
    }

    /// A fresh session for the scenario's quote with the selection applied
    /// through the method components.
    pub fn session(&self) -> CheckoutSession {
        let mut session = CheckoutSession::new(self.session_id.clone()).with_quote(&self.quote);
        match &self.selection {
            Some(ScenarioSelection::Card {
                token,
                bin,
                scheme,
                save_card,
            }) => {
                let component = CardMethodComponent {
                    save_card: *save_card,
                };
                match token {
                    Some(token) => component.set_payment_token(&mut session, token, bin, scheme),
                    None => component.set_scheme(&mut session, scheme),
                }
            }
            Some(ScenarioSelection::Vault { public_hash }) => {
                VaultMethodComponent::new().set_public_hash(&mut session, public_hash);
            }
            None => {}
        }
        session
    }
}
