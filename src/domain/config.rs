use super::ports::ConfigProvider;
use serde::{Deserialize, Serialize};

pub const PUBLIC_KEY: &str = "settings/checkoutcom_configuration/public_key";
pub const ORDER_CREATION: &str = "settings/checkoutcom_configuration/order_creation";
pub const DEBUG: &str = "settings/checkoutcom_configuration/debug";
pub const GATEWAY_RESPONSES: &str = "settings/checkoutcom_configuration/gateway_responses";
pub const DEBUG_MODE: &str = "settings/checkoutcom_configuration/debug_mode";
pub const IMAGES_PATH: &str = "settings/checkoutcom_configuration/images_path";
pub const VAULT_ACTIVE: &str = "payment/checkoutcom_vault/active";
pub const SAVE_CARD_OPTION: &str = "payment/checkoutcom_card_payment/save_card_option";
pub const CARD_NUMBER_PLACEHOLDER: &str =
    "payment/checkoutcom_card_payment/card_number_placeholder";
pub const EXPIRY_MONTH_PLACEHOLDER: &str =
    "payment/checkoutcom_card_payment/expiration_date_month_placeholder";
pub const EXPIRY_YEAR_PLACEHOLDER: &str =
    "payment/checkoutcom_card_payment/expiration_date_year_placeholder";
pub const CVV_PLACEHOLDER: &str = "payment/checkoutcom_card_payment/cvv_placeholder";
pub const CARD_NUMBER_LABEL: &str = "payment/checkoutcom_card_payment/card_number_label";
pub const EXPIRY_LABEL: &str = "payment/checkoutcom_card_payment/expiration_date_label";
pub const CVV_LABEL: &str = "payment/checkoutcom_card_payment/cvv_label";
pub const FORM_STYLES: &str = "payment/checkoutcom_card_payment/payment_form_styles";
pub const FORM_LAYOUT: &str = "payment/checkoutcom_card_payment/payment_form_layout";

const DEFAULT_IMAGES_PATH: &str = "/static/images/checkoutcom";

/// Where a configuration value is looked up.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    #[default]
    Default,
    Store(String),
}

/// Whether the order record is created before or after authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderPlacementPolicy {
    OrderFirst,
    PaymentFirst,
}

/// Typed view over a `ConfigProvider` for one scope.
pub struct CheckoutConfig<'a> {
    provider: &'a dyn ConfigProvider,
    scope: &'a Scope,
}

impl<'a> CheckoutConfig<'a> {
    pub fn new(provider: &'a dyn ConfigProvider, scope: &'a Scope) -> Self {
        Self { provider, scope }
    }

    fn raw(&self, path: &str) -> Option<String> {
        self.provider.value(path, self.scope)
    }

    fn flag(&self, path: &str) -> bool {
        self.raw(path).is_some_and(|v| parse_flag(&v))
    }

    fn non_empty(&self, path: &str) -> Option<String> {
        self.raw(path).filter(|v| !v.trim().is_empty())
    }

    pub fn public_key(&self) -> Option<String> {
        self.non_empty(PUBLIC_KEY)
    }

    /// `after_auth` selects payment-first; anything else keeps the order-first
    /// default.
    pub fn order_placement_policy(&self) -> OrderPlacementPolicy {
        match self.raw(ORDER_CREATION).as_deref().map(str::trim) {
            Some("after_auth") => OrderPlacementPolicy::PaymentFirst,
            _ => OrderPlacementPolicy::OrderFirst,
        }
    }

    pub fn is_vault_enabled(&self) -> bool {
        self.flag(VAULT_ACTIVE)
    }

    pub fn is_save_card_enabled(&self) -> bool {
        self.flag(SAVE_CARD_OPTION)
    }

    pub fn is_debug(&self) -> bool {
        self.flag(DEBUG)
    }

    pub fn logs_gateway_responses(&self) -> bool {
        self.flag(GATEWAY_RESPONSES)
    }

    pub fn is_debug_mode_enabled(&self) -> bool {
        self.flag(DEBUG_MODE)
    }

    pub fn card_number_placeholder(&self) -> Option<String> {
        self.non_empty(CARD_NUMBER_PLACEHOLDER)
    }

    pub fn expiry_month_placeholder(&self) -> Option<String> {
        self.non_empty(EXPIRY_MONTH_PLACEHOLDER)
    }

    pub fn expiry_year_placeholder(&self) -> Option<String> {
        self.non_empty(EXPIRY_YEAR_PLACEHOLDER)
    }

    pub fn cvv_placeholder(&self) -> Option<String> {
        self.non_empty(CVV_PLACEHOLDER)
    }

    pub fn card_number_label(&self) -> String {
        self.raw(CARD_NUMBER_LABEL)
            .unwrap_or_else(|| "Card Number".to_string())
    }

    pub fn expiry_label(&self) -> String {
        self.raw(EXPIRY_LABEL)
            .unwrap_or_else(|| "Expiry Date".to_string())
    }

    pub fn cvv_label(&self) -> String {
        self.raw(CVV_LABEL).unwrap_or_else(|| "CVV".to_string())
    }

    /// The style blob, or `{}` when it is missing or not valid JSON.
    pub fn form_styles(&self) -> String {
        match self.raw(FORM_STYLES) {
            Some(styles) if serde_json::from_str::<serde_json::Value>(&styles).is_ok() => styles,
            _ => "{}".to_string(),
        }
    }

    pub fn form_layout(&self) -> String {
        self.raw(FORM_LAYOUT).unwrap_or_else(|| "single".to_string())
    }

    pub fn images_path(&self) -> String {
        self.non_empty(IMAGES_PATH)
            .map(|path| path.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_IMAGES_PATH.to_string())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// Everything the card form needs to render, resolved for one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFormSettings {
    pub public_key: Option<String>,
    pub card_number_placeholder: Option<String>,
    pub expiry_month_placeholder: Option<String>,
    pub expiry_year_placeholder: Option<String>,
    pub cvv_placeholder: Option<String>,
    pub card_number_label: String,
    pub expiry_label: String,
    pub cvv_label: String,
    pub form_styles: String,
    pub form_layout: String,
    pub images_path: String,
    pub save_card_enabled: bool,
    pub vault_enabled: bool,
    pub debug_mode: bool,
    pub customer_logged_in: bool,
}

impl CardFormSettings {
    pub fn resolve(config: &CheckoutConfig<'_>, customer_logged_in: bool) -> Self {
        Self {
            public_key: config.public_key(),
            card_number_placeholder: config.card_number_placeholder(),
            expiry_month_placeholder: config.expiry_month_placeholder(),
            expiry_year_placeholder: config.expiry_year_placeholder(),
            cvv_placeholder: config.cvv_placeholder(),
            card_number_label: config.card_number_label(),
            expiry_label: config.expiry_label(),
            cvv_label: config.cvv_label(),
            form_styles: config.form_styles(),
            form_layout: config.form_layout(),
            images_path: config.images_path(),
            save_card_enabled: config.is_save_card_enabled(),
            vault_enabled: config.is_vault_enabled(),
            debug_mode: config.is_debug_mode_enabled(),
            customer_logged_in,
        }
    }

    /// The style blob decoded; it is validated on resolve, so this only
    /// fails for hand-built settings.
    pub fn styles(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.form_styles)
    }
}
