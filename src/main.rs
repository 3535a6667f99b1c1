use card_checkout::application::card_holder::card_holder_details;
use card_checkout::application::place_order::PlaceOrderService;
use card_checkout::application::vault_renderer::VaultRenderer;
use card_checkout::domain::config::{CardFormSettings, CheckoutConfig, Scope};
use card_checkout::domain::ports::{ConfigProviderRef, OrderRepository, SessionStore};
use card_checkout::infrastructure::html_renderer::HtmlCardRenderer;
use card_checkout::infrastructure::in_memory::{
    InMemoryOrderStore, InMemorySessionStore, InMemoryVaultStore,
};
use card_checkout::infrastructure::scripted_gateway::ScriptedGateway;
use card_checkout::infrastructure::static_config::StaticConfig;
use card_checkout::interfaces::csv::vault_token_reader::VaultTokenReader;
use card_checkout::interfaces::scenario::Scenario;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Store configuration JSON (default and per-store values)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store code used for configuration lookups
    #[arg(long, global = true)]
    store: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a checkout scenario and place its order
    PlaceOrder {
        /// Scenario JSON: quote, payment selection, gateway replies
        scenario: PathBuf,
    },
    /// Render a customer's stored cards, one fragment per line
    ListCards {
        /// Vault tokens CSV
        #[arg(long)]
        tokens: PathBuf,
        #[arg(long)]
        customer: u32,
    },
    /// Print the card holder name for a scenario's billing address
    CardHolder { scenario: PathBuf },
    /// Print the resolved card form settings
    FormSettings {
        #[arg(long)]
        logged_in: bool,
    },
}

fn load_config(path: Option<&Path>) -> Result<StaticConfig> {
    match path {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            StaticConfig::from_reader(file).into_diagnostic()
        }
        None => Ok(StaticConfig::new()),
    }
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let file = File::open(path).into_diagnostic()?;
    Scenario::from_reader(file).into_diagnostic()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let scope = cli.store.map(Scope::Store).unwrap_or_default();
    let config: ConfigProviderRef = Arc::new(load_config(cli.config.as_deref())?);

    match cli.command {
        Command::PlaceOrder { scenario } => {
            let scenario = load_scenario(&scenario)?;

            let sessions = InMemorySessionStore::new();
            sessions.save(scenario.session()).await.into_diagnostic()?;

            let orders = InMemoryOrderStore::new();
            let gateway = ScriptedGateway::with_replies(scenario.gateway_responses.clone());
            let service = PlaceOrderService::new(
                config,
                Box::new(orders.clone()),
                Box::new(orders.clone()),
                Box::new(gateway),
            )
            .with_scope(scope);

            let mut session = sessions
                .load(&scenario.session_id)
                .await
                .into_diagnostic()?
                .ok_or_else(|| miette!("session {} not found", scenario.session_id))?;
            let outcome = service.place_order(&scenario.quote, &mut session).await;
            let messages = session.take_messages();
            sessions.save(session).await.into_diagnostic()?;

            print_json(&serde_json::json!({
                "outcome": outcome,
                "redirect_path": outcome.redirect.path(),
                "messages": messages,
                "orders": orders.all().await.into_diagnostic()?,
            }))?;
        }
        Command::ListCards { tokens, customer } => {
            let file = File::open(tokens).into_diagnostic()?;
            let vault = InMemoryVaultStore::new();
            for token in VaultTokenReader::new(file).tokens() {
                match token {
                    Ok(token) => vault.add(token).await,
                    Err(e) => warn!(error = %e, "Error reading vault token"),
                }
            }

            let images_path = CheckoutConfig::new(config.as_ref(), &scope).images_path();
            let renderer = VaultRenderer::new(
                config.clone(),
                Box::new(vault),
                HtmlCardRenderer::new(images_path),
            )
            .with_scope(scope);

            for fragment in renderer.list_cards(customer).await.into_diagnostic()? {
                println!("{fragment}");
            }
        }
        Command::CardHolder { scenario } => {
            let scenario = load_scenario(&scenario)?;
            print_json(&card_holder_details(&scenario.quote))?;
        }
        Command::FormSettings { logged_in } => {
            let view = CheckoutConfig::new(config.as_ref(), &scope);
            print_json(&CardFormSettings::resolve(&view, logged_in))?;
        }
    }

    Ok(())
}
