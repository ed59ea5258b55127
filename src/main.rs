use bingwa::application::flow::PurchaseFlow;
use bingwa::config::{Config, DEFAULT_ENDPOINT, DEFAULT_USER_ID};
use bingwa::domain::catalog::Catalog;
use bingwa::domain::offer::{Category, Offer};
use bingwa::domain::ports::TransactionLog;
use bingwa::domain::purchase::PurchaseOutcome;
use bingwa::error::FlowError;
use bingwa::infrastructure::http::HttpPurchaseService;
use bingwa::infrastructure::in_memory::InMemoryTransactionLog;
use bingwa::interfaces::csv::order_reader::OrderReader;
use bingwa::interfaces::csv::report_writer::ReportWriter;
use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Purchase endpoint the orders are posted to
    #[arg(long, global = true, env = "BINGWA_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Account identifier sent with every purchase
    #[arg(long, global = true, env = "BINGWA_USER_ID", default_value_t = DEFAULT_USER_ID)]
    user_id: u64,

    /// JSON catalog to use instead of the built-in offers
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the purchasable offers
    Catalog {
        /// Only list this category
        #[arg(long, value_enum)]
        category: Option<Category>,
    },
    /// Buy a single offer
    Purchase {
        #[arg(value_enum)]
        category: Category,
        /// Offer id within the category, e.g. b1
        offer: String,
        /// Phone number to receive the bundle
        #[arg(long)]
        recipient: String,
        /// M-Pesa phone number to pay from
        #[arg(long)]
        payer: String,
    },
    /// Buy every order listed in a CSV file (category, offer, recipient, payer)
    Batch {
        /// Input orders CSV file
        input: PathBuf,
    },
}

/// Takes one offer through the whole flow and back to idle.
async fn run_order<'c>(
    flow: &PurchaseFlow<'c>,
    offer: &'c Offer,
    recipient: &str,
    payer: &str,
) -> std::result::Result<PurchaseOutcome, FlowError> {
    flow.open(offer).await?;
    match fill_and_submit(flow, recipient, payer).await {
        Ok(outcome) => {
            flow.dismiss_result().await?;
            Ok(outcome)
        }
        Err(e) => {
            flow.cancel().await?;
            Err(e)
        }
    }
}

async fn fill_and_submit(
    flow: &PurchaseFlow<'_>,
    recipient: &str,
    payer: &str,
) -> std::result::Result<PurchaseOutcome, FlowError> {
    flow.set_recipient_phone(recipient).await?;
    flow.set_payer_phone(payer).await?;
    flow.submit().await
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::new(cli.endpoint, cli.user_id);

    let catalog = match cli.catalog {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            Catalog::from_json(file).into_diagnostic()?
        }
        None => Catalog::builtin(),
    };

    let log = InMemoryTransactionLog::new();
    let flow = PurchaseFlow::new(
        Arc::new(HttpPurchaseService::new(config.endpoint.clone())),
        Arc::new(log.clone()),
        config.user_id,
    );
    tracing::debug!(endpoint = %config.endpoint, user_id = config.user_id, "purchase flow ready");

    let stdout = io::stdout();
    match cli.command {
        Command::Catalog { category } => {
            let categories = category.map_or_else(|| Category::ALL.to_vec(), |c| vec![c]);
            ReportWriter::new(stdout.lock())
                .write_offers(&catalog, &categories)
                .into_diagnostic()?;
            return Ok(());
        }
        Command::Purchase {
            category,
            offer,
            recipient,
            payer,
        } => {
            let offer = catalog.get(category, &offer).into_diagnostic()?;
            let outcome = run_order(&flow, offer, &recipient, &payer)
                .await
                .into_diagnostic()?;
            println!("Purchase Status: {}", outcome.text());
        }
        Command::Batch { input } => {
            let file = File::open(input).into_diagnostic()?;
            let reader = OrderReader::new(file);
            for order_result in reader.orders() {
                let order = match order_result {
                    Ok(order) => order,
                    Err(e) => {
                        eprintln!("Error reading order: {}", e);
                        continue;
                    }
                };
                let offer = match catalog.get(order.category, &order.offer) {
                    Ok(offer) => offer,
                    Err(e) => {
                        eprintln!("Error processing order: {}", e);
                        continue;
                    }
                };
                if let Err(e) = run_order(&flow, offer, &order.recipient, &order.payer).await {
                    eprintln!("Error processing order: {}", e);
                }
            }
        }
    }

    let history = log.read_all().await;
    ReportWriter::new(stdout.lock())
        .write_history(&history)
        .into_diagnostic()?;

    Ok(())
}
