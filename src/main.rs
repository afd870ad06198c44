use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use labledger::application::processor::PaymentProcessor;
use labledger::domain::filter::{ViewFilters, apply_filters};
use labledger::domain::order::{Order, PaymentStatus};
use labledger::domain::payment::{MethodConfig, Payment, PaymentMethod};
use labledger::domain::ports::{OrderRepository, PaymentRepository};
use labledger::domain::projection::{Surface, project};
use labledger::domain::reconcile::reconcile;
use labledger::infrastructure::in_memory::{InMemoryOrderRepository, InMemoryPaymentRepository};
use labledger::interfaces::csv::{PaymentReader, ViewWriter};
use labledger::interfaces::json::OrderReader;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Order collection JSON file
    orders: PathBuf,

    /// Payment collection CSV file
    payments: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reconcile the collections and print the filtered view
    Report {
        /// Case-insensitive search over order id and patient name
        #[arg(long)]
        search: Option<String>,

        /// Payment statuses to keep (paid, unpaid); repeatable
        #[arg(long = "status")]
        statuses: Vec<String>,

        /// Payment methods to keep (cash, credit-card, ...); repeatable
        #[arg(long = "method")]
        methods: Vec<String>,

        /// Start of the order-date range (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End of the order-date range (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Presentation surface (table, card)
        #[arg(long, default_value = "table", value_parser = ["table", "card"])]
        surface: String,
    },

    /// Settle one order in full and print the refreshed view
    Settle {
        /// Order to settle
        #[arg(long)]
        order: i64,

        /// Payment method (defaults to the first enabled method)
        #[arg(long)]
        method: Option<String>,

        /// Free-text note on the payment
        #[arg(long)]
        notes: Option<String>,
    },
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
    let orders = load_orders(&cli.orders)?;
    let payments = load_payments(&cli.payments)?;

    match cli.command {
        Command::Report {
            search,
            statuses,
            methods,
            from,
            to,
            surface,
        } => {
            let views = reconcile(&orders, &payments);
            let filters = build_filters(search, &statuses, &methods, from, to);
            let rows = apply_filters(&views, &filters);

            let surface = match surface.as_str() {
                "card" => Surface::Card,
                _ => Surface::Table,
            };
            let projected: Vec<_> = rows.iter().map(|v| project(v, surface)).collect();

            let stdout = io::stdout();
            ViewWriter::new(stdout.lock())
                .write_rows(&projected, surface)
                .into_diagnostic()?;
        }
        Command::Settle {
            order,
            method,
            notes,
        } => {
            let order_repo = Arc::new(InMemoryOrderRepository::seeded(orders));
            let payment_repo = Arc::new(InMemoryPaymentRepository::seeded(payments));
            let config = MethodConfig::default();
            let method = match method {
                Some(value) => value.parse::<PaymentMethod>().into_diagnostic()?,
                None => config.default_method(),
            };

            let target = order_repo
                .list()
                .await
                .into_diagnostic()?
                .into_iter()
                .find(|o| o.id == order)
                .ok_or_else(|| miette::miette!("order {order} not found"))?;

            let processor =
                PaymentProcessor::new(order_repo.clone(), payment_repo.clone(), config);
            let payment = processor
                .submit(&target, method, notes.as_deref())
                .await
                .into_diagnostic()?;
            // The backend flips the order on settlement; the in-memory
            // adapter needs a nudge.
            order_repo.mark_paid(payment.order_id).await;

            let views = reconcile(
                &order_repo.list().await.into_diagnostic()?,
                &payment_repo.list().await.into_diagnostic()?,
            );
            let projected: Vec<_> = views.iter().map(|v| project(v, Surface::Table)).collect();

            let stdout = io::stdout();
            ViewWriter::new(stdout.lock())
                .write_rows(&projected, Surface::Table)
                .into_diagnostic()?;
        }
    }

    Ok(())
}

fn load_orders(path: &Path) -> Result<Vec<Order>> {
    let file = File::open(path).into_diagnostic()?;
    OrderReader::new(file).orders().into_diagnostic()
}

fn load_payments(path: &Path) -> Result<Vec<Payment>> {
    let file = File::open(path).into_diagnostic()?;
    let mut payments = Vec::new();
    for result in PaymentReader::new(file).payments() {
        match result {
            Ok(payment) => payments.push(payment),
            Err(e) => {
                eprintln!("Error reading payment: {}", e);
            }
        }
    }
    Ok(payments)
}

/// Unrecognized filter values degrade to "filter not applied".
fn build_filters(
    search: Option<String>,
    statuses: &[String],
    methods: &[String],
    from: Option<String>,
    to: Option<String>,
) -> ViewFilters {
    ViewFilters {
        search,
        statuses: statuses
            .iter()
            .filter_map(|s| lenient(s.parse::<PaymentStatus>(), "payment status", s))
            .collect(),
        methods: methods
            .iter()
            .filter_map(|m| lenient(m.parse::<PaymentMethod>(), "payment method", m))
            .collect(),
        from: from
            .as_deref()
            .and_then(|d| lenient(d.parse::<NaiveDate>(), "date", d)),
        to: to
            .as_deref()
            .and_then(|d| lenient(d.parse::<NaiveDate>(), "date", d)),
    }
}

fn lenient<T, E>(parsed: std::result::Result<T, E>, kind: &str, value: &str) -> Option<T> {
    match parsed {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(value, "ignoring unrecognized {kind} filter");
            None
        }
    }
}
