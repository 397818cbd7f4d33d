//! Storefront CLI
//!
//! A small driver for the cart and checkout services, useful for poking a
//! commerce backend from a terminal.

use std::process;

use clap::{Args, Parser, Subcommand};
use vitrine::{
    checkout::{CheckoutDetails, Validate},
    payment::PaymentMethod,
    session::SessionContext,
};
use vitrine_app::{context::AppContext, domain::checkout::CheckoutOutcome};

#[derive(Debug, Parser)]
#[command(name = "vitrine-app", about = "Storefront CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Cart(CartCommand),
    Checkout(CheckoutCommand),
}

#[derive(Debug, Args)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Fetch and print the current cart
    Show(BackendArgs),
}

#[derive(Debug, Args)]
struct CheckoutCommand {
    #[command(subcommand)]
    command: CheckoutSubcommand,
}

#[derive(Debug, Subcommand)]
enum CheckoutSubcommand {
    /// Validate details, create an order and route the payment
    Submit(SubmitArgs),
}

#[derive(Debug, Args)]
struct BackendArgs {
    /// Commerce backend base URL
    #[arg(long, env = "VITRINE_BASE_URL")]
    base_url: String,

    /// Bearer token, as written by the login flow
    #[arg(long, env = "VITRINE_TOKEN")]
    token: Option<String>,

    /// Stored user JSON, as written by the login flow
    #[arg(long, env = "VITRINE_USER")]
    user: Option<String>,
}

#[derive(Debug, Args)]
struct SubmitArgs {
    #[command(flatten)]
    backend: BackendArgs,

    /// Recipient full name
    #[arg(long)]
    full_name: String,

    /// Contact email
    #[arg(long)]
    email: String,

    /// Contact phone number
    #[arg(long)]
    phone: String,

    /// Shipping country
    #[arg(long)]
    country: String,

    /// Shipping city
    #[arg(long)]
    city: String,

    /// Shipping street address
    #[arg(long)]
    street: String,

    /// Payment selection: "cod" or "CreditCard"
    #[arg(long, default_value = "cod")]
    payment: String,
}

#[tokio::main]
async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Cart(CartCommand {
            command: CartSubcommand::Show(args),
        }) => show_cart(args).await,
        Commands::Checkout(CheckoutCommand {
            command: CheckoutSubcommand::Submit(args),
        }) => submit_checkout(args).await,
    }
}

fn context(args: &BackendArgs) -> AppContext {
    let session = SessionContext::from_stored(args.user.as_deref(), args.token.clone());

    AppContext::new(args.base_url.clone(), session)
}

async fn show_cart(args: BackendArgs) -> Result<(), String> {
    let ctx = context(&args);
    let mut store = ctx.cart_store();

    let cart = store
        .load()
        .await
        .map_err(|error| format!("failed to load cart: {error}"))?;

    for line in cart.iter() {
        println!(
            "{}  {} x{} @ {}",
            line.line_id(),
            line.name(),
            line.quantity(),
            line.unit_price()
        );
    }

    println!("total: {}", cart.total());

    Ok(())
}

async fn submit_checkout(args: SubmitArgs) -> Result<(), String> {
    let payment: PaymentMethod = args
        .payment
        .parse()
        .map_err(|error| format!("invalid payment selection: {error}"))?;

    let details = CheckoutDetails {
        full_name: args.full_name,
        email: args.email,
        phone: args.phone,
        country: args.country,
        city: args.city,
        street: args.street,
        payment,
    };

    details
        .validate()
        .map_err(|error| format!("invalid checkout details: {error}"))?;

    let ctx = context(&args.backend);
    let flow = ctx.checkout_flow();

    let cart = flow
        .begin()
        .await
        .map_err(|error| format!("checkout unavailable: {error}"))?;

    let outcome = flow
        .submit(&cart, &details)
        .await
        .map_err(|error| format!("checkout failed: {error}"))?;

    match outcome {
        CheckoutOutcome::CashComplete { order_id } => {
            println!("order {order_id} placed; pay the courier on delivery");
        }
        CheckoutOutcome::AwaitingCardPayment {
            order_id,
            client_secret,
            total,
            ..
        } => {
            println!("order {order_id} awaiting card payment of {total}");
            println!("client secret: {client_secret}");
        }
    }

    Ok(())
}
