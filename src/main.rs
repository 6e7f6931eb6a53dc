use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};

use greek_payroll::api::{AppState, CalculationRequest, create_router};
use greek_payroll::calculation::calculate_payroll;
use greek_payroll::config::ConfigLoader;
use greek_payroll::summary::Summary;

/// Greek salary calculator: contributions, income tax and net pay
#[derive(Parser)]
#[command(name = "greek-payroll")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration directory
    #[arg(short, long, default_value = "./config/gr", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Address to bind to
        #[arg(long, env = "PAYROLL_ADDR", default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
    /// Calculate one salary and print the summary
    Calculate {
        /// Annual gross salary in euros
        #[arg(short, long)]
        gross: Decimal,

        /// Number of salary payments per year (defaults to the tax year's default)
        #[arg(short, long)]
        payments: Option<u32>,

        /// Apply the 50% tax-residency-transfer exemption
        #[arg(short, long)]
        moving_residency: bool,

        /// Tax year (defaults to the latest configured year)
        #[arg(short, long)]
        tax_year: Option<i32>,

        /// Print the breakdown as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .with_writer(std::io::stderr)
        .init();

    debug!("greek-payroll started with verbosity level: {}", cli.verbose);

    let loader = ConfigLoader::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    match cli.command {
        Commands::Serve { addr } => serve(loader, addr).await,
        Commands::Calculate {
            gross,
            payments,
            moving_residency,
            tax_year,
            json,
        } => calculate(
            &loader,
            CalculationRequest {
                gross_annual: gross,
                payment_count: payments,
                moving_residency,
                tax_year,
            },
            json,
        ),
    }
}

async fn serve(loader: ConfigLoader, addr: SocketAddr) -> anyhow::Result<()> {
    let latest = loader.latest_tax_year().year;
    let router = create_router(AppState::new(loader));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, latest_tax_year = latest, "Payroll API listening");

    axum::serve(listener, router).await?;
    Ok(())
}

fn calculate(loader: &ConfigLoader, request: CalculationRequest, json: bool) -> anyhow::Result<()> {
    let tax_year = loader.resolve_tax_year(request.tax_year)?;
    let input = request.into_input(tax_year);

    let Some(calculation) = calculate_payroll(&input, tax_year)? else {
        println!("Gross salary is zero: nothing to compute.");
        return Ok(());
    };

    if json {
        let body = serde_json::json!({
            "tax_year": tax_year.year,
            "breakdown": calculation.breakdown,
            "distribution": calculation.distribution,
            "warnings": calculation.warnings,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("Tax year {}", tax_year.year);
        println!();
        print!(
            "{}",
            Summary::new(&calculation.breakdown, &calculation.distribution)
        );
    }

    Ok(())
}
