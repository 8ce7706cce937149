use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use payroll_engine::api::{create_router, AppState};
use payroll_engine::config::ConfigLoader;
use payroll_engine::logging;
use payroll_engine::store::{JsonEmployeeStore, JsonPeriodStore};

/// Payroll engine HTTP server
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding employees.json and the periods/ snapshots
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Path to the payroll YAML configuration
    #[arg(short, long, default_value = "config/payroll.yaml")]
    config: PathBuf,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init();

    let config = ConfigLoader::load_or_default(&args.config)?;
    let employees = JsonEmployeeStore::new(args.data_dir.join("employees.json"));
    let periods = JsonPeriodStore::new(args.data_dir.join("periods"));
    info!(
        data_dir = %args.data_dir.display(),
        bonus = %config.bonus,
        loan_deduction = %config.loan_deduction,
        contribution_rate = %config.contribution_rate,
        "Starting payroll engine"
    );

    let app = create_router(AppState::from_stores(employees, periods, config));

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
