use clap::Parser;
use miette::{IntoDiagnostic, Result, miette};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zenith_broking::application::processor::TransactionProcessor;
use zenith_broking::config::Config;
use zenith_broking::domain::ports::{
    AdminStoreRef, ClientStoreRef, PayoutGatewayRef, TransactionLogStoreRef,
};
use zenith_broking::infrastructure::in_memory::{
    InMemoryAdminStore, InMemoryClientStore, InMemoryLogStore,
};
use zenith_broking::infrastructure::quotes::QuoteProxy;
use zenith_broking::infrastructure::razorpay::RazorpayGateway;
use zenith_broking::interfaces::http::auth::AuthSettings;
use zenith_broking::interfaces::http::router::{AppState, app};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[cfg(feature = "storage-rocksdb")]
    #[arg(long)]
    db_path: Option<std::path::PathBuf>,
}

struct Stores {
    clients: ClientStoreRef,
    logs: TransactionLogStoreRef,
    admins: AdminStoreRef,
}

fn in_memory_stores() -> Stores {
    Stores {
        clients: Arc::new(InMemoryClientStore::new()),
        logs: Arc::new(InMemoryLogStore::new()),
        admins: Arc::new(InMemoryAdminStore::new()),
    }
}

#[cfg(feature = "storage-rocksdb")]
fn select_stores(cli: &Cli) -> Result<Stores> {
    match &cli.db_path {
        Some(path) => {
            let store =
                zenith_broking::infrastructure::rocksdb::RocksStore::open(path).into_diagnostic()?;
            Ok(Stores {
                clients: Arc::new(store.clone()),
                logs: Arc::new(store.clone()),
                admins: Arc::new(store),
            })
        }
        None => Ok(in_memory_stores()),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn select_stores(_cli: &Cli) -> Result<Stores> {
    Ok(in_memory_stores())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zenith_broking=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().map_err(|e| miette!("{e}"))?;

    let stores = select_stores(&cli)?;

    let gateway: PayoutGatewayRef = Arc::new(
        RazorpayGateway::new(
            &config.razorpay.base_url,
            &config.razorpay.key_id,
            &config.razorpay.key_secret,
            &config.razorpay.source_account,
            &config.razorpay.fund_account_id,
        )
        .into_diagnostic()?,
    );

    let processor = Arc::new(TransactionProcessor::new(
        stores.clients.clone(),
        stores.logs.clone(),
        gateway,
    ));

    let quotes = Arc::new(
        QuoteProxy::new("https://api.twelvedata.com", config.twelve_data_key.clone())
            .into_diagnostic()?,
    );

    let state = AppState {
        processor,
        clients: stores.clients,
        admins: stores.admins,
        quotes,
        auth: AuthSettings {
            secret: config.jwt_secret.clone(),
            expires_minutes: config.jwt_expires_minutes,
        },
    };

    let router = app(state, &config.frontend_origin);

    let listener = TcpListener::bind(cli.bind).await.into_diagnostic()?;
    tracing::info!(addr = %cli.bind, "Zenith Broking API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            signal::ctrl_c().await.ok();
            tracing::info!("shutdown signal received");
        })
        .await
        .into_diagnostic()?;

    Ok(())
}
