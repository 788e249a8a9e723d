//! Helium Stats API Gateway
//!
//! Serves the emission schedule math and cached on-chain account reads as
//! JSON for the network stats dashboard.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use base64::Engine as _;
use chrono::{DateTime, Utc};
use clap::Parser;
use helium_account_cache::{AccountFetchCache, FetchError, RpcAccountSource};
use helium_emissions::{
    latest_emissions, sub_network_schedule, EmissionSchedule, SubNetwork, TokenClass,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

#[derive(Parser)]
#[command(name = "helium-stats-api")]
#[command(about = "Helium network stats API gateway")]
#[command(version)]
struct Cli {
    /// Bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Bind port
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// JSON-RPC endpoint used for account reads
    #[arg(long, default_value = "https://api.mainnet-beta.solana.com")]
    node_rpc: String,
}

struct AppState {
    accounts: AccountFetchCache<RpcAccountSource>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let state = AppState {
        accounts: AccountFetchCache::new(RpcAccountSource::new(cli.node_rpc.clone())),
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .route("/api/emissions/:token", get(get_emissions))
        .route("/api/subnetwork/:network", get(get_sub_network))
        .route("/api/account/:address", get(get_account))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state));

    let addr = format!("{}:{}", cli.host, cli.port);
    tracing::info!("stats api listening on {}", addr);
    tracing::info!("account reads via {}", cli.node_rpc);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Deserialize)]
struct AtQuery {
    /// RFC 3339 instant to evaluate at; defaults to now.
    at: Option<String>,
}

fn parse_at(query: &AtQuery) -> Result<DateTime<Utc>, StatusCode> {
    match &query.at {
        None => Ok(Utc::now()),
        Some(raw) => raw
            .parse::<DateTime<Utc>>()
            .map_err(|_| StatusCode::BAD_REQUEST),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Serialize)]
struct EmissionsResponse {
    token: TokenClass,
    at: DateTime<Utc>,
    emission_year: i32,
    window_days: i64,
    daily_rate: f64,
    yearly_rate: f64,
    remaining: f64,
}

async fn get_emissions(
    Path(token): Path<String>,
    Query(query): Query<AtQuery>,
) -> Result<Json<EmissionsResponse>, StatusCode> {
    let token = TokenClass::from_slug(&token).ok_or(StatusCode::NOT_FOUND)?;
    let at = parse_at(&query)?;

    let schedule = EmissionSchedule::for_token(token);
    let k = schedule.calendar().emission_year_index(at);

    Ok(Json(EmissionsResponse {
        token,
        at,
        emission_year: k,
        window_days: schedule.calendar().window_day_count(k),
        daily_rate: schedule.daily_rate(at),
        yearly_rate: schedule.window_yearly_rate(k),
        remaining: schedule.remaining_emissions(at),
    }))
}

#[derive(Serialize)]
struct SubNetworkResponse {
    network: SubNetwork,
    at: DateTime<Utc>,
    emissions_per_epoch: f64,
}

async fn get_sub_network(
    Path(network): Path<String>,
    Query(query): Query<AtQuery>,
) -> Result<Json<SubNetworkResponse>, StatusCode> {
    let network = SubNetwork::from_slug(&network).ok_or(StatusCode::NOT_FOUND)?;
    let at = parse_at(&query)?;

    let emissions_per_epoch = latest_emissions(sub_network_schedule(network), at)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(SubNetworkResponse {
        network,
        at,
        emissions_per_epoch,
    }))
}

#[derive(Serialize)]
struct AccountResponse {
    address: String,
    owner: String,
    slot: u64,
    data_len: usize,
    data_base64: String,
}

async fn get_account(
    Path(address): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<AccountResponse>, StatusCode> {
    let raw = state
        .accounts
        .fetch_raw(&address, false)
        .await
        .map_err(|e| match e {
            FetchError::AccountNotFound(_) => StatusCode::NOT_FOUND,
            FetchError::MissingAddress => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        })?;

    Ok(Json(AccountResponse {
        address,
        owner: raw.owner.clone(),
        slot: raw.slot,
        data_len: raw.data.len(),
        data_base64: base64::engine::general_purpose::STANDARD.encode(&raw.data),
    }))
}
