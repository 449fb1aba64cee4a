use std::net::SocketAddr;
use std::str::FromStr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trains_skill::cache::{CacheConfig, CachedScheduleProvider};
use trains_skill::home::{HomeStationStore, HomeStoreError};
use trains_skill::njtransit::{MockNjtClient, NjtClient, NjtConfig, NjtSource, ScheduleError};
use trains_skill::planner::{Engine, MatchConfig};
use trains_skill::skill::{AppState, SkillConfig, create_router};
use trains_skill::stations::{StationCache, StationCacheConfig, StationError, load_stations};

/// Errors that stop the server from starting.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("invalid {var}: {message}")]
    Config { var: &'static str, message: String },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Stations(#[from] StationError),

    #[error(transparent)]
    HomeStore(#[from] HomeStoreError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse an optional environment variable.
fn env_parse<T>(var: &'static str) -> Result<Option<T>, StartupError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim()
                .parse()
                .map(Some)
                .map_err(|e: T::Err| StartupError::Config {
                    var,
                    message: e.to_string(),
                })
        }
        _ => Ok(None),
    }
}

fn env_string(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn schedule_source() -> Result<NjtSource, StartupError> {
    if let Some(dir) = env_string("NJT_MOCK_DIR") {
        info!(dir = %dir, "serving schedules from mock data");
        return Ok(NjtSource::Mock(MockNjtClient::new(dir)?));
    }

    let username = env_string("NJT_USERNAME").unwrap_or_else(|| {
        warn!("NJT_USERNAME not set, API calls will fail");
        String::new()
    });
    let apikey = env_string("NJT_APIKEY").unwrap_or_else(|| {
        warn!("NJT_APIKEY not set, API calls will fail");
        String::new()
    });

    let mut config = NjtConfig::new(username, apikey);
    if let Some(url) = env_string("NJT_BASE_URL") {
        config = config.with_base_url(url);
    }
    Ok(NjtSource::Live(NjtClient::new(config)?))
}

fn match_config() -> Result<MatchConfig, StartupError> {
    let mut config = MatchConfig::default();
    if let Some(mins) = env_parse("MIN_TRANSFER_MINS")? {
        config = config.with_min_transfer(mins);
    }
    if let Some(mins) = env_parse("MAX_TRANSFER_MINS")? {
        config = config.with_max_transfer(Some(mins));
    }
    Ok(config)
}

fn skill_config() -> Result<SkillConfig, StartupError> {
    let mut config = SkillConfig::default();
    if let Some(addr) = env_parse::<SocketAddr>("SKILL_BIND_ADDR")? {
        config = config.with_bind_addr(addr);
    }
    if let Some(path) = env_string("HOME_STORE_PATH") {
        config = config.with_home_store_path(path);
    }
    if let Some(path) = env_string("STATION_CACHE_PATH") {
        config = config.with_station_cache_path(path);
    }
    Ok(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

async fn run() -> Result<(), StartupError> {
    let config = skill_config()?;
    let source = schedule_source()?;

    let station_cache = config
        .station_cache_path
        .as_ref()
        .map(|path| StationCache::new(StationCacheConfig::new(path)));
    let stations = load_stations(&source, station_cache.as_ref()).await?;
    info!(count = stations.len(), "station directory ready");

    let homes = match &config.home_store_path {
        Some(path) => HomeStationStore::open(path).await?,
        None => {
            warn!("HOME_STORE_PATH not set, home stations are kept in memory only");
            HomeStationStore::in_memory()
        }
    };

    let provider = CachedScheduleProvider::new(source, &CacheConfig::default());
    let engine = Engine::new(provider, stations, match_config()?);
    let app = create_router(AppState::new(engine, homes));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Jersey Trains skill listening");
    info!("  POST /skill   - voice platform webhook");
    info!("  GET  /health  - health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trains_skill=info")),
        )
        .init();

    match run().await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            std::process::ExitCode::FAILURE
        }
    }
}
