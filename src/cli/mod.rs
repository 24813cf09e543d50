use crate::{
    config::{parse_addr, parse_timeout, Config},
    server::Server,
    Planner,
};
use clap::{Arg, ArgMatches, Command};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn command() -> Command {
    Command::new("trip-planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Serve POST /generate: natural-language trip requests in, validated itineraries out")
        .arg(
            Arg::new("addr")
                .short('a')
                .long("addr")
                .value_name("HOST:PORT")
                .help("Address to bind (or set TRIP_PLANNER_ADDR)"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Gemini model to use (or set GEMINI_MODEL)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Generative Language API root (or set GEMINI_BASE_URL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Timeout for each model call; none by default (or set TRIP_PLANNER_TIMEOUT_SECS)"),
        )
}

/// Apply command-line overrides on top of the environment configuration
fn apply_overrides(mut config: Config, matches: &ArgMatches) -> crate::Result<Config> {
    if let Some(addr) = matches.get_one::<String>("addr") {
        config = config.with_addr(parse_addr(addr)?);
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model(model.as_str());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(timeout) = matches.get_one::<String>("timeout") {
        config = config.with_request_timeout(Some(parse_timeout(timeout)?));
    }
    Ok(config)
}

/// CLI entry point for the trip-planner server
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = command().get_matches();

    // A missing credential stops the process before anything binds
    let config = apply_overrides(Config::from_env()?, &matches)?;

    info!("Using model: {}", config.model);
    info!("Base URL: {}", config.base_url);
    match config.request_timeout {
        Some(timeout) => info!("Model call timeout: {}s", timeout.as_secs()),
        None => info!("Model call timeout: none"),
    }

    let planner = Planner::from_config(&config);
    let server = Server::start(config.addr, planner).await?;
    info!("Listening on http://{}", server.addr());

    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", err);
    }

    info!("Shutting down");
    server.stop().await.map_err(anyhow::Error::msg)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::API_KEY_VAR;
    use std::time::Duration;

    fn base_config() -> Config {
        Config::from_lookup(|name| (name == API_KEY_VAR).then(|| "key".to_string()))
            .unwrap()
    }

    #[test]
    fn test_flags_override_environment() {
        let matches = command().get_matches_from([
            "trip-planner",
            "--addr",
            "0.0.0.0:9001",
            "--model",
            "gemini-2.0-flash",
            "--timeout",
            "45",
        ]);
        let config = apply_overrides(base_config(), &matches).unwrap();
        assert_eq!(config.addr.port(), 9001);
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(45)));
    }

    #[test]
    fn test_no_flags_keeps_environment() {
        let matches = command().get_matches_from(["trip-planner"]);
        let config = apply_overrides(base_config(), &matches).unwrap();
        assert_eq!(config.addr.port(), 8000);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_bad_flag_value() {
        let matches = command().get_matches_from(["trip-planner", "--timeout", "soon"]);
        let err = apply_overrides(base_config(), &matches).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
