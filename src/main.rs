mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use plantops::config::Config;
use plantops::datasources::{ConfiguredDeviceLocation, UserProfileClient, WeatherProxyClient};
use plantops::db::Database;
use plantops::error::Result;
use plantops::logic::{AdvisoryEngine, LocationResolver, WeatherService};
use plantops::models::{GeoPoint, PlantDueEntry};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Interactive setup on first run or explicit `init`
    let run_init = matches!(cli.command, Some(Commands::Init));
    let config = if run_init || !Config::exists(cli.config.as_ref()) {
        let (config, _) = Config::setup_interactive()?;
        config
    } else {
        match Config::load(cli.config.clone()) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                eprintln!("Run `plantops init` to set up.");
                std::process::exit(1);
            }
        }
    };

    let db = Database::open(&Config::db_path(cli.data_dir.as_ref())?)?;

    // Keep the stored identifier in sync with the configured user so the
    // resolver's backend-fetch step can find it.
    if !config.user.email.is_empty() {
        db.set_user_email(&config.user.email)?;
    }

    let result = match cli.command {
        Some(Commands::Init) => {
            println!("Setup complete. Run `plantops advise` to get watering advice.");
            Ok(())
        }
        Some(Commands::Check) => check(&config).await,
        Some(Commands::Advise { plants }) => advise(&config, &db, plants).await,
        None => advise(&config, &db, None).await,
    };

    // All failure kinds surface to the user the same way; the log line is
    // what distinguishes them for operators.
    if let Err(e) = result {
        tracing::error!(error = %e, "Refresh failed");
        eprintln!("Weather advice unavailable - follow your regular watering schedule.");
        std::process::exit(1);
    }

    Ok(())
}

async fn check(config: &Config) -> Result<()> {
    let profiles = UserProfileClient::new(config.backend.profile_url.as_str());
    let profile_ok = profiles
        .test_connection(&config.user.email)
        .await
        .unwrap_or(false);
    println!(
        "Profile backend: {}",
        if profile_ok { "OK" } else { "UNAVAILABLE" }
    );

    let probe = match config.device {
        Some(device) => GeoPoint::new(device.latitude, device.longitude, "probe", "probe")?,
        None => GeoPoint::new(0.0, 0.0, "probe", "probe")?,
    };
    let weather = WeatherProxyClient::new(config.backend.weather_url.as_str())?;
    let weather_ok = weather.test_connection(&probe).await.unwrap_or(false);
    println!(
        "Weather proxy:   {}",
        if weather_ok { "OK" } else { "UNAVAILABLE" }
    );

    Ok(())
}

async fn advise(config: &Config, db: &Database, plants_path: Option<PathBuf>) -> Result<()> {
    let plants = load_plants(plants_path)?;

    let resolver = LocationResolver::new(
        db.clone(),
        UserProfileClient::new(config.backend.profile_url.as_str()),
        ConfiguredDeviceLocation::new(config.device),
    );
    let point = resolver.resolve().await?;

    let mut weather = WeatherService::new(WeatherProxyClient::new(
        config.backend.weather_url.as_str(),
    )?);
    let snapshot = weather.get_weather(&point).await?;

    let advice = AdvisoryEngine::new().generate_advice(&snapshot, &plants)?;

    println!("Location:   {}", point);
    println!(
        "Conditions: {}, {}°C (feels like {}°C), {:.0}% humidity",
        snapshot.current.description,
        snapshot.current.temperature_c,
        snapshot.current.feels_like_c,
        snapshot.current.humidity_percent
    );
    println!(
        "Urgency:    {} [{} / {}]",
        advice.urgency, advice.icon, advice.color
    );
    println!();
    println!("{}", advice.general);

    Ok(())
}

fn load_plants(path: Option<PathBuf>) -> Result<Vec<PlantDueEntry>> {
    match path {
        Some(p) => {
            let raw = std::fs::read_to_string(&p)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(Vec::new()),
    }
}
