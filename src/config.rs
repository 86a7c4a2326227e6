use crate::error::{PlantOpsError, Result};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub user: UserConfig,
    pub backend: BackendConfig,
    pub device: Option<DeviceConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserConfig {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the user-profile backend (GET {base}/users/{email}).
    pub profile_url: String,
    /// Full URL of the weather proxy endpoint (POST {latitude, longitude}).
    pub weather_url: String,
}

/// Optional fixed coordinates standing in for a device location fix.
/// Used as the last resolution source before giving up.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct DeviceConfig {
    pub latitude: f64,
    pub longitude: f64,
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(PlantOpsError::Config(format!(
                "Config file not found at {:?}. Run `plantops init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| PlantOpsError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| PlantOpsError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("plantops").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| PlantOpsError::Config("Cannot determine config directory".into()))?
            .join("plantops")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/plantops/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlantOpsError::Config("Cannot determine config directory".into()))?
            .join("plantops");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("No configuration found. Let's set up PlantOps!");
        println!();

        println!("User");
        let email: String = Input::new()
            .with_prompt("  Email")
            .interact_text()
            .map_err(|e| PlantOpsError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Backend");
        let profile_url: String = Input::new()
            .with_prompt("  Profile backend base URL")
            .default("https://api.plantops.example".into())
            .interact_text()
            .map_err(|e| PlantOpsError::Config(format!("Input error: {}", e)))?;

        let weather_url: String = Input::new()
            .with_prompt("  Weather proxy URL")
            .default("https://api.plantops.example/weather-get".into())
            .interact_text()
            .map_err(|e| PlantOpsError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Device location (leave latitude blank to skip)");
        let lat_input: String = Input::new()
            .with_prompt("  Latitude")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| PlantOpsError::Config(format!("Input error: {}", e)))?;

        let device = if lat_input.trim().is_empty() {
            None
        } else {
            let latitude: f64 = lat_input.trim().parse().map_err(|_| {
                PlantOpsError::Config(format!("Invalid latitude '{}'", lat_input))
            })?;
            let longitude: f64 = Input::new()
                .with_prompt("  Longitude")
                .interact_text()
                .map_err(|e| PlantOpsError::Config(format!("Input error: {}", e)))?;
            Some(DeviceConfig {
                latitude,
                longitude,
            })
        };

        println!();

        let config = Config {
            user: UserConfig { email },
            backend: BackendConfig {
                profile_url,
                weather_url,
            },
            device,
        };

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| PlantOpsError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# PlantOps Configuration\n# Generated by `plantops init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        // Then check env var
        if let Ok(dir) = std::env::var("PLANTOPS_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        // Use XDG data directory
        let data_dir = dirs::data_dir()
            .ok_or_else(|| PlantOpsError::Config("Cannot determine data directory".into()))?
            .join("plantops");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("plantops.db"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user: UserConfig {
                email: String::new(),
            },
            backend: BackendConfig {
                profile_url: "https://api.plantops.example".into(),
                weather_url: "https://api.plantops.example/weather-get".into(),
            },
            device: None,
        }
    }
}
