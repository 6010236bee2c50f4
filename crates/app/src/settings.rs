//! Handles settings for the application. Configuration is written in
//! `config/morelife.toml` and can be overridden with `MORELIFE__*`
//! environment variables (e.g. `MORELIFE__SERVER__PORT=8080`).
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use gateway::Provider;
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/morelife";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Completion {
    pub provider: Provider,
    pub model: Option<String>,
    /// Falls back to `OPENAI_API_KEY` / `GEMINI_API_KEY` when unset.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for Completion {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: None,
            api_key: None,
            base_url: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub completion: Completion,
}

#[derive(Debug, Parser)]
#[command(name = "morelife")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long, env = "MORELIFE_CONFIG")]
    config: Option<String>,
    /// Override the listening port.
    #[arg(long)]
    port: Option<u16>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();

        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix("MORELIFE").separator("__"))
            .build()?;

        let mut settings: Settings = settings.try_deserialize()?;
        if let Some(port) = args.port {
            settings.server.port = port;
        }

        Ok(settings)
    }
}
