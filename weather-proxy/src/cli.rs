use std::{net::SocketAddr, path::PathBuf};

use clap::{Parser, Subcommand};
use weather_core::{Config, WeatherProxy};

use crate::{http, logging::{self, LogFormat}};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-proxy", version, about = "OpenWeather proxy")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve `GET /api/getData?city=<name>` over HTTP.
    Serve {
        /// Address to bind, e.g. "0.0.0.0:3000".
        #[arg(long)]
        listen: Option<SocketAddr>,

        /// Override the OpenWeather endpoint.
        #[arg(long)]
        upstream_url: Option<String>,
    },

    /// Run the handler once for a city and print status and body.
    Show {
        city: String,

        #[arg(long)]
        upstream_url: Option<String>,
    },

    /// Write the given settings into the config file.
    Configure {
        #[arg(long)]
        listen: Option<SocketAddr>,

        #[arg(long)]
        upstream_url: Option<String>,

        /// Name of the environment variable holding the API key.
        #[arg(long)]
        api_key_env: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        logging::init(self.log_format);

        let path = match self.config {
            Some(path) => path,
            None => Config::config_file_path()?,
        };
        let mut config = Config::load_from(&path)?;

        match self.command {
            Command::Serve {
                listen,
                upstream_url,
            } => {
                apply_overrides(&mut config, listen, upstream_url, None);
                http::serve(&config).await
            }
            Command::Show { city, upstream_url } => {
                apply_overrides(&mut config, None, upstream_url, None);

                println!("{}", show(&config, &city).await);
                Ok(())
            }
            Command::Configure {
                listen,
                upstream_url,
                api_key_env,
            } => {
                apply_overrides(&mut config, listen, upstream_url, api_key_env);
                config.save_to(&path)?;

                println!("Saved configuration to {}", path.display());
                Ok(())
            }
        }
    }
}

/// Status line followed by the body exactly as the HTTP endpoint would send it.
async fn show(config: &Config, city: &str) -> String {
    let resp = WeatherProxy::from_config(&config.upstream)
        .get_data(Some(city))
        .await;

    format!("{}\n{}", resp.status(), resp.into_body())
}

fn apply_overrides(
    config: &mut Config,
    listen: Option<SocketAddr>,
    upstream_url: Option<String>,
    api_key_env: Option<String>,
) {
    if let Some(listen) = listen {
        config.listen_addr = listen;
    }
    if let Some(url) = upstream_url {
        config.upstream.base_url = url;
    }
    if let Some(var) = api_key_env {
        config.upstream.api_key_env = var;
    }
}
