//! All the CLI arguments for the simulation

use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr as _};

use crate::params::{ColorScheme, ConfigFile, ParamUpdate};

/// A growing and dying swarm of charged particles
#[derive(clap::Parser, Debug, Clone)]
#[command(version, about)]
pub struct CliArgs {
    /// Path to a TOML file of simulation parameters.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override a parameter, eg `--set repulsionDistance=40`. Can be repeated.
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
    pub overrides: Vec<String>,

    /// Start with the simulation paused.
    #[arg(long)]
    pub paused: bool,

    /// Color scheme to start with.
    #[arg(long, value_enum)]
    pub scheme: Option<ColorScheme>,

    /// Log level, used when `BOIDS_LOG` isn't set.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl CliArgs {
    /// The config file (or the defaults) with every command line override applied.
    pub fn resolve_config(&self) -> Result<ConfigFile> {
        let mut config = match &self.config {
            Some(path) => {
                let config = ConfigFile::load(path)?;
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            None => ConfigFile::default(),
        };

        for assignment in &self.overrides {
            ParamUpdate::parse_assignment(assignment)
                .wrap_err("Bad `--set` argument")?
                .apply(&mut config.params);
        }

        if self.paused {
            config.params.paused = true;
        }
        if let Some(scheme) = self.scheme {
            config.color_scheme = scheme;
        }

        Ok(config)
    }
}
