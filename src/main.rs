use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;

use planetarium::{
    config::{CameraMode, Config, Overrides, Preset},
    data::fetch_organisations,
    layout::Placer,
    PlanetariumApp,
};

/// Planetarium: organisations from a GraphQL endpoint rendered as planets.
#[derive(Parser, Debug)]
#[command(name = "planetarium", version, about)]
struct Args {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Built-in scene variant (nodes, planets, galaxy). A config file is
    /// layered over it.
    #[arg(long)]
    preset: Option<Preset>,

    /// GraphQL endpoint to query.
    #[arg(long)]
    endpoint: Option<String>,

    /// Number of organisations to request.
    #[arg(long)]
    limit: Option<u32>,

    /// Read the response envelope from a JSON file instead of the network.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Camera rig (orbit or fly).
    #[arg(long)]
    camera: Option<CameraMode>,

    /// Seed for planet positions and stars.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    dump_config: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.endpoint.clone(),
            limit: self.limit,
            file: self.file.clone(),
            camera: self.camera,
            seed: self.seed,
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match (&args.config, args.preset) {
        (Some(path), Some(preset)) => Config::load_with_preset(path, preset)
            .with_context(|| format!("loading {} over preset {}", path.display(), preset.name()))?,
        (Some(path), None) => {
            Config::load(path).with_context(|| format!("loading {}", path.display()))?
        }
        (None, Some(preset)) => preset.config(),
        (None, None) => Config::default(),
    };

    config.apply_overrides(&args.overrides());
    config.validate().context("checking configuration")?;
    Ok(config)
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(&args)?;

    if args.dump_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let organisations = fetch_organisations(&config.source).context("fetching organisations")?;
    if organisations.is_empty() {
        log::warn!("The source returned no organisations; the scene will be empty");
    }

    let placements = Placer::new(&config.layout).place_all(&organisations);

    PlanetariumApp::new(&config, organisations, &placements)
        .run()
        .context("running the viewer")?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
