mod settings;
mod stage;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use pointstage_kernel::WorldId;
use pointstage_persist::{ConfigStore, JsonDirStore, MemoryConfigStore};
use pointstage_render::{DebugTextRenderer, Renderer, SvgRenderer};
use tracing_subscriber::EnvFilter;

use crate::stage::Stage;

#[derive(Parser)]
#[command(name = "pointstage", about = "Project simulated 3D point clouds onto a 2D screen")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available worlds and their switch keys
    List,
    /// Run a world for a number of ticks
    Run {
        /// World id, e.g. `bell-curve` or `pendulum-live`
        #[arg(short, long, default_value = "bell-curve")]
        world: String,
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "100")]
        ticks: u64,
        /// Key presses applied after mounting, e.g. `w,w,ArrowLeft`
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<String>,
        /// Write the final frame as SVG
        #[arg(long)]
        svg: Option<PathBuf>,
        /// Directory holding `<key>.json` config records
        #[arg(long)]
        config_dir: Option<PathBuf>,
        /// Print a frame summary every N ticks (0: only the last)
        #[arg(long, default_value = "0")]
        every: u64,
    },
    /// Print a stored config record, or reset it to defaults
    Config {
        /// Record key, e.g. `pendulum-live-config`
        key: String,
        #[arg(long)]
        reset: bool,
        /// Directory holding `<key>.json` config records
        #[arg(long, default_value = ".pointstage")]
        config_dir: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::List => {
            for (i, id) in WorldId::ALL.iter().enumerate() {
                println!("{}  {:<20} {}", i + 1, id.slug(), id.label());
            }
        }
        Commands::Run {
            world,
            ticks,
            keys,
            svg,
            config_dir,
            every,
        } => {
            let store: Box<dyn ConfigStore> = match config_dir {
                Some(dir) => Box::new(
                    JsonDirStore::open(&dir)
                        .with_context(|| format!("opening config dir {}", dir.display()))?,
                ),
                None => Box::new(MemoryConfigStore::new()),
            };
            let mut stage = Stage::new(settings::load(store.as_ref()));
            let id = WorldId::parse_or_default(&world);
            stage.mount(id).with_context(|| format!("mounting {id}"))?;

            for key in &keys {
                if !stage.on_key(key)? {
                    tracing::warn!(key, "key ignored");
                }
            }

            let text = DebugTextRenderer::new();
            for t in 1..=ticks {
                stage.tick();
                if every > 0 && t % every == 0 {
                    if let Some(shapes) = stage.shapes() {
                        println!("tick {t}\n{}", text.render(&shapes));
                    }
                }
            }

            if let Some(world) = stage.world() {
                println!("{} at tick {}", world.name(), world.time());
            }
            println!("{}", stage.camera().borrow().describe());
            if let Some(shapes) = stage.shapes() {
                print!("{}", text.render(&shapes));
                if let Some(path) = svg {
                    std::fs::write(&path, SvgRenderer::new().render(&shapes))
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("SVG written to {}", path.display());
                }
            }
            if stage.skipped_frames() > 0 {
                println!("Skipped frames: {}", stage.skipped_frames());
            }
        }
        Commands::Config {
            key,
            reset,
            config_dir,
        } => {
            let mut store = JsonDirStore::open(&config_dir)
                .with_context(|| format!("opening config dir {}", config_dir.display()))?;
            match settings::record(&mut store, &key, reset) {
                Some(result) => println!("{}", result?),
                None => bail!(
                    "unknown config key `{key}`; known keys: {}",
                    settings::known_keys().join(", ")
                ),
            }
        }
    }

    Ok(())
}
