use accent_color::{Rgb, RgbImage};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use backdrop::models::{PickerConfig, PickerOverrides, CONFIG_ENV};
use backdrop::rendering::{compose, decode_png_file, write_png_file};
use backdrop::services::PickerService;

#[derive(Parser)]
#[command(name = "backdrop")]
#[command(about = "Pick the accent color of an image and render it on a matching background")]
struct Cli {
    /// YAML config file (defaults to $BACKDROP_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the accent color of a PNG image as #rrggbb
    Pick {
        /// Input PNG file
        image: PathBuf,

        #[command(flatten)]
        overrides: PickerOverrides,
    },
    /// Render a PNG image centered on a canvas filled with its accent color
    Render {
        /// Input PNG file
        image: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Canvas border around the image, in pixels
        #[arg(short, long, default_value_t = 32)]
        padding: u32,

        /// Fill the canvas with this color (#rrggbb or #rgb) instead of
        /// picking one
        #[arg(long)]
        background: Option<Rgb>,

        #[command(flatten)]
        overrides: PickerOverrides,
    },
    /// Print the effective configuration as YAML
    Config {
        #[command(flatten)]
        overrides: PickerOverrides,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli
        .config
        .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

    match cli.command {
        Commands::Pick { image, overrides } => {
            let config = load_config(config_path.as_deref(), &overrides)?;
            let color = pick(&config, &image).await?.1;
            println!("{color}");
            Ok(())
        }
        Commands::Render {
            image,
            output,
            padding,
            background,
            overrides,
        } => {
            let (source, color) = match background {
                Some(color) => (Arc::new(decode_png_file(&image)?), color),
                None => {
                    let config = load_config(config_path.as_deref(), &overrides)?;
                    pick(&config, &image).await?
                }
            };
            let canvas = compose(&source, color, padding);
            write_png_file(&output, &canvas)?;
            println!("{color}");
            Ok(())
        }
        Commands::Config { overrides } => {
            let config = load_config(config_path.as_deref(), &overrides)?;
            print!("{}", config.to_yaml()?);
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "backdrop=debug,accent_color=debug"
    } else {
        "backdrop=warn,accent_color=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_config(path: Option<&Path>, overrides: &PickerOverrides) -> anyhow::Result<PickerConfig> {
    let mut config = PickerConfig::load(path)?;
    overrides.apply(&mut config);
    Ok(config)
}

/// Decode `image` and pick its accent color.
async fn pick(config: &PickerConfig, image: &Path) -> anyhow::Result<(Arc<RgbImage>, Rgb)> {
    let service = PickerService::new(config)?;
    let source = Arc::new(decode_png_file(image)?);
    let color = service.pick(Arc::clone(&source)).await?;
    Ok((source, color))
}
