use clap::{Args, Parser, Subcommand, ValueEnum};
use imdex_img::config::{self, PluginConfig};
use imdex_img::plugin::{Registry, ShortcodeArgs, register};
use imdex_img::{batch, output, zone::Zone};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt as log_fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

/// Log verbosity when `RUST_LOG` is not set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(level)
    }
}

#[derive(Parser)]
#[command(name = "imdex-img")]
#[command(about = "Render <img> tags and image URLs from imdexer indexes")]
#[command(long_about = "\
Render <img> tags and image URLs from imdexer indexes

Image sources are matched to a zone by prefix, looked up in that zone's
index, and rendered with the zone's base URL:

  imdex.toml
  ├── img_shortcode = \"image\"
  ├── img_url_filter = \"imageUrl\"
  └── [[zones]]  prefix, index (JSON), base_url

Grouped images (index entries with `files`) render as responsive tags with
a srcset; the widest variant is the default src unless --default-width is
given.

Run 'imdex-img gen-config' to print a documented imdex.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file; index paths inside it are relative to its directory
    #[arg(long, default_value = "imdex.toml", global = true)]
    config: PathBuf,

    /// Log level when RUST_LOG is unset
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

/// Shortcode arguments as CLI flags.
#[derive(Args, Clone)]
struct TagArgs {
    /// Image source, including the zone prefix
    src: String,
    /// Alt text; pass an empty string for decorative images
    #[arg(long)]
    alt: Option<String>,
    /// Class attribute
    #[arg(long)]
    class: Option<String>,
    /// Omit loading="lazy"
    #[arg(long)]
    no_lazy: bool,
    /// Sizes attribute for responsive tags
    #[arg(long)]
    sizes: Option<String>,
    /// Use the variant with exactly this width as src
    #[arg(long)]
    default_width: Option<u32>,
}

impl From<TagArgs> for ShortcodeArgs {
    fn from(args: TagArgs) -> Self {
        ShortcodeArgs {
            src: Some(args.src),
            alt: args.alt,
            class: args.class,
            lazy: args.no_lazy.then_some(false),
            sizes: args.sizes,
            default_image_width: args.default_width,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Render the <img> tag for one image source
    Tag(TagArgs),
    /// Print the URL for one image source
    Url {
        /// Image source, including the zone prefix
        src: String,
    },
    /// Render tags for every source listed in a file, one per line
    Batch {
        /// File with one source (or JSON shortcode arguments) per line
        file: PathBuf,
        /// Alt text for plain-source lines
        #[arg(long)]
        alt: Option<String>,
        /// Max parallel workers (default: CPU cores)
        #[arg(long)]
        jobs: Option<usize>,
    },
    /// Validate the config and indexes without rendering
    Check,
    /// Print a stock imdex.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match cli.command {
        Command::Tag(tag_args) => {
            let (config, registry) = load_registry(&cli.config)?;
            let name = config
                .img_shortcode
                .as_deref()
                .ok_or("img_shortcode is not configured")?;
            let html = registry.call_shortcode(name, &tag_args.into())?;
            println!("{}", html);
        }
        Command::Url { src } => {
            let (config, registry) = load_registry(&cli.config)?;
            let name = config
                .img_url_filter
                .as_deref()
                .ok_or("img_url_filter is not configured")?;
            println!("{}", registry.call_filter(name, &src)?);
        }
        Command::Batch { file, alt, jobs } => {
            let (config, registry) = load_registry(&cli.config)?;
            let name = config
                .img_shortcode
                .as_deref()
                .ok_or("img_shortcode is not configured")?;
            let content = std::fs::read_to_string(&file)?;
            let requests = batch::parse_batch(&content, alt.as_deref())?;
            init_thread_pool(jobs);
            let rendered = batch::render_batch(&registry, name, &requests)?;
            output::print_batch_output(&rendered);
        }
        Command::Check => {
            let config = config::load_config(&cli.config)?;
            let zones: Vec<Zone> = config.load_zones(&config::config_dir(&cli.config))?;
            output::print_check_output(&config, &zones);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` overrides `--log-level`.
fn init_logging(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::registry()
        .with(filter)
        .with(log_fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

/// Load config + indexes and register the helpers into an in-memory host.
fn load_registry(config_path: &Path) -> Result<(PluginConfig, Registry), config::ConfigError> {
    let config = config::load_config(config_path)?;
    let options = config.plugin_options(&config::config_dir(config_path))?;
    let mut registry = Registry::new();
    register(&mut registry, options);
    Ok((config, registry))
}

/// Size the global rayon pool. Caps at the number of available CPU cores.
fn init_thread_pool(jobs: Option<usize>) {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let threads = jobs.map(|n| n.clamp(1, cores)).unwrap_or(cores);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
