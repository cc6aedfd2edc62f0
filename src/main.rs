use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use console::{Emoji, Term};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;
use url::Url;

use vesti_rss::playback::DEFAULT_PLAYER;
use vesti_rss::{
    CatalogView, DataSource, EpisodeView, GenerateOptions, MpvOutput, NoopReporter,
    PlaybackController, ProgressEvent, ProgressReporter, ReqwestClient, SharedProgressReporter,
    generate_all, load_stations,
};

// Emoji with fallback for terminals without Unicode support
static RADIO: Emoji<'_, '_> = Emoji("📻 ", "");
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[>] ");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[+] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");
static PARTY: Emoji<'_, '_> = Emoji("🎉 ", "[*] ");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "x ");

/// Upper bound for any single request, so a stalled CDN cannot hang a run
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Browse and play Vesti FM podcasts, and regenerate their RSS feeds
#[derive(Parser, Debug)]
#[command(name = "vesti-rss")]
#[command(about = "Browse and play Vesti FM podcasts, and regenerate their RSS feeds")]
#[command(version)]
struct Args {
    /// Base URL or local directory holding podcasts.json, brands/ and rubrics/
    #[arg(short, long, global = true, default_value = "data")]
    data: String,

    /// Verbose mode - log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the podcast catalog
    Catalog,

    /// Show a program's episodes and play them
    Listen {
        /// Navigation target, e.g. "/listen?brand_id=61375"
        target: String,

        /// Audio player binary
        #[arg(long, default_value = DEFAULT_PLAYER)]
        player: String,
    },

    /// Play a single episode by id
    Play {
        /// Episode id
        id: u64,

        /// Audio player binary
        #[arg(long, default_value = DEFAULT_PLAYER)]
        player: String,
    },

    /// Regenerate RSS feeds from a station list
    Generate {
        /// Station list (TOML)
        stations: PathBuf,

        /// Directory the feed paths are relative to
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Number of latest episodes per feed
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Public URL the output directory is served from
        #[arg(long)]
        public_url: Option<Url>,

        /// Quiet mode - suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "warn,vesti_rss=debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg}")
            .unwrap(),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_message(message);
    bar
}

async fn read_line() -> Result<String> {
    let line = tokio::task::spawn_blocking(|| Term::stdout().read_line())
        .await
        .context("Input task failed")??;
    Ok(line)
}

/// Progress reporter using indicatif for terminal output
struct IndicatifReporter {
    bar: ProgressBar,
}

impl IndicatifReporter {
    fn new() -> Self {
        Self {
            bar: spinner(String::new()),
        }
    }
}

impl ProgressReporter for IndicatifReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::StationStarted { name, podcasts } => {
                self.bar.println(format!(
                    "{RADIO}{} ({} podcasts)",
                    name.bold().magenta(),
                    podcasts.to_string().cyan()
                ));
            }

            ProgressEvent::FetchingEpisodes {
                podcast_title,
                program,
            } => {
                self.bar.set_message(format!(
                    "{SEARCH}Fetching {} ({})",
                    podcast_title.cyan(),
                    program.dimmed()
                ));
            }

            ProgressEvent::ProbingMedia {
                podcast_title,
                episodes,
            } => {
                self.bar.set_message(format!(
                    "{HEADPHONES}{} • probing {} episodes",
                    podcast_title.cyan(),
                    episodes.to_string().yellow()
                ));
            }

            ProgressEvent::FeedWritten {
                podcast_title,
                path,
                episodes,
            } => {
                self.bar.println(format!(
                    "  {SUCCESS}{} • {} episodes → {}",
                    podcast_title.green(),
                    episodes.to_string().cyan(),
                    path.display().to_string().dimmed()
                ));
            }

            ProgressEvent::FeedFailed {
                podcast_title,
                error,
            } => {
                self.bar.println(format!(
                    "  {FAILURE}{} - {}",
                    podcast_title.red(),
                    error.red()
                ));
            }

            ProgressEvent::GenerationCompleted { written, failed } => {
                self.bar.finish_and_clear();
                println!(
                    "\n{PARTY}{} {} written, {} failed",
                    "Generation complete:".bold().green(),
                    written.to_string().green().bold(),
                    if failed > 0 {
                        failed.to_string().red().bold()
                    } else {
                        failed.to_string().green()
                    }
                );
            }
        }
    }
}

async fn run_catalog(client: &ReqwestClient, source: &DataSource) -> Result<()> {
    let bar = spinner(format!("{SEARCH}Loading catalog from {}", source.to_string().cyan()));
    let mut view = CatalogView::new();
    view.load(client, source).await;
    bar.finish_and_clear();

    println!("{}\n", view.render());
    Ok(())
}

async fn run_listen(
    client: &ReqwestClient,
    source: &DataSource,
    target: &str,
    player: String,
) -> Result<()> {
    let mut view = EpisodeView::for_target(target).context("Cannot open episode view")?;

    let bar = spinner(format!("{SEARCH}Loading episodes"));
    view.load(client, source).await;
    bar.finish_and_clear();

    println!("{}\n", view.render());
    if view.episodes().is_empty() {
        return Ok(());
    }

    let mut controller = PlaybackController::new(MpvOutput::new(player));
    loop {
        print!("{HEADPHONES}Episode number to play (Enter to quit): ");
        std::io::Write::flush(&mut std::io::stdout())?;

        let line = read_line().await?;
        let line = line.trim();
        if line.is_empty() || line.eq_ignore_ascii_case("q") {
            break;
        }

        let Ok(key) = line.parse::<usize>() else {
            println!("{CROSS}{}", "Not a number".yellow());
            continue;
        };

        match view.play(key, &mut controller).await {
            Ok(Some(url)) => println!("{HEADPHONES}Now playing {}", url.to_string().cyan()),
            Ok(None) => println!("{CROSS}{}", format!("No episode {key}").yellow()),
            Err(e) => println!("{FAILURE}{}", e.to_string().red()),
        }
    }

    view.deactivate();
    Ok(())
}

async fn run_play(id: u64, player: String) -> Result<()> {
    let mut controller = PlaybackController::new(MpvOutput::new(player));
    let url = controller
        .play(id)
        .await
        .context("Failed to start playback")?;

    println!("{HEADPHONES}Now playing {}", url.to_string().cyan());
    print!("Press Enter to stop ");
    std::io::Write::flush(&mut std::io::stdout())?;
    read_line().await?;
    Ok(())
}

async fn run_generate(
    client: &ReqwestClient,
    stations: PathBuf,
    output_dir: PathBuf,
    limit: usize,
    public_url: Option<Url>,
    quiet: bool,
) -> Result<()> {
    let station_list = load_stations(&stations)
        .with_context(|| format!("Failed to load {}", stations.display()))?;

    let mut options = GenerateOptions::new(&output_dir).context("Invalid API endpoint")?;
    options.limit = limit;
    options.public_base = public_url;

    let reporter: SharedProgressReporter = if quiet {
        NoopReporter::shared()
    } else {
        Arc::new(IndicatifReporter::new())
    };

    let summary = generate_all(client, &station_list, &options, reporter).await;

    if !quiet && !summary.failed_podcasts.is_empty() {
        println!("\n{}", "Failed podcasts:".red().bold());
        for (title, error) in &summary.failed_podcasts {
            println!("  {}{} - {}", CROSS, title.yellow(), error.dimmed());
        }
    }

    if !quiet {
        println!(
            "\n{FOLDER}Output: {}\n",
            output_dir.display().to_string().cyan()
        );
    }

    if summary.written == 0 && summary.failed > 0 {
        bail!("No feed could be generated");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let client =
        ReqwestClient::with_timeout(HTTP_TIMEOUT).context("Failed to build HTTP client")?;
    let source = DataSource::parse(&args.data).context("Invalid data source")?;

    match args.command {
        Command::Catalog => run_catalog(&client, &source).await,
        Command::Listen { target, player } => run_listen(&client, &source, &target, player).await,
        Command::Play { id, player } => run_play(id, player).await,
        Command::Generate {
            stations,
            output_dir,
            limit,
            public_url,
            quiet,
        } => run_generate(&client, stations, output_dir, limit, public_url, quiet).await,
    }
}
