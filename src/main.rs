use std::path::PathBuf;

use clap::{
    CommandFactory, Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tokio_util::sync::CancellationToken;

use spotifetch::{
    cli::{self, DownloadOptions},
    config, info,
    media::ffmpeg::TranscodeOptions,
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Spotify playlist URL
    #[clap(required_unless_present = "completions")]
    url: Option<String>,

    /// Destination directory for the MP3 files
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Discard the record of completed downloads before the run
    #[clap(long)]
    clear_cache: bool,

    /// Location of the record of completed downloads
    #[clap(long, default_value = config::CACHE_FILE)]
    cache_file: PathBuf,

    /// Number of playlist items requested per page
    #[clap(long, default_value_t = config::DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u32).range(1..=50))]
    page_size: u32,

    /// Word appended to each "<track> <artist>" search query
    #[clap(long, default_value = config::DEFAULT_SEARCH_SUFFIX)]
    search_suffix: String,

    /// MP3 bitrate passed to ffmpeg
    #[clap(long, default_value = config::DEFAULT_BITRATE)]
    bitrate: String,

    /// Output sample rate in Hz
    #[clap(long, default_value_t = config::DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Print shell completions and exit
    #[clap(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received interrupt, exiting...");
            signal_cancel.cancel();
        }
    });

    let opts = DownloadOptions {
        url: cli.url.unwrap_or_default(),
        output: cli.output.unwrap_or_else(config::default_output_dir),
        clear_cache: cli.clear_cache,
        cache_file: cli.cache_file,
        page_size: cli.page_size,
        search_suffix: cli.search_suffix,
        transcode: TranscodeOptions {
            bitrate: cli.bitrate,
            sample_rate: cli.sample_rate,
        },
    };

    cli::download(opts, cancel).await;
}
