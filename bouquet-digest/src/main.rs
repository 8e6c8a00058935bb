use bouquet_digest::aggregators::recency::clamp_limit;
use bouquet_digest::{
    rss_utils, DateAnchor, EmojiPicker, FeedConfig, HttpDigestSource, JsonFileEmojiSource, PickerConfig,
    WeeklyDigest, WeeklyWindowBuilder,
};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bouquet-digest", about = "Common emoji picker and weekly bouquet digest feeds")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print recently used emojis as a JSON array
    Emojis {
        /// Ranked emoji history (JSON array, most recent first); highest priority first
        #[arg(long = "source")]
        sources: Vec<PathBuf>,
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },
    /// Print a user's weekly digest as RSS
    Rss {
        #[arg(long)]
        user: String,
        /// Only this many windows, starting `--anchor-days` back
        #[arg(long)]
        recent: Option<u32>,
        #[arg(long, default_value_t = 28)]
        anchor_days: u32,
        /// Date used for entry links and publish dates
        #[arg(long, value_enum)]
        anchor: Option<AnchorArg>,
        #[arg(long)]
        api_base_url: Option<String>,
        #[arg(long)]
        site_url: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AnchorArg {
    Start,
    End,
}

impl From<AnchorArg> for DateAnchor {
    fn from(arg: AnchorArg) -> Self {
        match arg {
            AnchorArg::Start => DateAnchor::WindowStart,
            AnchorArg::End => DateAnchor::WindowEnd,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Emojis { sources, limit } => {
            let mut picker = EmojiPicker::new(PickerConfig::default());
            for path in sources {
                picker.add_source(Arc::new(JsonFileEmojiSource::new(path)));
            }

            let emojis = picker.common_emojis(limit.map(clamp_limit)).await;
            println!("{}", rss_utils::render_emoji_json(&emojis)?);
        }
        Command::Rss {
            user,
            recent,
            anchor_days,
            anchor,
            api_base_url,
            site_url,
        } => {
            let mut config = FeedConfig::from_env()?;
            if let Some(url) = api_base_url {
                config.api_base_url = url;
            }
            if let Some(url) = site_url {
                config.site_url = url;
            }
            if let Some(anchor) = anchor {
                config.date_anchor = anchor.into();
            }
            config.validate()?;

            info!("Building weekly digest for {} from {}", user, config.api_base_url);

            let source = HttpDigestSource::new(&config).map_err(|e| {
                error!("Failed to create HTTP client: {}", e);
                Box::new(e) as Box<dyn std::error::Error>
            })?;
            let windows = match recent {
                Some(count) => WeeklyWindowBuilder::recent(config.epoch, count, anchor_days),
                None => WeeklyWindowBuilder::new(config.epoch),
            };

            let digest = WeeklyDigest::new(config, Arc::new(source)).with_windows(windows);
            let feed = digest.build_feed(&user, Utc::now()).await?;
            println!("{}", rss_utils::render_rss(&feed)?);
        }
    }

    Ok(())
}
