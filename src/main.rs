use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gopherfeed::config::{read_feed_list, Config, FeedConfig, FetchConfig};
use gopherfeed::fetcher::Fetcher;
use gopherfeed::gophermap::{
    render_combined, render_feed, RenderOptions, SortMode, DEFAULT_MAX_ENTRIES,
};
use gopherfeed::output::build_tree;

/// Convert RSS or Atom feeds to gophermap files.
#[derive(Parser)]
#[command(name = "gopherfeed", version, about, long_about = None)]
struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a gophermap tree: an index plus one directory per feed.
    Build {
        /// TOML configuration file.
        #[arg(short, long, default_value = "feeds.toml")]
        config: PathBuf,

        /// Plain-text list of feed sources, one per line. Replaces the
        /// feeds of the configuration file.
        #[arg(long)]
        feed_list: Option<PathBuf>,

        /// Output directory.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Hostname written into the index.
        #[arg(long)]
        hostname: Option<String>,

        /// Port written into the index.
        #[arg(long)]
        port: Option<u16>,

        /// Order of the feeds in the index.
        #[arg(long, value_enum)]
        sort: Option<SortMode>,
    },

    /// Print the gophermap of a single feed.
    Feed {
        /// Feed URL or local file.
        source: String,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print a digest of the newest entries across several feeds.
    Combine {
        /// Feed URLs or local files.
        #[arg(required = true)]
        sources: Vec<String>,

        /// Number of entries to keep.
        #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_ENTRIES)]
        max_entries: usize,

        /// First line of the digest.
        #[arg(long)]
        header: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Prefix entries with their publication time.
    #[arg(short, long)]
    timestamps: bool,

    /// Leave out the attribution footer.
    #[arg(long)]
    no_plug: bool,

    /// User agent sent when fetching feeds.
    #[arg(long)]
    user_agent: Option<String>,
}

impl RenderArgs {
    fn options(&self) -> RenderOptions {
        RenderOptions {
            include_timestamp: self.timestamps,
            include_plug: !self.no_plug,
            ..Default::default()
        }
    }

    fn fetcher(&self) -> anyhow::Result<Fetcher> {
        let mut fetch = FetchConfig::default();
        if let Some(user_agent) = &self.user_agent {
            fetch.user_agent = user_agent.clone();
        }
        Ok(Fetcher::new(&fetch)?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for gophermaps
    let default_filter = if cli.verbose {
        "gopherfeed=debug"
    } else {
        "gopherfeed=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Build {
            config,
            feed_list,
            output,
            hostname,
            port,
            sort,
        } => {
            let mut config = if feed_list.is_some() && !config.exists() {
                Config::from_str("")?
            } else {
                Config::load(&config)?
            };
            if let Some(feed_list) = feed_list {
                config.feeds = read_feed_list(feed_list)?
                    .into_iter()
                    .map(|url| FeedConfig { url })
                    .collect();
            }
            if let Some(output) = output {
                config.output_dir = output;
            }
            if hostname.is_some() {
                config.hostname = hostname;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(sort) = sort {
                config.sort = sort;
            }
            info!("Loaded {} feeds from configuration", config.feeds.len());

            let fetcher = Fetcher::new(&config.fetch)?;
            let feeds = fetcher.fetch_all(&config.sources()).await;
            let report = build_tree(&feeds, &config, &config.server())?;
            info!(
                "Built {} feed menus ({} skipped), index at {}",
                report.feeds_written,
                report.feeds_skipped,
                report.index.display()
            );
        }
        Command::Feed { source, render } => {
            let feed = render.fetcher()?.fetch_feed(&source).await?;
            let map = render_feed(&feed, &render.options())
                .map_err(|e| anyhow::anyhow!("{}: {}", source, e))?;
            println!("{}", map);
        }
        Command::Combine {
            sources,
            max_entries,
            header,
            render,
        } => {
            let feeds = render.fetcher()?.fetch_all(&sources).await;
            let options = RenderOptions {
                max_entries: Some(max_entries),
                header,
                ..render.options()
            };
            println!("{}", render_combined(&feeds, &options));
        }
    }

    Ok(())
}
