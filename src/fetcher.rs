use std::path::Path;
use std::time::Duration;

use feed_rs::model::FeedType;
use feed_rs::parser;
use reqwest::Client;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::FetchConfig;
use crate::model::{Entry, Feed, FeedFormat};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server returned {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse feed: {0}")]
    Parse(#[from] parser::ParseFeedError),
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }

    /// Fetch and parse one feed. `source` is an http(s) URL or a local path.
    pub async fn fetch_feed(&self, source: &str) -> Result<Feed, FetchError> {
        let bytes = if is_remote(source) {
            info!("Fetching feed: {}", source);
            let response = self.client.get(source).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: source.to_string(),
                    status: status.as_u16(),
                });
            }
            response.bytes().await?.to_vec()
        } else {
            info!("Reading feed file: {}", source);
            tokio::fs::read(Path::new(source))
                .await
                .map_err(|source_err| FetchError::Read {
                    path: source.to_string(),
                    source: source_err,
                })?
        };

        let feed = parse_feed(&bytes)?;
        info!(
            "Parsed {} entries from '{}'",
            feed.entries.len(),
            feed.display_title()
        );
        Ok(feed)
    }

    /// Fetch every source in turn, skipping the ones that fail.
    pub async fn fetch_all(&self, sources: &[String]) -> Vec<Feed> {
        let mut feeds = Vec::with_capacity(sources.len());
        for source in sources {
            match self.fetch_feed(source).await {
                Ok(feed) => feeds.push(feed),
                Err(e) => error!("Failed to fetch feed '{}': {}", source, e),
            }
        }
        info!("Fetched {} of {} feeds", feeds.len(), sources.len());
        feeds
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Parse RSS, Atom or JSON Feed bytes into a [`Feed`].
pub fn parse_feed(bytes: &[u8]) -> Result<Feed, FetchError> {
    let parsed = parser::parse(bytes)?;

    let format = match parsed.feed_type {
        FeedType::RSS0 | FeedType::RSS1 | FeedType::RSS2 => FeedFormat::Rss,
        FeedType::Atom => FeedFormat::Atom,
        FeedType::JSON => FeedFormat::Unknown,
    };

    let entries = parsed
        .entries
        .into_iter()
        .map(|entry| {
            let title = entry
                .title
                .map(|t| t.content)
                .unwrap_or_else(|| "Untitled".to_string());

            let link = entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default();
            if link.is_empty() {
                warn!("Entry '{}' has no link", title);
            }

            Entry {
                title,
                link,
                published: entry.published,
                updated: entry.updated,
            }
        })
        .collect();

    Ok(Feed {
        title: parsed.title.map(|t| t.content),
        description: parsed.description.map(|t| t.content),
        link: parsed.links.first().map(|l| l.href.clone()),
        format,
        entries,
    })
}
