use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::gophermap::{GopherServer, RenderOptions, SortMode, DEFAULT_MAX_ENTRIES, DEFAULT_PORT};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory the gophermap tree is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Selector prefix of the feed directories as seen by the gopher server.
    /// The default `/` assumes `output_dir` is the server's root.
    #[serde(default = "default_selector_root")]
    pub selector_root: String,
    /// Defaults to the fully-qualified name of this host
    pub hostname: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    pub header: Option<String>,
    #[serde(default)]
    pub sort: SortMode,
    #[serde(default)]
    pub timestamps: bool,
    #[serde(default = "default_plug")]
    pub plug: bool,
    #[serde(default)]
    pub write_mode: WriteMode,
    #[serde(flatten)]
    pub fetch: FetchConfig,
    pub digest: Option<DigestConfig>,
    #[serde(default)]
    pub feeds: Vec<FeedConfig>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("gopher")
}

fn default_selector_root() -> String {
    "/".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_plug() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    pub url: String,
}

/// HTTP client settings, scoped to one fetcher.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_user_agent() -> String {
    format!(
        "Gopherfeed/{} (+https://github.com/lmaurits/gopherfeed)",
        env!("CARGO_PKG_VERSION")
    )
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct DigestConfig {
    #[serde(default = "default_digest_directory")]
    pub directory: String,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    pub title: Option<String>,
}

fn default_digest_directory() -> String {
    "latest".to_string()
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

/// What happens to an existing gophermap on a repeated run.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    #[default]
    Overwrite,
    Append,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn sources(&self) -> Vec<String> {
        self.feeds.iter().map(|feed| feed.url.clone()).collect()
    }

    pub fn server(&self) -> GopherServer {
        let hostname = self.hostname.clone().unwrap_or_else(local_hostname);
        GopherServer::new(hostname, self.port)
    }

    /// Options for the per-feed menus and the feed index.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            include_timestamp: self.timestamps,
            include_plug: self.plug,
            sort_mode: self.sort,
            max_entries: None,
            header: self.header.clone(),
        }
    }

    /// Options for the combined digest, if one is configured.
    pub fn digest_options(&self) -> Option<RenderOptions> {
        self.digest.as_ref().map(|digest| RenderOptions {
            include_timestamp: self.timestamps,
            include_plug: self.plug,
            sort_mode: SortMode::Chronological,
            max_entries: Some(digest.max_entries),
            header: digest.title.clone(),
        })
    }
}

/// Read a plain-text feed list: one source per line, `#` starts a comment.
pub fn read_feed_list<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_feed_list(&content))
}

pub fn parse_feed_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Best-effort fully-qualified name of this host.
///
/// Asks `hostname -f` first. Falls back to the short name from `HOSTNAME`
/// or `/etc/hostname`, then to `localhost`.
pub fn local_hostname() -> String {
    fully_qualified_hostname()
        .or_else(|| std::env::var("HOSTNAME").ok())
        .or_else(|| std::fs::read_to_string("/etc/hostname").ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty() && !name.contains(char::is_whitespace))
        .unwrap_or_else(|| "localhost".to_string())
}

fn fully_qualified_hostname() -> Option<String> {
    let output = std::process::Command::new("hostname")
        .arg("-f")
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let name = String::from_utf8(output.stdout).ok()?;
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}
