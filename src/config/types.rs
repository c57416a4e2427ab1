use serde::Deserialize;

/// Listing the pipeline starts from
pub const DEFAULT_SEED_URL: &str = "https://poedb.tw/us/Unique_item";

/// Browser-like identity sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Main configuration structure for Unique-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub client: ClientConfig,
    pub output: OutputConfig,
    pub filters: FilterConfig,
}

/// Crawl pacing and concurrency configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Listing page that category links are discovered from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Pause after each archived page (milliseconds)
    #[serde(rename = "request-delay")]
    pub request_delay: u64,

    /// Maximum number of asset downloads in flight at once
    #[serde(rename = "max-concurrent-downloads")]
    pub max_concurrent_downloads: u32,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout")]
    pub connect_timeout: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seed_url: DEFAULT_SEED_URL.to_string(),
            request_delay: 1000,
            max_concurrent_downloads: 15,
            request_timeout: 30,
            connect_timeout: 10,
        }
    }
}

/// HTTP client identity
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Content store and ledger locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving archived category markup
    #[serde(rename = "html-dir")]
    pub html_dir: String,

    /// Directory receiving downloaded item images
    #[serde(rename = "image-dir")]
    pub image_dir: String,

    /// Path to the JSON progress ledger
    #[serde(rename = "state-file")]
    pub state_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            html_dir: "data/raw_html".to_string(),
            image_dir: "data/images".to_string(),
            state_file: "data/state.json".to_string(),
        }
    }
}

/// Substring filters for category links and image sources
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// A category link path must contain one of these (empty list accepts all)
    #[serde(rename = "category-include")]
    pub category_include: Vec<String>,

    /// A category link path must contain none of these
    #[serde(rename = "category-exclude")]
    pub category_exclude: Vec<String>,

    /// A lower-cased image source must contain one of these
    #[serde(rename = "image-include")]
    pub image_include: Vec<String>,

    /// A lower-cased image source must contain none of these
    #[serde(rename = "image-exclude")]
    pub image_exclude: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            category_include: strings(&["/us/"]),
            category_exclude: strings(&["Login", "Register", "Contact"]),
            image_include: strings(&["item", "art/2ditems", "web.poecdn.com", "gen/image"]),
            image_exclude: strings(&["favicon", "logo", "flag", "facebook", "twitter"]),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
