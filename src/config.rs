use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (compatible; StockPulse/0.1)";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

fn invalid(key: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { key, reason: reason.into() }
}

/// Read an env var and parse it, keeping `default` when unset or unparsable.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_secs(key: &str, default: Duration) -> Duration {
    Duration::from_secs(env_or(key, default.as_secs()))
}

fn check_url(key: &'static str, value: &str) -> Result<(), ConfigError> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| invalid(key, e.to_string()))
}

fn check_timeout(key: &'static str, value: Duration) -> Result<(), ConfigError> {
    if value.is_zero() {
        return Err(invalid(key, "timeout must be greater than zero"));
    }
    Ok(())
}

/// Safe-search level understood by the news-search provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeSearch {
    Off,
    Moderate,
    Strict,
}

impl SafeSearch {
    /// Value of the `p` parameter on the news endpoint.
    pub fn as_param(&self) -> &'static str {
        match self {
            SafeSearch::Off => "-2",
            SafeSearch::Moderate => "-1",
            SafeSearch::Strict => "1",
        }
    }
}

impl FromStr for SafeSearch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" => Ok(SafeSearch::Off),
            "moderate" => Ok(SafeSearch::Moderate),
            "on" | "strict" => Ok(SafeSearch::Strict),
            other => Err(format!("unknown safesearch level '{}'", other)),
        }
    }
}

/// Symbol-search settings used by the ticker resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub quotes_count: u32,
    /// Prefer a candidate listed on one of `regional_suffixes` over the first hit.
    pub prefer_regional: bool,
    pub regional_suffixes: Vec<String>,
    /// Appended to bare queries when no candidate is found.
    pub default_suffix: String,
    pub user_agent: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query2.finance.yahoo.com".to_string(),
            timeout: Duration::from_secs(5),
            quotes_count: 1,
            prefer_regional: false,
            regional_suffixes: vec![".NS".to_string(), ".BO".to_string()],
            default_suffix: ".NS".to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl ResolverConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_string("SYMBOL_SEARCH_URL", &defaults.base_url),
            timeout: env_secs("SYMBOL_SEARCH_TIMEOUT_SECS", defaults.timeout),
            quotes_count: env_or("SYMBOL_SEARCH_QUOTES_COUNT", defaults.quotes_count),
            prefer_regional: env_or("PREFER_REGIONAL_LISTING", defaults.prefer_regional),
            regional_suffixes: std::env::var("REGIONAL_SUFFIXES")
                .map(|s| {
                    s.split(',')
                        .map(|part| part.trim().to_string())
                        .filter(|part| !part.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.regional_suffixes),
            default_suffix: env_string("DEFAULT_EXCHANGE_SUFFIX", &defaults.default_suffix),
            user_agent: defaults.user_agent,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("SYMBOL_SEARCH_URL", &self.base_url)?;
        check_timeout("SYMBOL_SEARCH_TIMEOUT_SECS", self.timeout)?;
        if self.quotes_count == 0 {
            return Err(invalid("SYMBOL_SEARCH_QUOTES_COUNT", "must be at least 1"));
        }
        if !self.default_suffix.starts_with('.') {
            return Err(invalid("DEFAULT_EXCHANGE_SUFFIX", "must start with '.'"));
        }
        Ok(())
    }
}

/// Market-data settings for the fundamentals adapter.
#[derive(Debug, Clone)]
pub struct FundamentalsConfig {
    pub base_url: String,
    /// Visited once per full-quote lookup to obtain the session cookie.
    pub cookie_url: String,
    pub timeout: Duration,
    /// Reported when the provider omits a currency.
    pub default_currency: String,
    pub user_agent: String,
}

impl Default for FundamentalsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query2.finance.yahoo.com".to_string(),
            cookie_url: "https://fc.yahoo.com".to_string(),
            timeout: Duration::from_secs(10),
            default_currency: "INR".to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl FundamentalsConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_string("MARKET_DATA_URL", &defaults.base_url),
            cookie_url: env_string("MARKET_DATA_COOKIE_URL", &defaults.cookie_url),
            timeout: env_secs("MARKET_DATA_TIMEOUT_SECS", defaults.timeout),
            default_currency: env_string("DEFAULT_CURRENCY", &defaults.default_currency),
            user_agent: defaults.user_agent,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("MARKET_DATA_URL", &self.base_url)?;
        check_url("MARKET_DATA_COOKIE_URL", &self.cookie_url)?;
        check_timeout("MARKET_DATA_TIMEOUT_SECS", self.timeout)?;
        if self.default_currency.trim().is_empty() {
            return Err(invalid("DEFAULT_CURRENCY", "must not be empty"));
        }
        Ok(())
    }
}

/// News-search settings shared by the per-stock and general news paths.
#[derive(Debug, Clone)]
pub struct NewsConfig {
    pub base_url: String,
    pub region: String,
    pub safesearch: SafeSearch,
    pub timeout: Duration,
    pub stock_max_results: usize,
    pub general_max_results: usize,
    pub general_query: String,
    pub user_agent: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://duckduckgo.com".to_string(),
            region: "in-en".to_string(),
            safesearch: SafeSearch::Off,
            timeout: Duration::from_secs(10),
            stock_max_results: 5,
            general_max_results: 8,
            general_query: "top business news india stock market".to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl NewsConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_string("NEWS_SEARCH_URL", &defaults.base_url),
            region: env_string("NEWS_REGION", &defaults.region),
            safesearch: env_or("NEWS_SAFESEARCH", defaults.safesearch),
            timeout: env_secs("NEWS_TIMEOUT_SECS", defaults.timeout),
            stock_max_results: env_or("STOCK_NEWS_MAX_RESULTS", defaults.stock_max_results),
            general_max_results: env_or("GENERAL_NEWS_MAX_RESULTS", defaults.general_max_results),
            general_query: env_string("GENERAL_NEWS_QUERY", &defaults.general_query),
            user_agent: defaults.user_agent,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("NEWS_SEARCH_URL", &self.base_url)?;
        check_timeout("NEWS_TIMEOUT_SECS", self.timeout)?;
        if self.stock_max_results == 0 {
            return Err(invalid("STOCK_NEWS_MAX_RESULTS", "must be at least 1"));
        }
        if self.general_max_results == 0 {
            return Err(invalid("GENERAL_NEWS_MAX_RESULTS", "must be at least 1"));
        }
        if self.general_query.trim().is_empty() {
            return Err(invalid("GENERAL_NEWS_QUERY", "must not be empty"));
        }
        Ok(())
    }
}

/// Top-level settings for the aggregation service binary.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub resolver: ResolverConfig,
    pub fundamentals: FundamentalsConfig,
    pub news: NewsConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            resolver: ResolverConfig::default(),
            fundamentals: FundamentalsConfig::default(),
            news: NewsConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env_or("BIND_ADDR", defaults.bind_addr),
            resolver: ResolverConfig::from_env(),
            fundamentals: FundamentalsConfig::from_env(),
            news: NewsConfig::from_env(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolver.validate()?;
        self.fundamentals.validate()?;
        self.news.validate()
    }
}

/// Settings for the browser-facing gateway binary.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    pub ai_service_url: String,
    pub request_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            ai_service_url: "http://127.0.0.1:8000".to_string(),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env_or("GATEWAY_BIND_ADDR", defaults.bind_addr),
            ai_service_url: env_string("AI_SERVICE_URL", &defaults.ai_service_url),
            request_timeout: env_secs("GATEWAY_TIMEOUT_SECS", defaults.request_timeout),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("AI_SERVICE_URL", &self.ai_service_url)?;
        check_timeout("GATEWAY_TIMEOUT_SECS", self.request_timeout)
    }
}
