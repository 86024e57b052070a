use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::config::ResolverConfig;
use crate::external::symbol_search::{SearchParams, SymbolCandidate, SymbolSearch};

/// Turns free-text user input into a ticker symbol.
pub struct TickerResolver {
    search: Arc<dyn SymbolSearch>,
    config: ResolverConfig,
}

impl TickerResolver {
    pub fn new(search: Arc<dyn SymbolSearch>, config: ResolverConfig) -> Self {
        Self { search, config }
    }

    /// Never fails: lookup errors and empty results fall back to
    /// [`fallback_symbol`].
    #[instrument(skip(self))]
    pub async fn resolve(&self, query: &str) -> String {
        let params = SearchParams {
            quotes_count: self.config.quotes_count,
            timeout: self.config.timeout,
        };

        match self.search.search(query, &params).await {
            Ok(candidates) => {
                if let Some(symbol) = pick_candidate(&candidates, &self.config) {
                    info!("Resolved '{}' -> {}", query, symbol);
                    return symbol;
                }
                warn!("No symbol candidates for '{}'", query);
            }
            Err(e) => {
                error!("Ticker lookup failed for '{}': {}", query, e);
            }
        }

        let symbol = fallback_symbol(query, &self.config.default_suffix);
        info!("Falling back to {} for '{}'", symbol, query);
        symbol
    }
}

/// First candidate, unless regional preference is on and a later candidate
/// trades on one of the preferred exchanges.
pub fn pick_candidate(candidates: &[SymbolCandidate], config: &ResolverConfig) -> Option<String> {
    if config.prefer_regional {
        let regional = candidates.iter().find(|c| {
            config
                .regional_suffixes
                .iter()
                .any(|suffix| c.symbol.ends_with(suffix.as_str()))
        });
        if let Some(candidate) = regional {
            return Some(candidate.symbol.clone());
        }
    }

    candidates.first().map(|c| c.symbol.clone())
}

/// Queries that already carry an exchange suffix pass through unchanged.
pub fn fallback_symbol(query: &str, default_suffix: &str) -> String {
    if query.contains('.') {
        query.to_string()
    } else {
        format!("{}{}", query, default_suffix)
    }
}
