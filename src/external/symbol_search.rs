use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::external::provider::ProviderError;

/// Per-call knobs for a symbol lookup.
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub quotes_count: u32,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SymbolCandidate {
    pub symbol: String,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default, rename = "shortname")]
    pub short_name: Option<String>,
    #[serde(default, rename = "quoteType")]
    pub quote_type: Option<String>,
}

#[async_trait]
pub trait SymbolSearch: Send + Sync {
    /// Candidates in the provider's own ranking order.
    async fn search(
        &self,
        query: &str,
        params: &SearchParams,
    ) -> Result<Vec<SymbolCandidate>, ProviderError>;
}
