use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::config::FundamentalsConfig;
use crate::external::market_data::{FastQuote, FullQuote, MarketDataProvider};
use crate::external::provider::{check_status, ProviderError};

const SUMMARY_MODULES: &str = "price,summaryDetail,financialData";

/// Yahoo Finance quotes: the v8 chart endpoint for the fast path and the
/// v10 quote summary (cookie + crumb protected) for the full record.
pub struct YahooQuoteProvider {
    client: reqwest::Client,
    base_url: String,
    cookie_url: String,
}

impl YahooQuoteProvider {
    pub fn new(config: &FundamentalsConfig) -> Self {
        Self {
            client: build_client(&config.user_agent, config.timeout),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cookie_url: config.cookie_url.clone(),
        }
    }

    /// Prime the session cookie and fetch a crumb for the quote summary call.
    async fn fetch_crumb(&self) -> Result<String, ProviderError> {
        // fc.yahoo.com answers 404 but still sets the cookie
        if let Err(e) = self.client.get(&self.cookie_url).send().await {
            debug!("Cookie priming request failed: {}", e);
        }

        let url = format!("{}/v1/test/getcrumb", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ProviderError::from_send)?;

        let crumb = check_status(resp)?
            .text()
            .await
            .map_err(ProviderError::from_body)?;

        let crumb = crumb.trim().to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(ProviderError::BadResponse("invalid crumb".into()));
        }
        Ok(crumb)
    }
}

fn build_client(user_agent: &str, timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .cookie_store(true)
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
    market_cap: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResponse {
    quote_summary: SummaryBody,
}

#[derive(Debug, Deserialize)]
struct SummaryBody {
    result: Option<Vec<SummaryResult>>,
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResult {
    #[serde(default)]
    price: Option<PriceModule>,
    #[serde(default)]
    summary_detail: Option<SummaryDetailModule>,
    #[serde(default)]
    financial_data: Option<FinancialDataModule>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    #[serde(default)]
    regular_market_price: RawValue,
    #[serde(default)]
    market_cap: RawValue,
    currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetailModule {
    #[serde(default, rename = "trailingPE")]
    trailing_pe: RawValue,
    #[serde(default)]
    fifty_two_week_high: RawValue,
    #[serde(default)]
    fifty_two_week_low: RawValue,
    #[serde(default)]
    market_cap: RawValue,
    currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialDataModule {
    #[serde(default)]
    current_price: RawValue,
}

/// Yahoo wraps numbers as `{"raw": 1.0, "fmt": "1.00"}` and uses `{}` for missing.
#[derive(Debug, Default, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

impl SummaryResult {
    fn into_full_quote(self) -> FullQuote {
        let price = self.price.unwrap_or_default();
        let detail = self.summary_detail.unwrap_or_default();
        let financial = self.financial_data.unwrap_or_default();

        FullQuote {
            current_price: financial.current_price.raw,
            regular_market_price: price.regular_market_price.raw,
            market_cap: price.market_cap.raw.or(detail.market_cap.raw),
            trailing_pe: detail.trailing_pe.raw,
            fifty_two_week_high: detail.fifty_two_week_high.raw,
            fifty_two_week_low: detail.fifty_two_week_low.raw,
            currency: price.currency.or(detail.currency),
        }
    }
}

#[async_trait]
impl MarketDataProvider for YahooQuoteProvider {
    async fn fast_quote(&self, symbol: &str) -> Result<FastQuote, ProviderError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        let resp = self
            .client
            .get(&url)
            .query(&[("range", "1d"), ("interval", "1d")])
            .send()
            .await
            .map_err(ProviderError::from_send)?;

        let body: ChartResponse = check_status(resp)?
            .json()
            .await
            .map_err(ProviderError::from_body)?;

        if let Some(error) = body.chart.error {
            return Err(ProviderError::BadResponse(
                error.description.unwrap_or_else(|| "chart error".into()),
            ));
        }

        let meta = body
            .chart
            .result
            .and_then(|mut r| r.pop())
            .map(|r| r.meta)
            .ok_or_else(|| ProviderError::NoData(symbol.to_string()))?;

        Ok(FastQuote {
            last_price: meta.regular_market_price,
            market_cap: meta.market_cap,
        })
    }

    async fn full_quote(&self, symbol: &str) -> Result<FullQuote, ProviderError> {
        let crumb = self.fetch_crumb().await?;
        let url = format!("{}/v10/finance/quoteSummary/{}", self.base_url, symbol);

        let resp = self
            .client
            .get(&url)
            .query(&[("modules", SUMMARY_MODULES), ("crumb", crumb.as_str())])
            .send()
            .await
            .map_err(ProviderError::from_send)?;

        let body: SummaryResponse = check_status(resp)?
            .json()
            .await
            .map_err(ProviderError::from_body)?;

        if let Some(error) = body.quote_summary.error {
            return Err(ProviderError::BadResponse(
                error.description.unwrap_or_else(|| "quote summary error".into()),
            ));
        }

        body.quote_summary
            .result
            .and_then(|mut r| r.pop())
            .map(SummaryResult::into_full_quote)
            .ok_or_else(|| ProviderError::NoData(symbol.to_string()))
    }
}
