use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const FUNDAMENTALS_ERROR: &str = "Could not fetch data";
const UNAVAILABLE: &str = "N/A";

/// Snapshot of a ticker's headline metrics.
///
/// A metric the provider did not report is `None` and goes over the wire as
/// `"N/A"`, never as `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    #[serde(with = "metric")]
    pub current_price: Option<f64>,
    #[serde(with = "metric")]
    pub market_cap: Option<f64>,
    #[serde(with = "metric")]
    pub pe_ratio: Option<f64>,
    #[serde(with = "metric")]
    pub high_52: Option<f64>,
    #[serde(with = "metric")]
    pub low_52: Option<f64>,
    pub currency: String,
}

/// Either a full record or the error marker returned when every lookup failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FundamentalsReport {
    Available(Fundamentals),
    Unavailable { error: String },
}

impl FundamentalsReport {
    pub fn unavailable() -> Self {
        FundamentalsReport::Unavailable {
            error: FUNDAMENTALS_ERROR.to_string(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, FundamentalsReport::Available(_))
    }
}

mod metric {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) if v.is_finite() => serializer.serialize_f64(*v),
            _ => serializer.serialize_str(UNAVAILABLE),
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Ok(match Option::<Wire>::deserialize(deserializer)? {
            Some(Wire::Number(v)) => Some(v),
            Some(Wire::Text(_)) | None => None,
        })
    }
}
