mod analysis;
mod fundamentals;
mod news;

pub use analysis::{AnalyzeRequest, StockAnalysis, Verdict};
pub use fundamentals::{Fundamentals, FundamentalsReport, FUNDAMENTALS_ERROR};
pub use news::{GeneralNewsResponse, NewsItem, MISSING_SOURCE, MISSING_TITLE, MISSING_URL};
