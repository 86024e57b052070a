pub mod duckduckgo;
pub mod market_data;
pub mod news_search;
pub mod provider;
pub mod symbol_search;
pub mod yahoo_quotes;
pub mod yahoo_search;
