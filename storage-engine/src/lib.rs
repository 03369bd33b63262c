mod google_sheets;
mod moka_cache;
mod token;

pub use google_sheets::GoogleSheetsStore;
pub use moka_cache::MokaRosterCache;
pub use token::{ServiceAccountTokenSource, StaticToken, TokenSource};
