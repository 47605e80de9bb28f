pub mod fetch;
pub mod history;
pub mod quote;

pub use fetch::{FetchError, PriceClient};
pub use history::HistoryBuffer;
pub use quote::Quote;
