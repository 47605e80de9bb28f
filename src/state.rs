use crate::data::{FetchError, HistoryBuffer, Quote};
use crate::ui::format::{DetailBlock, PriceParts};
use crate::ui::ChartPanes;
use tracing::{debug, info, warn};

pub const FETCH_ERROR_TEXT: &str = "Error fetching price";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting on the first fetch result.
    Initializing,
    Running,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PriceLabel {
    Fetching,
    Price { currency: String, parts: PriceParts },
    Error,
}

/// Everything the screen shows, updated once per applied fetch result.
#[derive(Debug)]
pub struct TickerState {
    pub phase: Phase,
    pub label: PriceLabel,
    pub detail: Option<DetailBlock>,
    pub charts: ChartPanes,
    pub last_error: Option<String>,
    history: HistoryBuffer,
    latest: Option<Quote>,
}

impl TickerState {
    pub fn new(symbol: String, currency: String) -> Self {
        Self {
            phase: Phase::Initializing,
            label: PriceLabel::Fetching,
            detail: None,
            charts: ChartPanes::new(symbol, currency),
            last_error: None,
            history: HistoryBuffer::new(),
            latest: None,
        }
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn latest(&self) -> Option<&Quote> {
        self.latest.as_ref()
    }

    /// Folds one tick's result into the screen state.
    ///
    /// A failure only swaps the price label; history, detail text and charts
    /// keep whatever the last good tick produced.
    pub fn apply(&mut self, result: Result<Quote, FetchError>, timestamp: String) {
        self.phase = Phase::Running;

        let quote = match result {
            Ok(quote) => quote,
            Err(e) => {
                if e.is_auth() {
                    warn!("quote request rejected, check API_KEY: {}", e);
                } else {
                    warn!("quote fetch failed: {}", e);
                }
                self.label = PriceLabel::Error;
                self.last_error = Some(e.to_string());
                return;
            }
        };

        info!(symbol = %quote.symbol, price = quote.price, at = %timestamp, "quote received");

        self.label = PriceLabel::Price {
            currency: quote.currency.clone(),
            parts: PriceParts::from_price(quote.price),
        };
        self.detail = Some(DetailBlock::from_quote(&quote));
        self.history.append(timestamp, quote.price);
        self.charts
            .redraw(&self.history, quote.circulating_supply, quote.total_supply);
        debug!(points = self.history.len(), redraws = self.charts.redraws(), "charts updated");
        self.last_error = None;
        self.latest = Some(quote);
    }
}
