/// Append-only (timestamp, price) log for the current run.
///
/// Stored as two index-aligned vectors so the chart can borrow either axis
/// directly. Nothing is ever removed or persisted.
#[derive(Debug, Clone, Default)]
pub struct HistoryBuffer {
    timestamps: Vec<String>,
    prices: Vec<f64>,
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, timestamp: impl Into<String>, price: f64) {
        self.timestamps.push(timestamp.into());
        self.prices.push(price);
    }

    pub fn timestamps(&self) -> &[String] {
        &self.timestamps
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn last_price(&self) -> Option<f64> {
        self.prices.last().copied()
    }

    pub fn last_timestamp(&self) -> Option<&str> {
        self.timestamps.last().map(String::as_str)
    }
}
