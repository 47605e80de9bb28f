use crate::data::Quote;
use std::fmt;

/// Price digits split for differentiated styling: `int.dd` bright, the rest dim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceParts {
    pub integer: String,
    pub leading_decimals: String,
    pub trailing_decimals: String,
}

impl PriceParts {
    pub const PRECISION: usize = 10;

    pub fn from_price(price: f64) -> Self {
        let full = format!("{:.*}", Self::PRECISION, price);
        let (integer, decimals) = full.split_once('.').unwrap_or((full.as_str(), ""));
        let split = decimals.len().min(2);
        Self {
            integer: integer.to_string(),
            leading_decimals: decimals[..split].to_string(),
            trailing_decimals: decimals[split..].to_string(),
        }
    }

    pub fn head(&self) -> String {
        format!("{}.{}", self.integer, self.leading_decimals)
    }
}

impl fmt::Display for PriceParts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.head(), self.trailing_decimals)
    }
}

/// Label/value rows shown under the price.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailBlock {
    pub rows: Vec<DetailRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
    /// Sign of a percent change, if the row is one.
    pub trend: Option<f64>,
}

impl DetailBlock {
    pub fn from_quote(quote: &Quote) -> Self {
        let row = |label: &'static str, value: String| DetailRow {
            label,
            value,
            trend: None,
        };
        let change = |label: &'static str, pct: f64| DetailRow {
            label,
            value: format_percent(pct),
            trend: Some(pct),
        };

        Self {
            rows: vec![
                row("Name", quote.name.clone()),
                row("Circulating Supply", group_thousands(quote.circulating_supply)),
                row("Total Supply", group_thousands(quote.total_supply)),
                row("Price", format!("{:.5} {}", quote.price, quote.currency)),
                change("Change (1h)", quote.percent_change_1h),
                change("Change (24h)", quote.percent_change_24h),
            ],
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| format!("{}: {}", r.label, r.value))
            .collect()
    }
}

impl fmt::Display for DetailBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

pub fn format_percent(pct: f64) -> String {
    format!("{:+.2}%", pct)
}

/// Rounds to a whole number and inserts `,` every three digits.
pub fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{}{}", sign, out)
}

/// Short axis/bar label, e.g. `50.0B`.
pub fn compact_amount(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("{:.1}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else {
        format!("{:.0}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xrp() -> Quote {
        Quote {
            name: "XRP".to_string(),
            symbol: "XRP".to_string(),
            currency: "CAD".to_string(),
            price: 0.5,
            percent_change_1h: 1.0,
            percent_change_24h: -2.0,
            circulating_supply: 50_000_000_000.0,
            total_supply: 100_000_000_000.0,
        }
    }

    #[test]
    fn splits_price_at_two_decimals() {
        let parts = PriceParts::from_price(1.23456789);
        assert_eq!(parts.integer, "1");
        assert_eq!(parts.leading_decimals, "23");
        assert_eq!(parts.trailing_decimals, "45678900");
        assert_eq!(parts.head(), "1.23");
        assert_eq!(parts.to_string(), format!("{:.10}", 1.23456789));
    }

    #[test]
    fn splits_large_price() {
        let parts = PriceParts::from_price(91234.5);
        assert_eq!(parts.integer, "91234");
        assert_eq!(parts.leading_decimals, "50");
        assert_eq!(parts.trailing_decimals, "00000000");
    }

    #[test]
    fn percent_always_signed() {
        assert_eq!(format_percent(1.234), "+1.23%");
        assert_eq!(format_percent(-0.45), "-0.45%");
        assert_eq!(format_percent(0.0), "+0.00%");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.4), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(59_128_312_946.7), "59,128,312,947");
        assert_eq!(group_thousands(-1_234_567.0), "-1,234,567");
    }

    #[test]
    fn detail_block_matches_display_format() {
        let text = DetailBlock::from_quote(&xrp()).to_string();
        assert!(text.contains("Name: XRP"));
        assert!(text.contains("Circulating Supply: 50,000,000,000"));
        assert!(text.contains("Total Supply: 100,000,000,000"));
        assert!(text.contains("Price: 0.50000 CAD"));
        assert!(text.contains("Change (1h): +1.00%"));
        assert!(text.contains("Change (24h): -2.00%"));
    }

    #[test]
    fn only_percent_rows_carry_trend() {
        let block = DetailBlock::from_quote(&xrp());
        let trends: Vec<_> = block.rows.iter().map(|r| r.trend).collect();
        assert_eq!(trends, vec![None, None, None, None, Some(1.0), Some(-2.0)]);
    }

    #[test]
    fn compacts_supply() {
        assert_eq!(compact_amount(50_000_000_000.0), "50.0B");
        assert_eq!(compact_amount(1_300_000.0), "1.3M");
        assert_eq!(compact_amount(12.0), "12");
    }
}
