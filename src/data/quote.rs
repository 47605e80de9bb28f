use crate::data::FetchError;
use serde::Deserialize;
use std::collections::HashMap;

/// One fetched snapshot of an asset's price and supply in a target currency.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub name: String,
    pub symbol: String,
    pub currency: String,
    pub price: f64,
    pub percent_change_1h: f64,
    pub percent_change_24h: f64,
    pub circulating_supply: f64,
    pub total_supply: f64,
}

#[derive(Debug, Deserialize)]
struct QuotesResponse {
    data: HashMap<String, Listing>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    name: String,
    circulating_supply: f64,
    total_supply: f64,
    quote: HashMap<String, Conversion>,
}

#[derive(Debug, Deserialize)]
struct Conversion {
    price: f64,
    percent_change_1h: f64,
    percent_change_24h: f64,
}

/// Picks `data.<symbol>` and `quote.<currency>` out of a quotes/latest body.
pub fn parse_quote(body: &[u8], symbol: &str, currency: &str) -> Result<Quote, FetchError> {
    let mut response: QuotesResponse =
        serde_json::from_slice(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    let mut listing = response
        .data
        .remove(symbol)
        .ok_or_else(|| FetchError::Parse(format!("missing data.{}", symbol)))?;

    let conversion = listing
        .quote
        .remove(currency)
        .ok_or_else(|| FetchError::Parse(format!("missing data.{}.quote.{}", symbol, currency)))?;

    Ok(Quote {
        name: listing.name,
        symbol: symbol.to_string(),
        currency: currency.to_string(),
        price: conversion.price,
        percent_change_1h: conversion.percent_change_1h,
        percent_change_24h: conversion.percent_change_24h,
        circulating_supply: listing.circulating_supply,
        total_supply: listing.total_supply,
    })
}

#[cfg(test)]
pub(crate) fn sample_body(price: f64) -> String {
    format!(
        r#"{{"status":{{"error_code":0}},"data":{{"XRP":{{"id":52,"name":"XRP","symbol":"XRP",
        "circulating_supply":50000000000,"total_supply":100000000000,
        "quote":{{"CAD":{{"price":{},"volume_24h":1.5,"percent_change_1h":1.0,"percent_change_24h":-2.0}}}}}}}}}}"#,
        price
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_listing() {
        let quote = parse_quote(sample_body(0.5).as_bytes(), "XRP", "CAD").unwrap();
        assert_eq!(quote.name, "XRP");
        assert_eq!(quote.currency, "CAD");
        assert_eq!(quote.price, 0.5);
        assert_eq!(quote.percent_change_1h, 1.0);
        assert_eq!(quote.percent_change_24h, -2.0);
        assert_eq!(quote.circulating_supply, 50_000_000_000.0);
        assert_eq!(quote.total_supply, 100_000_000_000.0);
    }

    #[test]
    fn unknown_currency_is_a_parse_error() {
        let err = parse_quote(sample_body(0.5).as_bytes(), "XRP", "USD").unwrap_err();
        assert!(matches!(err, FetchError::Parse(ref msg) if msg.contains("quote.USD")));
    }

    #[test]
    fn unknown_symbol_is_a_parse_error() {
        let err = parse_quote(sample_body(0.5).as_bytes(), "BTC", "CAD").unwrap_err();
        assert!(matches!(err, FetchError::Parse(ref msg) if msg.contains("data.BTC")));
    }

    #[test]
    fn null_supply_is_a_parse_error() {
        let body = sample_body(0.5).replace("\"total_supply\":100000000000", "\"total_supply\":null");
        let err = parse_quote(body.as_bytes(), "XRP", "CAD").unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[test]
    fn error_envelope_without_data_is_a_parse_error() {
        let body = br#"{"status":{"error_code":1002,"error_message":"API key missing."}}"#;
        assert!(matches!(parse_quote(body, "XRP", "CAD"), Err(FetchError::Parse(_))));
    }
}
