use serde::Deserialize;

/// One asset row from the markets feed. The upstream payload carries many
/// more fields; only the ones the ticker reads are kept.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketEntry {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    // Nulled by the feed for some assets (stablecoins, fresh listings).
    #[serde(default)]
    pub price_change_percentage_1h_in_currency: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h_in_currency: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_7d_in_currency: Option<f64>,
    pub last_updated: String,
}

/// First entry matching the token by name or symbol (case-insensitive), or
/// by id after mapping the token's whitespace to hyphens. Entries keep the
/// provider's market-cap ranking, so the first hit is the highest-ranked.
pub fn find_entry<'a>(entries: &'a [MarketEntry], token: &str) -> Option<&'a MarketEntry> {
    let wanted = token.to_lowercase();
    let wanted_id: String = wanted
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();

    entries.iter().find(|e| {
        e.name.to_lowercase() == wanted
            || e.symbol.to_lowercase() == wanted
            || e.id.to_lowercase() == wanted_id
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, symbol: &str, name: &str) -> MarketEntry {
        MarketEntry {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            current_price: 1.0,
            price_change_percentage_1h_in_currency: None,
            price_change_percentage_24h_in_currency: None,
            price_change_percentage_7d_in_currency: None,
            last_updated: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn matches_name_case_insensitive() {
        let entries = vec![entry("bitcoin", "btc", "Bitcoin")];
        assert!(find_entry(&entries, "BITCOIN").is_some());
        assert!(find_entry(&entries, "bitcoin").is_some());
    }

    #[test]
    fn matches_symbol_case_insensitive() {
        let entries = vec![entry("bitcoin", "btc", "Bitcoin")];
        let found = find_entry(&entries, "BTC").unwrap();
        assert_eq!(found.id, "bitcoin");
    }

    #[test]
    fn matches_id_with_whitespace_mapped_to_hyphens() {
        let entries = vec![entry("usd-coin", "usdc", "USDC")];
        let found = find_entry(&entries, "USD Coin").unwrap();
        assert_eq!(found.id, "usd-coin");
    }

    #[test]
    fn whitespace_mapping_applies_to_id_only() {
        // "US DC" maps to "us-dc" for the id comparison, which matches
        // nothing; the name/symbol comparisons see the raw token.
        let entries = vec![entry("usd-coin", "usdc", "USDC")];
        assert!(find_entry(&entries, "US DC").is_none());
    }

    #[test]
    fn first_match_wins_in_ranking_order() {
        let entries = vec![
            entry("bitcoin", "btc", "Bitcoin"),
            entry("bitcoin-cash", "btc", "Bitcoin Cash"),
        ];
        let found = find_entry(&entries, "btc").unwrap();
        assert_eq!(found.id, "bitcoin");
    }

    #[test]
    fn no_match_returns_none() {
        let entries = vec![entry("bitcoin", "btc", "Bitcoin")];
        assert!(find_entry(&entries, "dogecoin").is_none());
    }

    #[test]
    fn deserializes_feed_row_ignoring_unknown_fields() {
        let raw = serde_json::json!({
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://example.com/btc.png",
            "current_price": 64230.0,
            "market_cap": 1264000000000u64,
            "market_cap_rank": 1,
            "price_change_percentage_1h_in_currency": 0.25,
            "price_change_percentage_24h_in_currency": -1.1,
            "price_change_percentage_7d_in_currency": null,
            "last_updated": "2024-05-01T12:00:00.000Z"
        });
        let entry: MarketEntry = serde_json::from_value(raw).unwrap();
        assert_eq!(entry.symbol, "btc");
        assert_eq!(entry.price_change_percentage_24h_in_currency, Some(-1.1));
        assert_eq!(entry.price_change_percentage_7d_in_currency, None);
    }
}
