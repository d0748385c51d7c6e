/// The legacy data stored vehicle features either as a JSON-encoded array
/// or as a comma-separated string, depending on which form wrote the row.
/// Try JSON first, fall back to comma-splitting.
pub fn parse_features(raw: &str) -> Vec<String> {
    if let Ok(list) = serde_json::from_str::<Vec<String>>(raw) {
        return list
            .into_iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
    }

    raw.split(',')
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

/// Canonical storage representation: a JSON-encoded array. Only this format
/// is ever persisted.
pub fn encode_features(features: &[String]) -> String {
    serde_json::to_string(features).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_array() {
        let parsed = parse_features(r#"["Leather seats", "Minibar", "WiFi"]"#);
        assert_eq!(parsed, vec!["Leather seats", "Minibar", "WiFi"]);
    }

    #[test]
    fn parses_comma_separated_fallback() {
        let parsed = parse_features("Leather seats, Minibar , WiFi");
        assert_eq!(parsed, vec!["Leather seats", "Minibar", "WiFi"]);
    }

    #[test]
    fn drops_empty_segments() {
        assert_eq!(parse_features("a,,b, "), vec!["a", "b"]);
        assert!(parse_features("").is_empty());
        assert!(parse_features("[]").is_empty());
    }

    #[test]
    fn encode_round_trips_through_parse() {
        let features = vec!["Sunroof".to_string(), "Bar".to_string()];
        assert_eq!(parse_features(&encode_features(&features)), features);
    }
}
