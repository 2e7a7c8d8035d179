//! Lenient decoders for numbers the station API is not consistent about.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Number(f64),
    Text(String),
}

/// Accepts a JSON number, a numeric string or `null`.
///
/// `null`, missing and non-numeric strings decode as `0.0`.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberLike>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberLike::Number(n)) => n,
        Some(NumberLike::Text(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        None => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_f64")]
        value: f64,
    }

    fn probe(json: &str) -> f64 {
        serde_json::from_str::<Probe>(json).unwrap().value
    }

    #[test]
    fn test_lenient_f64() {
        assert_eq!(probe(r#"{"value": 12.5}"#), 12.5);
        assert_eq!(probe(r#"{"value": "5000"}"#), 5000.0);
        assert_eq!(probe(r#"{"value": null}"#), 0.0);
        assert_eq!(probe(r#"{"value": "abc"}"#), 0.0);
        assert_eq!(probe(r#"{}"#), 0.0);
    }
}
