use serde::{Deserialize, Serialize};

/// Происхождение трека в эфирном логе
///
/// Drives the compliance calculation: only `Foreign` entries count towards
/// the surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentOrigin {
    #[serde(alias = "local", alias = "LOCAL")]
    Local,
    #[serde(alias = "foreign", alias = "FOREIGN")]
    Foreign,
}

impl ContentOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentOrigin::Local => "Local",
            ContentOrigin::Foreign => "Foreign",
        }
    }

    pub fn is_foreign(&self) -> bool {
        matches!(self, ContentOrigin::Foreign)
    }
}

impl std::fmt::Display for ContentOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_accepts_lowercase() {
        let origin: ContentOrigin = serde_json::from_str("\"foreign\"").unwrap();
        assert_eq!(origin, ContentOrigin::Foreign);
        let origin: ContentOrigin = serde_json::from_str("\"Local\"").unwrap();
        assert_eq!(origin, ContentOrigin::Local);
        assert_eq!(ContentOrigin::Foreign.to_string(), "Foreign");
    }
}
