use contracts::shared::compliance::TaxPolicy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiSection,
    pub loading: LoadingSection,
    pub table: TableSection,
    pub tax: TaxPolicy,
    pub lookup: LookupSection,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ApiSection {
    /// Absent means "same host as the page, API port".
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoadingSection {
    pub min_visible_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TableSection {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LookupSection {
    pub pending_label: String,
    pub unavailable_label: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[loading]
min_visible_ms = 300

[table]
page_size = 10
page_size_options = [5, 10, 25]

[tax]
threshold = 30.0
surcharge_rate_per_point = 0.015

[lookup]
pending_label = "Loading..."
unavailable_label = "N/A"
"#;

impl Default for LoadingSection {
    fn default() -> Self {
        Self { min_visible_ms: 300 }
    }
}

impl Default for TableSection {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_size_options: vec![5, 10, 25],
        }
    }
}

impl Default for LookupSection {
    fn default() -> Self {
        Self {
            pending_label: "Loading...".to_string(),
            unavailable_label: "N/A".to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api: ApiSection::default(),
            loading: LoadingSection::default(),
            table: TableSection::default(),
            tax: TaxPolicy::default(),
            lookup: LookupSection::default(),
        }
    }
}

impl ClientConfig {
    /// Configuration embedded in the binary.
    pub fn embedded() -> Self {
        Self::from_toml(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::warn!("embedded config is invalid, using built-in defaults: {}", e);
            Self::default()
        })
    }

    /// Parse an override document; missing sections keep their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        let mut config: ClientConfig = toml::from_str(contents)?;
        if config.table.page_size == 0 {
            config.table.page_size = TableSection::default().page_size;
        }
        Ok(config)
    }
}
