use crate::domain::model::PlantGuide;
use crate::domain::ports::{PlantCatalog, Storage};
use crate::utils::error::{Result, TogrowError};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const SEED_CATALOG: &[u8] = include_bytes!("../../data/plants.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFormat {
    Json,
    Csv,
}

impl CatalogFormat {
    /// 依副檔名判斷格式。
    pub fn from_path(path: &str) -> Option<Self> {
        let extension = std::path::Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        match extension.as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// 目錄中的一列。MySQL 以 JSON 字串存 `suitableSeason`，MongoDB 以 `_id` 為鍵，
/// 這裡一併接受並轉成 `PlantGuide`。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogRecord {
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    difficulty: i64,
    #[serde(default, alias = "suitableSeason", deserialize_with = "deserialize_terms")]
    suitable_terms: Vec<String>,
    #[serde(default)]
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsvRecord {
    id: String,
    name: String,
    description: Option<String>,
    difficulty: i64,
    #[serde(alias = "suitableSeason")]
    suitable_terms: Option<String>,
    image_url: Option<String>,
}

impl From<CatalogRecord> for PlantGuide {
    fn from(record: CatalogRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description.unwrap_or_default(),
            difficulty: record.difficulty,
            suitable_terms: record.suitable_terms,
            image_url: record.image_url,
        }
    }
}

impl From<CsvRecord> for PlantGuide {
    fn from(record: CsvRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description.unwrap_or_default(),
            difficulty: record.difficulty,
            suitable_terms: record
                .suitable_terms
                .as_deref()
                .map(parse_term_list)
                .unwrap_or_default(),
            image_url: record.image_url,
        }
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        Value::Object(map) => match map.get("$oid") {
            Some(Value::String(oid)) => Ok(oid.clone()),
            _ => Err(serde::de::Error::custom("id object must contain a string $oid")),
        },
        other => Err(serde::de::Error::custom(format!(
            "unsupported id value: {}",
            other
        ))),
    }
}

fn deserialize_terms<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(term) => Ok(term),
                other => Err(serde::de::Error::custom(format!(
                    "solar term must be a string, got {}",
                    other
                ))),
            })
            .collect(),
        Value::String(raw) => Ok(parse_term_list(&raw)),
        other => Err(serde::de::Error::custom(format!(
            "unsupported suitableTerms value: {}",
            other
        ))),
    }
}

/// `["春分","清明"]` (JSON 欄位) 或 `春分|清明` / `春分,清明` (CSV 欄位)。
fn parse_term_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        if let Ok(terms) = serde_json::from_str::<Vec<String>>(trimmed) {
            return terms;
        }
    }

    trimmed
        .split(['|', ',', '，'])
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn decode_json(data: &[u8]) -> Result<Vec<PlantGuide>> {
    let records: Vec<CatalogRecord> =
        serde_json::from_slice(data).map_err(|e| TogrowError::CatalogError {
            message: format!("Invalid JSON catalog: {}", e),
        })?;
    Ok(records.into_iter().map(PlantGuide::from).collect())
}

pub fn decode_csv(data: &[u8]) -> Result<Vec<PlantGuide>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut guides = Vec::new();
    for row in reader.deserialize::<CsvRecord>() {
        guides.push(PlantGuide::from(row?));
    }
    Ok(guides)
}

pub fn decode(data: &[u8], format: CatalogFormat) -> Result<Vec<PlantGuide>> {
    match format {
        CatalogFormat::Json => decode_json(data),
        CatalogFormat::Csv => decode_csv(data),
    }
}

/// 內建的五筆樣本植物。
pub fn seed_catalog() -> Result<Vec<PlantGuide>> {
    decode_json(SEED_CATALOG)
}

/// 內建樣本的原始 JSON，供初始化目錄檔使用。
pub fn seed_catalog_json() -> &'static [u8] {
    SEED_CATALOG
}

/// 從 `Storage` 讀取目錄檔 (本機磁碟或 S3)。
#[derive(Debug, Clone)]
pub struct StorageCatalog<S: Storage> {
    storage: S,
    path: String,
    format: CatalogFormat,
}

impl<S: Storage> StorageCatalog<S> {
    pub fn new(storage: S, path: impl Into<String>, format: CatalogFormat) -> Self {
        Self {
            storage,
            path: path.into(),
            format,
        }
    }

    /// 格式由副檔名決定。
    pub fn from_path(storage: S, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let format =
            CatalogFormat::from_path(&path).ok_or_else(|| TogrowError::InvalidConfigValueError {
                field: "catalog.path".to_string(),
                value: path.clone(),
                reason: "Catalog file must end in .json or .csv".to_string(),
            })?;
        Ok(Self::new(storage, path, format))
    }
}

#[async_trait]
impl<S: Storage> PlantCatalog for StorageCatalog<S> {
    async fn load_guides(&self) -> Result<Vec<PlantGuide>> {
        tracing::debug!("Loading plant catalog from {} ({:?})", self.path, self.format);
        let data = self.storage.read_file(&self.path).await?;
        let guides = decode(&data, self.format)?;
        tracing::debug!("Loaded {} plant guides", guides.len());
        Ok(guides)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    guides: Vec<PlantGuide>,
}

impl InMemoryCatalog {
    pub fn new(guides: Vec<PlantGuide>) -> Self {
        Self { guides }
    }

    pub fn seeded() -> Result<Self> {
        Ok(Self::new(seed_catalog()?))
    }
}

#[async_trait]
impl PlantCatalog for InMemoryCatalog {
    async fn load_guides(&self) -> Result<Vec<PlantGuide>> {
        Ok(self.guides.clone())
    }
}
