use serde_json::Value;
use std::collections::BTreeSet;
use std::time::Duration;

use super::LoadError;
use crate::shared::config::{resolve_path, GeoConfig};

/// Property of each feature that holds the US state name
pub const FEATURE_ID_KEY: &str = "properties.name";

/// US state boundary document, keyed by `properties.name`
#[derive(Debug, Clone)]
pub struct GeoReference {
    document: Value,
    state_names: BTreeSet<String>,
}

impl GeoReference {
    /// Validate a GeoJSON FeatureCollection and index its state names
    pub fn from_document(document: Value) -> Result<Self, LoadError> {
        let kind = document.get("type").and_then(Value::as_str);
        if kind != Some("FeatureCollection") {
            return Err(LoadError::InvalidGeoJson(format!(
                "expected a FeatureCollection, got {:?}",
                kind
            )));
        }

        let features = document
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| LoadError::InvalidGeoJson("missing 'features' array".to_string()))?;

        let state_names: BTreeSet<String> = features
            .iter()
            .filter_map(|f| f.pointer("/properties/name").and_then(Value::as_str))
            .map(str::to_string)
            .collect();

        if state_names.is_empty() {
            return Err(LoadError::InvalidGeoJson(
                "no feature carries properties.name".to_string(),
            ));
        }

        Ok(Self {
            document,
            state_names,
        })
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn contains_state(&self, name: &str) -> bool {
        self.state_names.contains(name)
    }

    pub fn state_count(&self) -> usize {
        self.state_names.len()
    }
}

/// Load the boundary document from the configured local path, or fetch it
pub async fn load_geo_reference(config: &GeoConfig) -> Result<GeoReference, LoadError> {
    let document = match &config.path {
        Some(path) => read_local(path)?,
        None => fetch_remote(&config.url, config.timeout_secs).await?,
    };

    let geo = GeoReference::from_document(document)?;
    tracing::info!("Geography loaded: {} state features", geo.state_count());
    Ok(geo)
}

fn read_local(path: &str) -> Result<Value, LoadError> {
    let resolved = resolve_path(path);
    if !resolved.exists() {
        return Err(LoadError::NotFound(resolved.display().to_string()));
    }

    tracing::info!("Reading geography from {}", resolved.display());
    let contents = std::fs::read_to_string(&resolved)?;
    serde_json::from_str(&contents).map_err(|e| LoadError::InvalidGeoJson(e.to_string()))
}

async fn fetch_remote(url: &str, timeout_secs: u64) -> Result<Value, LoadError> {
    tracing::info!("Fetching geography from {}", url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;

    let document = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await?;

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> Value {
        json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "name": "Texas" }, "geometry": null },
                { "type": "Feature", "properties": { "name": "Ohio" }, "geometry": null },
                { "type": "Feature", "properties": {}, "geometry": null }
            ]
        })
    }

    #[test]
    fn test_indexes_state_names() {
        let geo = GeoReference::from_document(sample_document()).unwrap();
        assert_eq!(geo.state_count(), 2);
        assert!(geo.contains_state("Texas"));
        assert!(!geo.contains_state("Puerto Rico"));
    }

    #[test]
    fn test_rejects_non_feature_collection() {
        let err = GeoReference::from_document(json!({ "type": "Feature" })).unwrap_err();
        assert!(matches!(err, LoadError::InvalidGeoJson(_)));
    }

    #[tokio::test]
    async fn test_local_path_takes_precedence() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("us-states.json");
        std::fs::write(&path, sample_document().to_string()).unwrap();

        let config = GeoConfig {
            // unreachable on purpose; must not be contacted
            url: "http://127.0.0.1:9/us-states.json".to_string(),
            path: Some(path.to_string_lossy().into_owned()),
            timeout_secs: 1,
        };

        let geo = load_geo_reference(&config).await.unwrap();
        assert!(geo.contains_state("Ohio"));
    }

    #[tokio::test]
    async fn test_missing_local_file_names_path() {
        let config = GeoConfig {
            url: String::new(),
            path: Some("/nonexistent/us-states.json".to_string()),
            timeout_secs: 1,
        };

        let err = load_geo_reference(&config).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/us-states.json"));
    }
}
