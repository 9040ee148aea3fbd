// Copyright 2025 NetApp, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The backend seam. Discovery and dispatch talk to a `ResourceProvider`;
//! whether the records come from the control plane REST API, Custom
//! Resources, or canned fixtures is invisible above this trait.

use crate::domain::bundle::path_get;
use crate::shared::{Result, ToolkitError};
use serde_json::Value;
use std::collections::BTreeMap;

#[async_trait::async_trait]
pub trait ResourceProvider: Send + Sync {
    /// Lists every record of a resource class. The response is the raw
    /// backend document; callers project it through `ResourceBundle`.
    async fn list(&self, class: &str) -> Result<Value>;

    /// Fetches a single record by its identifier.
    async fn get(&self, class: &str, id: &str) -> Result<Value>;
}

/// A provider backed by canned per-class responses. Serves tests and offline
/// use; classes without a canned response fail the same way an unreachable
/// backend would.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    responses: BTreeMap<String, Value>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, class: impl Into<String>, response: Value) -> Self {
        self.responses.insert(class.into(), response);
        self
    }

    /// Builds a provider from one JSON document mapping class names to
    /// responses.
    pub fn from_document(doc: &Value) -> Result<Self> {
        let Value::Object(map) = doc else {
            return Err(ToolkitError::Provider(
                "seed document must be a JSON object of class responses".to_string(),
            ));
        };
        let mut provider = Self::new();
        for (class, response) in map {
            provider.responses.insert(class.clone(), response.clone());
        }
        Ok(provider)
    }
}

#[async_trait::async_trait]
impl ResourceProvider for StaticProvider {
    async fn list(&self, class: &str) -> Result<Value> {
        self.responses
            .get(class)
            .cloned()
            .ok_or_else(|| ToolkitError::Provider(format!("no response for class '{class}'")))
    }

    async fn get(&self, class: &str, id: &str) -> Result<Value> {
        let response = self.list(class).await?;
        let items = match path_get(&response, "items") {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        items
            .into_iter()
            .find(|item| {
                ["id", "name", "metadata.name"]
                    .iter()
                    .any(|key| path_get(item, key).and_then(Value::as_str) == Some(id))
            })
            .ok_or_else(|| ToolkitError::Provider(format!("no {class} record with id '{id}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_returns_canned_response() {
        let provider =
            StaticProvider::new().with("apps", json!({"items": [{"id": "app-1"}]}));
        let response = provider.list("apps").await.unwrap();
        assert_eq!(path_get(&response, "items").unwrap().as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_class_is_a_provider_error() {
        let provider = StaticProvider::new();
        let err = provider.list("apps").await.unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_get_matches_any_identifier_key() {
        let provider = StaticProvider::new().with(
            "apps",
            json!({"items": [
                {"id": "a-1", "name": "wordpress"},
                {"metadata": {"name": "gitlab"}},
            ]}),
        );
        assert!(provider.get("apps", "wordpress").await.is_ok());
        assert!(provider.get("apps", "gitlab").await.is_ok());
        assert!(provider.get("apps", "missing").await.is_err());
    }

    #[tokio::test]
    async fn test_from_document() {
        let doc = json!({
            "apps": {"items": []},
            "backups": {"items": [{"id": "b-1"}]},
        });
        let provider = StaticProvider::from_document(&doc).unwrap();
        assert!(provider.list("backups").await.is_ok());
        assert!(StaticProvider::from_document(&json!([1, 2])).is_err());
    }
}
