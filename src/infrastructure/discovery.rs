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

//! Discovery: fetch every resource class the parser needs, in parallel,
//! before the command line is parsed. Discovery never fails the run; a class
//! that cannot be fetched is simply absent from the bundle and its choice
//! lists degrade to empty.

use crate::domain::bundle::ResourceBundle;
use crate::domain::command::Variant;
use crate::infrastructure::provider::ResourceProvider;
use crate::shared::Result;
use futures::future::join_all;
use std::time::Duration;

/// Per-class fetch budget. A slow class must not hold the whole parse
/// hostage.
const CLASS_TIMEOUT: Duration = Duration::from_secs(10);

const COMMON_CLASSES: &[&str] = &[
    "apps",
    "backups",
    "snapshots",
    "buckets",
    "charts",
    "clouds",
    "clusters",
    "credentials",
    "hooks",
    "namespaces",
    "protections",
    "scripts",
    "storageClasses",
];

/// Control plane only classes: directory objects and replication live behind
/// the REST API, not as Custom Resources.
const V2_CLASSES: &[&str] = &["groups", "replications", "users"];

/// Kubeconfig contexts only matter when writing Custom Resources.
const V3_CLASSES: &[&str] = &["contexts"];

/// The resource classes discovered for a variant.
pub fn classes(variant: Variant) -> Vec<&'static str> {
    let extra = match variant {
        Variant::V2 => V2_CLASSES,
        Variant::V3 => V3_CLASSES,
    };
    COMMON_CLASSES.iter().chain(extra).copied().collect()
}

/// Fetches every class concurrently and folds the successes into a bundle.
/// Returns the bundle together with one deduplicated diagnostic per distinct
/// failure reason; the diagnostics are also logged at debug level.
pub async fn discover(
    provider: &dyn ResourceProvider,
    variant: Variant,
) -> Result<(ResourceBundle, Vec<String>)> {
    let classes = classes(variant);
    let fetches = classes.iter().map(|class| async move {
        let outcome = tokio::time::timeout(CLASS_TIMEOUT, provider.list(class)).await;
        let outcome = match outcome {
            Ok(result) => result,
            Err(_) => Err(crate::shared::ToolkitError::discovery(
                *class,
                format!("timed out after {}s", CLASS_TIMEOUT.as_secs()),
            )),
        };
        (*class, outcome)
    });

    let mut bundle = ResourceBundle::new();
    let mut diagnostics: Vec<String> = Vec::new();
    for (class, outcome) in join_all(fetches).await {
        match outcome {
            Ok(response) => bundle.insert(class, response),
            Err(err) => {
                let diagnostic = format!("skipping '{class}': {err}");
                tracing::debug!(class, error = %err, "discovery fetch failed");
                if !diagnostics.contains(&diagnostic) {
                    diagnostics.push(diagnostic);
                }
            }
        }
    }
    Ok((bundle, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::provider::StaticProvider;
    use serde_json::json;

    #[tokio::test]
    async fn test_failed_classes_are_absent_not_fatal() {
        let provider = StaticProvider::new()
            .with("apps", json!({"items": [{"id": "app-1"}]}))
            .with("backups", json!({"items": []}));
        let (bundle, diagnostics) = discover(&provider, Variant::V2).await.unwrap();
        assert!(bundle.contains("apps"));
        assert!(bundle.contains("backups"));
        assert!(!bundle.contains("snapshots"));
        assert!(diagnostics.iter().any(|d| d.contains("snapshots")));
    }

    #[tokio::test]
    async fn test_variant_selects_class_set() {
        let v2 = classes(Variant::V2);
        let v3 = classes(Variant::V3);
        assert!(v2.contains(&"replications"));
        assert!(!v3.contains(&"replications"));
        assert!(v3.contains(&"contexts"));
        assert!(!v2.contains(&"contexts"));
    }

    #[tokio::test]
    async fn test_diagnostics_deduplicated() {
        let provider = StaticProvider::new();
        let (bundle, diagnostics) = discover(&provider, Variant::V2).await.unwrap();
        assert!(!bundle.contains("apps"));
        let mut sorted = diagnostics.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), diagnostics.len());
    }
}
