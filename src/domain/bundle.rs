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

//! Decoded backend responses, keyed by resource class. Discovery fills the
//! bundle once; everything downstream only projects out of it so the same
//! backend call never has to be made twice in one invocation.

use crate::shared::{Result, UsageError};
use serde_json::Value;
use std::collections::BTreeMap;

/// Evaluates an `a.b.c` dotted path against a JSON-like value. Total: any
/// miss (absent key, non-mapping intermediate) yields `None`.
pub fn path_get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Projects a JSON value to the strings it contributes to a choices list.
/// Scalars stringify; a mapping contributes its keys (secret payloads list
/// their key names, not their contents); an array contributes its string
/// elements.
fn project(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Number(n) => out.push(n.to_string()),
        Value::Bool(b) => out.push(b.to_string()),
        Value::Object(map) => out.extend(map.keys().cloned()),
        Value::Array(items) => {
            for item in items {
                if let Value::String(s) = item {
                    out.push(s.clone());
                }
            }
        }
        Value::Null => {}
    }
}

/// Mapping from resource class name to the decoded `{"items": [...]}` backend
/// response for that class.
#[derive(Debug, Default, Clone)]
pub struct ResourceBundle {
    entries: BTreeMap<String, Value>,
}

impl ResourceBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class: impl Into<String>, response: Value) {
        self.entries.insert(class.into(), response);
    }

    pub fn response(&self, class: &str) -> Option<&Value> {
        self.entries.get(class)
    }

    pub fn contains(&self, class: &str) -> bool {
        self.entries.contains_key(class)
    }

    /// The `items` array for a class, or an empty slice when the class was
    /// never discovered or the response carried no items.
    pub fn items(&self, class: &str) -> &[Value] {
        self.entries
            .get(class)
            .and_then(|response| response.get("items"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Projects the items of `class` to the values found at the dotted path
    /// `key`, preserving item order. With a filter, only items whose
    /// `filter_key` path equals `filter_value` contribute.
    pub fn build_list(
        &self,
        class: &str,
        key: &str,
        filter: Option<(&str, &str)>,
    ) -> Vec<String> {
        let mut out = Vec::new();
        for item in self.items(class) {
            if let Some((filter_key, filter_value)) = filter {
                let matches = path_get(item, filter_key)
                    .map(|v| match v {
                        Value::String(s) => s == filter_value,
                        other => other.to_string() == filter_value,
                    })
                    .unwrap_or(false);
                if !matches {
                    continue;
                }
            }
            if let Some(value) = path_get(item, key) {
                project(value, &mut out);
            }
        }
        out
    }

    /// Finds the unique item of `class` whose `key` path equals `value`.
    /// No match, or more than one, is a usage error: the identifier came off
    /// the command line and does not address a single resource.
    pub fn get_single(&self, class: &str, key: &str, value: &str) -> Result<&Value> {
        let mut found = None;
        for item in self.items(class) {
            let matches = path_get(item, key)
                .and_then(Value::as_str)
                .map(|s| s == value)
                .unwrap_or(false);
            if matches {
                if found.is_some() {
                    return Err(UsageError::new(format!(
                        "multiple {class} entries match {key}={value}"
                    ))
                    .into());
                }
                found = Some(item);
            }
        }
        found.ok_or_else(|| {
            UsageError::new(format!("no {class} entry matches {key}={value}")).into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_bundle() -> ResourceBundle {
        let mut bundle = ResourceBundle::new();
        bundle.insert(
            "apps",
            json!({"items": [
                {"id": "app-1", "name": "wordpress", "metadata": {"labels": {"tier": "web"}}},
                {"id": "app-2", "name": "mysql", "metadata": {"labels": {"tier": "db"}}},
            ]}),
        );
        bundle.insert(
            "clusters",
            json!({"items": [
                {"id": "cl-1", "managedState": "managed"},
                {"id": "cl-2", "managedState": "unmanaged"},
                {"id": "cl-3", "managedState": "managed"},
            ]}),
        );
        bundle.insert(
            "credentials",
            json!({"items": [
                {"metadata": {"name": "s3-creds"}, "data": {"accessKeyID": "x", "secretAccessKey": "y"}},
            ]}),
        );
        bundle
    }

    #[test]
    fn test_path_get_nested() {
        let bundle = sample_bundle();
        let item = &bundle.items("apps")[0];
        assert_eq!(
            path_get(item, "metadata.labels.tier").and_then(Value::as_str),
            Some("web")
        );
        assert_eq!(path_get(item, "metadata.missing.tier"), None);
        assert_eq!(path_get(item, "id.tier"), None);
    }

    #[test]
    fn test_build_list_projects_in_order() {
        let bundle = sample_bundle();
        assert_eq!(bundle.build_list("apps", "id", None), vec!["app-1", "app-2"]);
        assert_eq!(
            bundle.build_list("apps", "name", None),
            vec!["wordpress", "mysql"]
        );
    }

    #[test]
    fn test_build_list_with_filter() {
        let bundle = sample_bundle();
        assert_eq!(
            bundle.build_list("clusters", "id", Some(("managedState", "managed"))),
            vec!["cl-1", "cl-3"]
        );
        assert!(bundle
            .build_list("clusters", "id", Some(("managedState", "nope")))
            .is_empty());
    }

    #[test]
    fn test_build_list_mapping_contributes_keys() {
        let bundle = sample_bundle();
        assert_eq!(
            bundle.build_list("credentials", "data", None),
            vec!["accessKeyID", "secretAccessKey"]
        );
    }

    #[test]
    fn test_build_list_unknown_class_is_empty() {
        let bundle = sample_bundle();
        assert!(bundle.build_list("nothing", "id", None).is_empty());
    }

    #[test]
    fn test_get_single() {
        let bundle = sample_bundle();
        let item = bundle.get_single("apps", "name", "mysql").unwrap();
        assert_eq!(path_get(item, "id").and_then(Value::as_str), Some("app-2"));
        assert!(bundle.get_single("apps", "name", "missing").is_err());
    }

    #[test]
    fn test_get_single_rejects_ambiguity() {
        let mut bundle = sample_bundle();
        bundle.insert(
            "hooks",
            serde_json::json!({"items": [{"name": "dup"}, {"name": "dup"}]}),
        );
        assert!(bundle.get_single("hooks", "name", "dup").is_err());
    }
}
