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

//! Table rendering for listed resources

use super::ColorTheme;
use crate::domain::bundle::path_get;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use serde_json::Value;

/// One display column: header text plus the dotted path projected from each
/// item. Paths are tried in order so v2 and v3 records share a column set.
struct Column {
    header: &'static str,
    paths: &'static [&'static str],
}

const fn col(header: &'static str, paths: &'static [&'static str]) -> Column {
    Column { header, paths }
}

const DEFAULT_COLUMNS: &[Column] = &[
    col("NAME", &["name", "metadata.name"]),
    col("ID", &["id", "metadata.uid"]),
    col("STATE", &["state", "status.state"]),
];

const APP_COLUMNS: &[Column] = &[
    col("NAME", &["name", "metadata.name"]),
    col("ID", &["id", "metadata.uid"]),
    col("NAMESPACES", &["namespaceScopedResources", "namespaces"]),
    col("CLUSTER", &["clusterName", "spec.clusterName"]),
    col("STATE", &["state", "status.state"]),
];

const PROTECTION_DATA_COLUMNS: &[Column] = &[
    col("NAME", &["name", "metadata.name"]),
    col("ID", &["id", "metadata.uid"]),
    col("APP", &["appID", "spec.applicationRef"]),
    col("STATE", &["state", "status.state"]),
];

const BUCKET_COLUMNS: &[Column] = &[
    col("NAME", &["name", "metadata.name"]),
    col("ID", &["id", "metadata.uid"]),
    col("PROVIDER", &["provider", "spec.providerType"]),
    col("STATE", &["state", "status.state"]),
];

const CLUSTER_COLUMNS: &[Column] = &[
    col("NAME", &["name", "metadata.name"]),
    col("ID", &["id", "metadata.uid"]),
    col("TYPE", &["clusterType"]),
    col("MANAGED", &["managedState"]),
];

const NAMESPACE_COLUMNS: &[Column] = &[
    col("NAME", &["name", "metadata.name"]),
    col("CLUSTER", &["clusterID"]),
    col("STATE", &["namespaceState", "state"]),
];

const CREDENTIAL_COLUMNS: &[Column] = &[
    col("NAME", &["name", "metadata.name"]),
    col("ID", &["id", "metadata.uid"]),
    col("TYPE", &["keyType", "type"]),
];

const USER_COLUMNS: &[Column] = &[
    col("NAME", &["name", "metadata.name"]),
    col("ID", &["id", "metadata.uid"]),
    col("EMAIL", &["email"]),
    col("STATE", &["state"]),
];

fn columns_for(class: &str) -> &'static [Column] {
    match class {
        "apps" => APP_COLUMNS,
        "backups" | "snapshots" => PROTECTION_DATA_COLUMNS,
        "buckets" => BUCKET_COLUMNS,
        "clusters" => CLUSTER_COLUMNS,
        "namespaces" => NAMESPACE_COLUMNS,
        "credentials" => CREDENTIAL_COLUMNS,
        "users" => USER_COLUMNS,
        _ => DEFAULT_COLUMNS,
    }
}

/// Table renderer for formatted output
#[derive(Debug, Clone)]
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render one resource class as a formatted table
    pub fn render(&self, class: &str, items: &[Value]) -> String {
        if items.is_empty() {
            return format!("No {class} found");
        }

        let columns = columns_for(class);
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                columns
                    .iter()
                    .map(|c| Cell::new(c.header).set_alignment(CellAlignment::Left))
                    .collect::<Vec<_>>(),
            );

        for item in items {
            let row = columns.iter().map(|column| {
                let text = project(item, column.paths);
                if column.header == "STATE" || column.header == "MANAGED" {
                    let color = self.theme.get_state_color(&text);
                    Cell::new(text).fg(color)
                } else {
                    Cell::new(text)
                }
            });
            table.add_row(row.collect::<Vec<_>>());
        }

        let mut output = table.to_string();
        output.push('\n');
        output.push_str(
            &format!("[{} {}]", items.len(), class)
                .bright_black()
                .to_string(),
        );
        output
    }
}

/// Projects the first matching path of an item to display text.
fn project(item: &Value, paths: &[&str]) -> String {
    for path in paths {
        match path_get(item, path) {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            Some(Value::Bool(b)) => return b.to_string(),
            Some(Value::Array(values)) => {
                let parts: Vec<String> = values
                    .iter()
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect();
                return parts.join(", ");
            }
            _ => continue,
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_empty_class() {
        let renderer = TableRenderer::new();
        let output = renderer.render("apps", &[]);
        assert!(output.contains("No apps found"));
    }

    #[test]
    fn test_render_v2_records() {
        let renderer = TableRenderer::new();
        let items = vec![
            json!({"id": "a1", "name": "wordpress", "state": "ready"}),
            json!({"id": "a2", "name": "gitlab", "state": "failed"}),
        ];
        let output = renderer.render("apps", &items);
        assert!(output.contains("wordpress"));
        assert!(output.contains("gitlab"));
        assert!(output.contains("NAME"));
        assert!(output.contains("2 apps"));
    }

    #[test]
    fn test_render_v3_records_via_metadata_paths() {
        let renderer = TableRenderer::new();
        let items = vec![json!({"metadata": {"name": "wordpress", "uid": "u-1"}})];
        let output = renderer.render("apps", &items);
        assert!(output.contains("wordpress"));
        assert!(output.contains("u-1"));
    }

    #[test]
    fn test_project_joins_arrays() {
        let item = json!({"namespaces": ["default", "prod"]});
        assert_eq!(project(&item, &["namespaces"]), "default, prod");
    }
}
