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

//! Output rendering for listed resources

mod table;

pub use table::TableRenderer;

use crate::domain::OutputFormat;
use crate::shared::{Result, ToolkitError};
use comfy_table::Color as TableColor;
use serde_json::Value;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub error: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            error: TableColor::Red,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Color for a resource state string.
    pub fn get_state_color(&self, state: &str) -> TableColor {
        match state {
            "ready" | "running" | "completed" | "managed" | "available" | "healthy" => {
                self.success
            }
            "pending" | "running partially" | "partial" | "discovering" | "provisioning" => {
                self.warning
            }
            "failed" | "removed" | "unavailable" | "error" => self.error,
            _ => self.muted,
        }
    }
}

/// Renders a listed resource class in the requested output format. JSON and
/// YAML emit the raw items; the table format projects the class's display
/// columns.
#[derive(Debug, Default)]
pub struct OutputRenderer {
    table: TableRenderer,
}

impl OutputRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, class: &str, items: &[Value], format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(items).map_err(ToolkitError::from)
            }
            OutputFormat::Yaml => serde_yaml::to_string(items).map_err(ToolkitError::from),
            OutputFormat::Table => Ok(self.table.render(class, items)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.success, TableColor::Green);
        assert_eq!(theme.warning, TableColor::Yellow);
        assert_eq!(theme.error, TableColor::Red);
    }

    #[test]
    fn test_get_state_color() {
        let theme = ColorTheme::default();
        assert_eq!(theme.get_state_color("ready"), TableColor::Green);
        assert_eq!(theme.get_state_color("pending"), TableColor::Yellow);
        assert_eq!(theme.get_state_color("failed"), TableColor::Red);
        assert_eq!(theme.get_state_color("unknown"), TableColor::DarkGrey);
    }

    #[test]
    fn test_json_and_yaml_emit_raw_items() {
        let renderer = OutputRenderer::new();
        let items = vec![json!({"id": "app-1", "name": "wordpress"})];
        let json = renderer.render("apps", &items, OutputFormat::Json).unwrap();
        assert!(json.contains("\"wordpress\""));
        let yaml = renderer.render("apps", &items, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("name: wordpress"));
    }
}
