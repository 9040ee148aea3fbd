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

//! The v2 session configuration: which control plane account to talk to and
//! how to authenticate. Looked up in the conventional locations; v3 never
//! reads it, the kubeconfig is the whole story there.

use crate::shared::{Result, ToolkitError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "ACTOOLKIT_CONF";
const CONFIG_FILE: &str = "config.yaml";
const CONFIG_DIR: &str = ".config/astra-toolkit";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolkitConfig {
    /// Control plane hostname, e.g. `astra.netapp.io`.
    pub project: String,
    pub account_id: String,
    pub api_token: String,
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
    /// Optional canned resource document for offline use.
    #[serde(default)]
    pub resources_file: Option<PathBuf>,
}

fn default_verify_ssl() -> bool {
    true
}

impl ToolkitConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&raw)?;
        if config.project.is_empty() || config.api_token.is_empty() {
            return Err(ToolkitError::Provider(format!(
                "config {} is missing project or api_token",
                path.display()
            )));
        }
        Ok(config)
    }

    /// Searches `$ACTOOLKIT_CONF`, the working directory, and the user config
    /// directory, in that order. A missing config is not an error; only a
    /// present but unreadable one is.
    pub fn load() -> Result<Option<Self>> {
        for path in Self::search_paths() {
            if path.is_file() {
                return Self::from_path(&path).map(Some);
            }
        }
        Ok(None)
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(explicit) = std::env::var(CONFIG_ENV) {
            paths.push(PathBuf::from(explicit));
        }
        paths.push(PathBuf::from(CONFIG_FILE));
        if let Ok(home) = std::env::var("HOME") {
            paths.push(PathBuf::from(home).join(CONFIG_DIR).join(CONFIG_FILE));
        }
        paths
    }
}
