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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ToolkitError>;

/// A rejected command line. Carries the reason plus the usage synopsis of the
/// subcommand that rejected it, so the caller can print both without a stack
/// trace.
#[derive(Error, Debug, Clone)]
pub struct UsageError {
    pub message: String,
    pub usage: Option<String>,
}

impl std::fmt::Display for UsageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(usage) = &self.usage {
            write!(f, "\n{}", usage)?;
        }
        Ok(())
    }
}

impl UsageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            usage: None,
        }
    }

    pub fn with_usage(message: impl Into<String>, usage: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            usage: Some(usage.into()),
        }
    }
}

#[derive(Error, Debug)]
pub enum ToolkitError {
    #[error("{0}")]
    Usage(#[from] UsageError),

    #[error("discovery of '{class}' failed: {reason}")]
    Discovery { class: String, reason: String },

    #[error("control plane error: {0}")]
    Provider(String),

    #[error("Kubernetes API error: {0}")]
    Kube(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("interrupted")]
    Interrupted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<kube::Error> for ToolkitError {
    fn from(err: kube::Error) -> Self {
        ToolkitError::Kube(err.to_string())
    }
}

impl ToolkitError {
    pub fn usage(message: impl Into<String>) -> Self {
        ToolkitError::Usage(UsageError::new(message))
    }

    pub fn discovery(class: impl Into<String>, reason: impl Into<String>) -> Self {
        ToolkitError::Discovery {
            class: class.into(),
            reason: reason.into(),
        }
    }

    /// Process exit code for this error. Usage errors exit 2, a user
    /// interrupt exits 130, everything else is a command-side failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolkitError::Usage(_) => 2,
            ToolkitError::Interrupted => 130,
            _ => 1,
        }
    }
}
