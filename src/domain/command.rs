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

//! The parsed representation of a command line: verb, object type, option
//! values, and the global flags carried through the whole pipeline.

use crate::shared::UsageError;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

/// Which backend the invocation talks to: the control plane REST API (v2) or
/// Custom Resources written straight to a Kubernetes cluster (v3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    V2,
    V3,
}

impl Variant {
    pub fn is_v3(&self) -> bool {
        matches!(self, Variant::V3)
    }
}

/// Top level verbs. `get` and `define` are aliases resolved before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verb {
    Deploy,
    Clone,
    Restore,
    Ipr,
    List,
    Copy,
    Create,
    Manage,
    Destroy,
    Unmanage,
    Update,
}

impl Verb {
    pub const ALL: [Verb; 11] = [
        Verb::Deploy,
        Verb::Clone,
        Verb::Restore,
        Verb::Ipr,
        Verb::List,
        Verb::Copy,
        Verb::Create,
        Verb::Manage,
        Verb::Destroy,
        Verb::Unmanage,
        Verb::Update,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Deploy => "deploy",
            Verb::Clone => "clone",
            Verb::Restore => "restore",
            Verb::Ipr => "ipr",
            Verb::List => "list",
            Verb::Copy => "copy",
            Verb::Create => "create",
            Verb::Manage => "manage",
            Verb::Destroy => "destroy",
            Verb::Unmanage => "unmanage",
            Verb::Update => "update",
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Verb::List => &["get"],
            Verb::Manage => &["define"],
            _ => &[],
        }
    }

    /// Resolves a raw token (canonical name or alias) to its verb.
    pub fn from_token(token: &str) -> Option<Verb> {
        Verb::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == token || v.aliases().contains(&token))
    }

    /// True when the token names any verb. Used by preflight, which must
    /// recognize verbs without invoking the full parser.
    pub fn is_verb_token(token: &str) -> bool {
        Verb::from_token(token).is_some()
    }
}

/// Alias map for second-level object types. Consulted before tree descent so
/// downstream code only ever sees canonical names.
const OBJECT_ALIASES: &[(&str, &str)] = &[
    ("applications", "apps"),
    ("application", "app"),
    ("appVaults", "buckets"),
    ("appVault", "bucket"),
    ("secrets", "credentials"),
    ("secret", "credential"),
    ("exechooks", "hooks"),
    ("exechook", "hook"),
    ("schedules", "protections"),
    ("schedule", "protection"),
];

/// Resolves an object-type token to its canonical form.
pub fn canonical_object(token: &str) -> &str {
    OBJECT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(token)
}

/// Selects which Kubernetes cluster a v3 invocation writes to: a kubeconfig
/// context name, a kubeconfig file, or a `context@file` mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextSelector {
    Context(String),
    Kubeconfig(PathBuf),
    Mapped { context: String, kubeconfig: PathBuf },
}

impl FromStr for ContextSelector {
    type Err = UsageError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(UsageError::new("--v3 requires a non-empty context value"));
        }
        if let Some((context, path)) = s.split_once('@') {
            if context.is_empty() || path.is_empty() {
                return Err(UsageError::new(format!(
                    "malformed --v3 value '{s}': expected CONTEXT, PATH, or CONTEXT@PATH"
                )));
            }
            return Ok(ContextSelector::Mapped {
                context: context.to_string(),
                kubeconfig: PathBuf::from(path),
            });
        }
        // A path always carries a separator or a file extension; a bare
        // context name carries neither.
        if s.contains('/') || s.contains('\\') || s.ends_with(".yaml") || s.ends_with(".conf") {
            Ok(ContextSelector::Kubeconfig(PathBuf::from(s)))
        } else {
            Ok(ContextSelector::Context(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    Yaml,
    #[default]
    Table,
}

impl FromStr for OutputFormat {
    type Err = UsageError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            "table" => Ok(OutputFormat::Table),
            other => Err(UsageError::new(format!(
                "invalid output format '{other}' (choose from json, yaml, table)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DryRun {
    Client,
    Server,
}

impl FromStr for DryRun {
    type Err = UsageError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "client" => Ok(DryRun::Client),
            "server" => Ok(DryRun::Server),
            other => Err(UsageError::new(format!(
                "invalid --dry-run value '{other}' (choose from client, server)"
            ))),
        }
    }
}

/// Global CLI state, passed explicitly through the pipeline. Never consulted
/// as ambient state.
#[derive(Debug, Clone, Default)]
pub struct GlobalFlags {
    pub verbose: bool,
    pub quiet: bool,
    pub output: OutputFormat,
    pub fast: bool,
    pub dry_run: Option<DryRun>,
    pub insecure_skip_tls_verify: bool,
    pub v3_context: Option<ContextSelector>,
}

/// An option value bound during parse. Repeatable flags keep their
/// occurrence structure (a list per occurrence); downstream executors
/// distinguish occurrences, so the shape is never flattened here.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
    ListList(Vec<Vec<String>>),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether the value counts as "set" for mutual exclusion purposes.
    pub fn is_set(&self) -> bool {
        match self {
            OptionValue::Null => false,
            OptionValue::Bool(b) => *b,
            OptionValue::List(l) => !l.is_empty(),
            OptionValue::ListList(l) => !l.is_empty(),
            _ => true,
        }
    }
}

/// The fully parsed command, ready for dispatch.
#[derive(Debug, Clone)]
pub struct ParsedCommand {
    pub verb: Verb,
    pub object: Option<String>,
    pub options: BTreeMap<String, OptionValue>,
    pub globals: GlobalFlags,
    pub variant: Variant,
}

impl ParsedCommand {
    pub fn option(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    pub fn str_option(&self, name: &str) -> Option<&str> {
        self.options.get(name).and_then(OptionValue::as_str)
    }
}
