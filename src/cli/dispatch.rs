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

//! Dispatch: hand a fully parsed command to an executor. The built-in
//! executor serves the read-only verbs from the provider; mutating verbs
//! belong to the control plane session executors layered on top of this
//! crate.

use crate::cli::display::OutputRenderer;
use crate::domain::bundle::path_get;
use crate::domain::command::{canonical_object, OptionValue, ParsedCommand, Verb};
use crate::infrastructure::kubernetes::ClusterWriter;
use crate::infrastructure::provider::ResourceProvider;
use crate::shared::{Result, ToolkitError};
use serde_json::Value;

/// Everything an executor may touch. Built once per invocation. The writer
/// is present only for v3 invocations, where mutations land on the cluster
/// as resource documents.
pub struct DispatchContext<'a> {
    pub provider: &'a dyn ResourceProvider,
    pub renderer: &'a OutputRenderer,
    pub writer: Option<&'a dyn ClusterWriter>,
}

#[async_trait::async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Executes the command, returning the text to print on stdout.
    async fn execute(&self, cmd: &ParsedCommand, ctx: &DispatchContext<'_>) -> Result<String>;
}

pub async fn dispatch(
    cmd: &ParsedCommand,
    ctx: &DispatchContext<'_>,
    executor: &dyn CommandExecutor,
) -> Result<String> {
    executor.execute(cmd, ctx).await
}

/// The provider class behind a listed object type. Object types are typed in
/// lowercase; provider classes keep the backend's camelCase names.
pub(crate) fn provider_class(object: &str) -> &str {
    match object {
        "storageclasses" => "storageClasses",
        "storagebackends" => "storageBackends",
        "apiresources" => "apiResources",
        "rolebindings" => "roleBindings",
        "ldapgroups" => "ldapGroups",
        "ldapusers" => "ldapUsers",
        "hooksruns" => "hooksRuns",
        other => other,
    }
}

/// The built-in executor: lists resource classes and renders them. Every
/// other verb needs a backend session and is reported as such.
#[derive(Debug, Default)]
pub struct RenderExecutor;

#[async_trait::async_trait]
impl CommandExecutor for RenderExecutor {
    async fn execute(&self, cmd: &ParsedCommand, ctx: &DispatchContext<'_>) -> Result<String> {
        match cmd.verb {
            Verb::List => self.list(cmd, ctx).await,
            other => Err(ToolkitError::Provider(format!(
                "the '{}' operation requires a connected control plane session",
                other.as_str()
            ))),
        }
    }
}

impl RenderExecutor {
    async fn list(&self, cmd: &ParsedCommand, ctx: &DispatchContext<'_>) -> Result<String> {
        let object = cmd
            .object
            .as_deref()
            .map(canonical_object)
            .ok_or_else(|| ToolkitError::usage("list requires an object type"))?;
        let class = provider_class(object);
        let response = ctx.provider.list(class).await?;
        let items = match path_get(&response, "items") {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };
        let items = apply_filters(cmd, items);
        ctx.renderer.render(class, &items, cmd.globals.output)
    }
}

/// The list filters the executor can evaluate locally. Filters the backend
/// evaluates server-side (LDAP paging, notification windows) pass through
/// untouched.
fn apply_filters(cmd: &ParsedCommand, items: Vec<Value>) -> Vec<Value> {
    let name_filter = cmd.str_option("nameFilter");
    let app_filter = cmd.str_option("app");
    let hide_managed = cmd
        .option("hideManaged")
        .and_then(OptionValue::as_bool)
        .unwrap_or(false);
    let hide_unmanaged = cmd
        .option("hideUnmanaged")
        .and_then(OptionValue::as_bool)
        .unwrap_or(false);

    items
        .into_iter()
        .filter(|item| {
            if let Some(fragment) = name_filter {
                let name = ["name", "metadata.name"]
                    .iter()
                    .find_map(|key| path_get(item, key).and_then(Value::as_str))
                    .unwrap_or("");
                if !name.contains(fragment) {
                    return false;
                }
            }
            if let Some(app) = app_filter {
                let owner = ["appID", "spec.applicationRef"]
                    .iter()
                    .find_map(|key| path_get(item, key).and_then(Value::as_str));
                if owner != Some(app) {
                    return false;
                }
            }
            let managed_state = path_get(item, "managedState").and_then(Value::as_str);
            if hide_managed && managed_state == Some("managed") {
                return false;
            }
            if hide_unmanaged && managed_state == Some("unmanaged") {
                return false;
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::command::{GlobalFlags, Variant};
    use crate::infrastructure::provider::StaticProvider;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn list_command(object: &str, options: BTreeMap<String, OptionValue>) -> ParsedCommand {
        ParsedCommand {
            verb: Verb::List,
            object: Some(object.to_string()),
            options,
            globals: GlobalFlags::default(),
            variant: Variant::V2,
        }
    }

    fn provider() -> StaticProvider {
        StaticProvider::new()
            .with(
                "apps",
                json!({"items": [
                    {"id": "a-1", "name": "wordpress", "state": "ready"},
                    {"id": "a-2", "name": "wordpress-dev", "state": "ready"},
                    {"id": "a-3", "name": "gitlab", "state": "failed"},
                ]}),
            )
            .with(
                "clusters",
                json!({"items": [
                    {"id": "c-1", "name": "prod", "managedState": "managed"},
                    {"id": "c-2", "name": "lab", "managedState": "unmanaged"},
                ]}),
            )
    }

    #[tokio::test]
    async fn test_list_renders_class_items() {
        let provider = provider();
        let renderer = OutputRenderer::new();
        let ctx = DispatchContext {
            provider: &provider,
            renderer: &renderer,
            writer: None,
        };
        let cmd = list_command("apps", BTreeMap::new());
        let output = dispatch(&cmd, &ctx, &RenderExecutor).await.unwrap();
        assert!(output.contains("wordpress"));
        assert!(output.contains("gitlab"));
    }

    #[tokio::test]
    async fn test_name_filter_narrows_items() {
        let provider = provider();
        let renderer = OutputRenderer::new();
        let ctx = DispatchContext {
            provider: &provider,
            renderer: &renderer,
            writer: None,
        };
        let mut options = BTreeMap::new();
        options.insert(
            "nameFilter".to_string(),
            OptionValue::Str("wordpress".to_string()),
        );
        let cmd = list_command("apps", options);
        let output = dispatch(&cmd, &ctx, &RenderExecutor).await.unwrap();
        assert!(output.contains("wordpress-dev"));
        assert!(!output.contains("gitlab"));
    }

    #[tokio::test]
    async fn test_hide_managed_clusters() {
        let provider = provider();
        let renderer = OutputRenderer::new();
        let ctx = DispatchContext {
            provider: &provider,
            renderer: &renderer,
            writer: None,
        };
        let mut options = BTreeMap::new();
        options.insert("hideManaged".to_string(), OptionValue::Bool(true));
        let cmd = list_command("clusters", options);
        let output = dispatch(&cmd, &ctx, &RenderExecutor).await.unwrap();
        assert!(output.contains("lab"));
        assert!(!output.contains("prod"));
    }

    #[tokio::test]
    async fn test_mutating_verbs_need_a_session() {
        let provider = provider();
        let renderer = OutputRenderer::new();
        let ctx = DispatchContext {
            provider: &provider,
            renderer: &renderer,
            writer: None,
        };
        let cmd = ParsedCommand {
            verb: Verb::Destroy,
            object: Some("backup".to_string()),
            options: BTreeMap::new(),
            globals: GlobalFlags::default(),
            variant: Variant::V2,
        };
        let err = dispatch(&cmd, &ctx, &RenderExecutor).await.unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_object_aliases_reach_the_same_class() {
        let provider = StaticProvider::new().with(
            "protections",
            json!({"items": [{"id": "p-1", "name": "daily"}]}),
        );
        let renderer = OutputRenderer::new();
        let ctx = DispatchContext {
            provider: &provider,
            renderer: &renderer,
            writer: None,
        };
        let cmd = list_command("schedules", BTreeMap::new());
        let output = dispatch(&cmd, &ctx, &RenderExecutor).await.unwrap();
        assert!(output.contains("daily"));
    }
}
