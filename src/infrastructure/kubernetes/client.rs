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

//! The v3 backend: resource classes read straight from a Kubernetes cluster.
//! Protection objects live as Custom Resources; credentials, namespaces, and
//! storage classes are the native kinds. Classes with no cluster-side
//! representation fail the fetch and degrade to empty choice lists upstream.

use crate::domain::bundle::path_get;
use crate::domain::command::ContextSelector;
use crate::infrastructure::provider::ResourceProvider;
use crate::shared::{Result, ToolkitError};
use k8s_openapi::api::core::v1::Secret;
use kube::api::{Api, DeleteParams, ListParams, Patch, PatchParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::core::{ApiResource, DynamicObject, GroupVersionKind};
use kube::Client;
use serde_json::{json, Value};

const CR_GROUP: &str = "astra.netapp.io";
const CR_VERSION: &str = "v1";

/// Resolves a resource class to the kind backing it on the cluster.
fn gvk_for(class: &str) -> Option<GroupVersionKind> {
    let (group, version, kind) = match class {
        "apps" => (CR_GROUP, CR_VERSION, "Application"),
        "backups" => (CR_GROUP, CR_VERSION, "Backup"),
        "snapshots" => (CR_GROUP, CR_VERSION, "Snapshot"),
        "buckets" => (CR_GROUP, CR_VERSION, "AppVault"),
        "hooks" => (CR_GROUP, CR_VERSION, "ExecHook"),
        "protections" => (CR_GROUP, CR_VERSION, "Schedule"),
        "connectors" => (CR_GROUP, CR_VERSION, "AstraConnector"),
        "hooksRuns" => (CR_GROUP, CR_VERSION, "ExecHooksRun"),
        "iprs" => (CR_GROUP, CR_VERSION, "BackupInplaceRestore"),
        "restores" => (CR_GROUP, CR_VERSION, "BackupRestore"),
        "namespaces" => ("", "v1", "Namespace"),
        "storageClasses" => ("storage.k8s.io", "v1", "StorageClass"),
        _ => return None,
    };
    Some(GroupVersionKind::gvk(group, version, kind))
}

/// Writes resource documents to the selected cluster. The built-in executor
/// never writes; session executors layered on top of this crate go through
/// this seam for the mutating verbs.
#[async_trait::async_trait]
pub trait ClusterWriter: Send + Sync {
    /// Server-side applies the document, returning the object name.
    async fn apply(&self, resource: &Value) -> Result<String>;

    /// Deletes the object the document names.
    async fn delete(&self, resource: &Value) -> Result<()>;
}

/// The group/version/kind a resource document declares about itself.
fn gvk_of(resource: &Value) -> Result<GroupVersionKind> {
    let api_version = path_get(resource, "apiVersion")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolkitError::Provider("resource document has no apiVersion".to_string()))?;
    let kind = path_get(resource, "kind")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolkitError::Provider("resource document has no kind".to_string()))?;
    let (group, version) = api_version.split_once('/').unwrap_or(("", api_version));
    Ok(GroupVersionKind::gvk(group, version, kind))
}

fn resource_name(resource: &Value) -> Result<String> {
    path_get(resource, "metadata.name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ToolkitError::Provider("resource document has no metadata.name".to_string())
        })
}

/// A `ResourceProvider` over a live Kubernetes cluster, selected by context.
pub struct KubeResourceProvider {
    client: Client,
    kubeconfig: Kubeconfig,
}

impl KubeResourceProvider {
    /// Connects to the cluster named by the selector, or the current context
    /// when no selector was given.
    pub async fn connect(selector: Option<&ContextSelector>, insecure: bool) -> Result<Self> {
        let (kubeconfig, context) = match selector {
            None | Some(ContextSelector::Context(_)) => {
                let kubeconfig = Kubeconfig::read().map_err(|e| {
                    ToolkitError::Kube(format!("failed to load kubeconfig: {e}"))
                })?;
                let context = match selector {
                    Some(ContextSelector::Context(name)) => Some(name.clone()),
                    _ => None,
                };
                (kubeconfig, context)
            }
            Some(ContextSelector::Kubeconfig(path)) => {
                let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                    ToolkitError::Kube(format!("failed to load kubeconfig: {e}"))
                })?;
                (kubeconfig, None)
            }
            Some(ContextSelector::Mapped {
                context,
                kubeconfig,
            }) => {
                let loaded = Kubeconfig::read_from(kubeconfig).map_err(|e| {
                    ToolkitError::Kube(format!("failed to load kubeconfig: {e}"))
                })?;
                (loaded, Some(context.clone()))
            }
        };

        let options = KubeConfigOptions {
            context,
            cluster: None,
            user: None,
        };
        let mut config = kube::Config::from_custom_kubeconfig(kubeconfig.clone(), &options)
            .await
            .map_err(|e| ToolkitError::Kube(format!("failed to build client config: {e}")))?;
        if insecure {
            config.accept_invalid_certs = true;
        }
        let client = Client::try_from(config)?;
        Ok(Self { client, kubeconfig })
    }

    /// The context names of the loaded kubeconfig, shaped like any other
    /// class response.
    fn contexts_response(&self) -> Value {
        let items: Vec<Value> = self
            .kubeconfig
            .contexts
            .iter()
            .map(|c| json!({"name": c.name}))
            .collect();
        json!({ "items": items })
    }

    /// Secrets are listed through the typed API so the payload values can be
    /// dropped on the spot; only the key names ever leave this function.
    async fn list_secrets(&self) -> Result<Value> {
        let api: Api<Secret> = Api::all(self.client.clone());
        let list = api.list(&ListParams::default()).await?;
        let items: Vec<Value> = list
            .items
            .iter()
            .map(|secret| {
                let keys: serde_json::Map<String, Value> = secret
                    .data
                    .as_ref()
                    .map(|data| {
                        data.keys()
                            .map(|k| (k.clone(), Value::String(String::new())))
                            .collect()
                    })
                    .unwrap_or_default();
                json!({
                    "metadata": {
                        "name": secret.metadata.name,
                        "namespace": secret.metadata.namespace,
                    },
                    "type": secret.type_,
                    "data": keys,
                })
            })
            .collect();
        Ok(json!({ "items": items }))
    }

    /// The dynamic API for the kind a document declares, namespaced when the
    /// document names a namespace.
    fn dynamic_api(&self, resource: &Value) -> Result<Api<DynamicObject>> {
        let gvk = gvk_of(resource)?;
        let api_resource = ApiResource::from_gvk(&gvk);
        let api = match path_get(resource, "metadata.namespace").and_then(Value::as_str) {
            Some(namespace) => Api::namespaced_with(self.client.clone(), namespace, &api_resource),
            None => Api::all_with(self.client.clone(), &api_resource),
        };
        Ok(api)
    }

    async fn list_kind(&self, gvk: &GroupVersionKind) -> Result<Value> {
        let resource = ApiResource::from_gvk(gvk);
        let api: Api<DynamicObject> = Api::all_with(self.client.clone(), &resource);
        let list = api.list(&ListParams::default()).await?;
        let items = list
            .items
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<Value>, _>>()?;
        Ok(json!({ "items": items }))
    }
}

#[async_trait::async_trait]
impl ClusterWriter for KubeResourceProvider {
    async fn apply(&self, resource: &Value) -> Result<String> {
        let name = resource_name(resource)?;
        let api = self.dynamic_api(resource)?;
        let params = PatchParams::apply("actoolkit").force();
        api.patch(&name, &params, &Patch::Apply(resource.clone()))
            .await?;
        Ok(name)
    }

    async fn delete(&self, resource: &Value) -> Result<()> {
        let name = resource_name(resource)?;
        let api = self.dynamic_api(resource)?;
        api.delete(&name, &DeleteParams::default()).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ResourceProvider for KubeResourceProvider {
    async fn list(&self, class: &str) -> Result<Value> {
        if class == "contexts" {
            return Ok(self.contexts_response());
        }
        if class == "credentials" {
            return self.list_secrets().await;
        }
        let gvk = gvk_for(class).ok_or_else(|| {
            ToolkitError::Provider(format!("class '{class}' has no cluster representation"))
        })?;
        self.list_kind(&gvk).await
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
                ["metadata.name", "name"]
                    .iter()
                    .any(|key| path_get(item, key).and_then(Value::as_str) == Some(id))
            })
            .ok_or_else(|| ToolkitError::Provider(format!("no {class} record named '{id}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protection_classes_map_to_custom_resources() {
        let gvk = gvk_for("apps").unwrap();
        assert_eq!(gvk.group, CR_GROUP);
        assert_eq!(gvk.kind, "Application");
        let gvk = gvk_for("buckets").unwrap();
        assert_eq!(gvk.kind, "AppVault");
    }

    #[test]
    fn test_native_classes_map_to_core_kinds() {
        let gvk = gvk_for("namespaces").unwrap();
        assert_eq!(gvk.group, "");
        assert_eq!(gvk.kind, "Namespace");
        let gvk = gvk_for("storageClasses").unwrap();
        assert_eq!(gvk.group, "storage.k8s.io");
    }

    #[test]
    fn test_rest_only_classes_have_no_kind() {
        assert!(gvk_for("charts").is_none());
        assert!(gvk_for("scripts").is_none());
        assert!(gvk_for("replications").is_none());
    }

    #[test]
    fn test_listed_object_types_resolve_to_kinds() {
        use crate::cli::dispatch::provider_class;
        // Every cluster-backed object type the list verb accepts must reach
        // a kind through the class name the dispatcher hands the provider.
        for object in [
            "apps",
            "backups",
            "snapshots",
            "buckets",
            "hooks",
            "protections",
            "connectors",
            "hooksruns",
            "iprs",
            "restores",
            "namespaces",
            "storageclasses",
        ] {
            assert!(
                gvk_for(provider_class(object)).is_some(),
                "object type {object} has no cluster kind"
            );
        }
        assert_eq!(gvk_for("hooksRuns").unwrap().kind, "ExecHooksRun");
    }

    #[test]
    fn test_documents_declare_their_own_kind() {
        let doc = json!({
            "apiVersion": "astra.netapp.io/v1",
            "kind": "Backup",
            "metadata": {"name": "nightly", "namespace": "astra-connector"},
        });
        let gvk = gvk_of(&doc).unwrap();
        assert_eq!(gvk.group, CR_GROUP);
        assert_eq!(gvk.kind, "Backup");
        assert_eq!(resource_name(&doc).unwrap(), "nightly");

        let core = json!({"apiVersion": "v1", "kind": "Namespace", "metadata": {"name": "prod"}});
        let gvk = gvk_of(&core).unwrap();
        assert_eq!(gvk.group, "");
        assert_eq!(gvk.version, "v1");

        assert!(gvk_of(&json!({"metadata": {"name": "x"}})).is_err());
        assert!(resource_name(&json!({"kind": "Backup"})).is_err());
    }
}
