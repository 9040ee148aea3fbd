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

//! The legal value sets the parser validates arguments against. One list per
//! resource class, every list always present. Built once from the discovered
//! `ResourceBundle` and immutable afterwards.

use crate::domain::bundle::{path_get, ResourceBundle};
use crate::domain::command::Variant;
use serde_json::Value;

/// Names a list inside the catalog. Argument descriptors reference lists
/// through this enum rather than holding copies of the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceList {
    Apps,
    DestApps,
    Backups,
    Snapshots,
    DataProtections,
    Buckets,
    Charts,
    Clouds,
    Clusters,
    DestClusters,
    Contexts,
    Credentials,
    Groups,
    Hooks,
    Keys,
    Labels,
    Namespaces,
    Protections,
    Replications,
    Scripts,
    StorageClasses,
    Users,
}

impl ChoiceList {
    /// Human description used when a list turns out to be empty, so the user
    /// sees "no backups exist" instead of a generic invalid-choice error.
    pub fn describe(&self) -> &'static str {
        match self {
            ChoiceList::Apps => "managed applications",
            ChoiceList::DestApps => "destination applications",
            ChoiceList::Backups => "backups",
            ChoiceList::Snapshots => "snapshots",
            ChoiceList::DataProtections => "restore sources (backups or snapshots)",
            ChoiceList::Buckets => "buckets",
            ChoiceList::Charts => "charts",
            ChoiceList::Clouds => "clouds",
            ChoiceList::Clusters => "clusters",
            ChoiceList::DestClusters => "destination clusters",
            ChoiceList::Contexts => "kubeconfig contexts",
            ChoiceList::Credentials => "credentials",
            ChoiceList::Groups => "groups",
            ChoiceList::Hooks => "execution hooks",
            ChoiceList::Keys => "secret keys",
            ChoiceList::Labels => "labels",
            ChoiceList::Namespaces => "namespaces",
            ChoiceList::Protections => "protection policies",
            ChoiceList::Replications => "replication policies",
            ChoiceList::Scripts => "hook scripts",
            ChoiceList::StorageClasses => "storage classes",
            ChoiceList::Users => "users",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChoicesCatalog {
    pub apps: Vec<String>,
    pub dest_apps: Vec<String>,
    pub backups: Vec<String>,
    pub snapshots: Vec<String>,
    pub data_protections: Vec<String>,
    pub buckets: Vec<String>,
    pub charts: Vec<String>,
    pub clouds: Vec<String>,
    pub clusters: Vec<String>,
    pub dest_clusters: Vec<String>,
    pub contexts: Vec<String>,
    pub credentials: Vec<String>,
    pub groups: Vec<String>,
    pub hooks: Vec<String>,
    pub keys: Vec<String>,
    pub labels: Vec<String>,
    pub namespaces: Vec<String>,
    pub protections: Vec<String>,
    pub replications: Vec<String>,
    pub scripts: Vec<String>,
    pub storage_classes: Vec<String>,
    pub users: Vec<String>,
}

/// The identifying key path for a resource class. v2 REST records carry flat
/// `id` or `name` fields; v3 Custom Resources identify via `metadata.name`.
fn id_key(class: &str, variant: Variant) -> &'static str {
    match variant {
        Variant::V2 => match class {
            "charts" | "namespaces" | "storageClasses" => "name",
            _ => "id",
        },
        Variant::V3 => match class {
            "charts" => "name",
            "contexts" => "name",
            _ => "metadata.name",
        },
    }
}

impl ChoicesCatalog {
    /// Builds every list from the discovered bundle. Classes that failed
    /// discovery are simply absent from the bundle and degrade to empty
    /// lists here; the parser turns empty choices into a clean usage error.
    pub fn from_bundle(bundle: &ResourceBundle, variant: Variant) -> Self {
        let project = |class: &str| bundle.build_list(class, id_key(class, variant), None);

        let apps = project("apps");
        let backups = project("backups");
        let snapshots = project("snapshots");

        // Restore sources are the union of backups and snapshots, with the
        // interleaving fixed by discovery order.
        let mut data_protections = backups.clone();
        data_protections.extend(snapshots.iter().cloned());

        // Only managed clusters are eligible copy/clone destinations.
        let dest_clusters = bundle.build_list(
            "clusters",
            id_key("clusters", variant),
            Some(("managedState", "managed")),
        );

        // Copy targets start as the full application list; the source app is
        // subtracted lazily at parse time once it is known.
        let dest_apps = apps.clone();

        Self {
            dest_apps,
            data_protections,
            dest_clusters,
            labels: Self::collect_labels(bundle),
            keys: Self::collect_keys(bundle),
            contexts: bundle.build_list("contexts", "name", None),
            apps,
            backups,
            snapshots,
            buckets: project("buckets"),
            charts: project("charts"),
            clouds: project("clouds"),
            clusters: project("clusters"),
            credentials: project("credentials"),
            groups: project("groups"),
            hooks: project("hooks"),
            namespaces: project("namespaces"),
            protections: project("protections"),
            replications: project("replications"),
            scripts: project("scripts"),
            storage_classes: project("storageClasses"),
            users: project("users"),
        }
    }

    /// Label constraint strings, `name` or `name=value`, gathered from the
    /// labels attached to discovered namespaces. Populated once per
    /// invocation; mutations later in the same run are not reflected.
    fn collect_labels(bundle: &ResourceBundle) -> Vec<String> {
        let mut labels: Vec<String> = Vec::new();
        for item in bundle.items("namespaces") {
            let Some(Value::Array(entries)) = path_get(item, "kubernetesLabels") else {
                continue;
            };
            for entry in entries {
                let Some(name) = path_get(entry, "name").and_then(Value::as_str) else {
                    continue;
                };
                let label = match path_get(entry, "value").and_then(Value::as_str) {
                    Some(value) => format!("{name}={value}"),
                    None => name.to_string(),
                };
                if !labels.contains(&label) {
                    labels.push(label);
                }
            }
        }
        labels
    }

    /// Secret key names, taken from the key sets of discovered credential
    /// payloads (never their values).
    fn collect_keys(bundle: &ResourceBundle) -> Vec<String> {
        let mut keys = Vec::new();
        for key in bundle.build_list("credentials", "data", None) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    /// The list named by `source`, as a read-only slice.
    pub fn list(&self, source: ChoiceList) -> &[String] {
        match source {
            ChoiceList::Apps => &self.apps,
            ChoiceList::DestApps => &self.dest_apps,
            ChoiceList::Backups => &self.backups,
            ChoiceList::Snapshots => &self.snapshots,
            ChoiceList::DataProtections => &self.data_protections,
            ChoiceList::Buckets => &self.buckets,
            ChoiceList::Charts => &self.charts,
            ChoiceList::Clouds => &self.clouds,
            ChoiceList::Clusters => &self.clusters,
            ChoiceList::DestClusters => &self.dest_clusters,
            ChoiceList::Contexts => &self.contexts,
            ChoiceList::Credentials => &self.credentials,
            ChoiceList::Groups => &self.groups,
            ChoiceList::Hooks => &self.hooks,
            ChoiceList::Keys => &self.keys,
            ChoiceList::Labels => &self.labels,
            ChoiceList::Namespaces => &self.namespaces,
            ChoiceList::Protections => &self.protections,
            ChoiceList::Replications => &self.replications,
            ChoiceList::Scripts => &self.scripts,
            ChoiceList::StorageClasses => &self.storage_classes,
            ChoiceList::Users => &self.users,
        }
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
            json!({"items": [{"id": "app-1"}, {"id": "app-2"}]}),
        );
        bundle.insert(
            "backups",
            json!({"items": [{"id": "bak-1"}, {"id": "bak-2"}]}),
        );
        bundle.insert("snapshots", json!({"items": [{"id": "snap-1"}]}));
        bundle.insert(
            "clusters",
            json!({"items": [
                {"id": "cl-1", "managedState": "managed"},
                {"id": "cl-2", "managedState": "unmanaged"},
                {"id": "cl-3", "managedState": "managed"},
            ]}),
        );
        bundle.insert(
            "namespaces",
            json!({"items": [
                {"name": "default", "kubernetesLabels": [
                    {"name": "tier", "value": "web"},
                    {"name": "protected"},
                ]},
                {"name": "prod", "kubernetesLabels": [
                    {"name": "tier", "value": "web"},
                ]},
            ]}),
        );
        bundle
    }

    #[test]
    fn test_every_list_present_even_when_undiscovered() {
        let catalog = ChoicesCatalog::from_bundle(&ResourceBundle::new(), Variant::V2);
        assert!(catalog.apps.is_empty());
        assert!(catalog.users.is_empty());
        assert!(catalog.data_protections.is_empty());
        assert!(catalog.contexts.is_empty());
    }

    #[test]
    fn test_dest_clusters_is_managed_subset_in_order() {
        let catalog = ChoicesCatalog::from_bundle(&sample_bundle(), Variant::V2);
        assert_eq!(catalog.clusters, vec!["cl-1", "cl-2", "cl-3"]);
        assert_eq!(catalog.dest_clusters, vec!["cl-1", "cl-3"]);
        assert!(catalog
            .dest_clusters
            .iter()
            .all(|c| catalog.clusters.contains(c)));
    }

    #[test]
    fn test_data_protections_union_preserves_discovery_order() {
        let catalog = ChoicesCatalog::from_bundle(&sample_bundle(), Variant::V2);
        assert_eq!(catalog.data_protections, vec!["bak-1", "bak-2", "snap-1"]);
    }

    #[test]
    fn test_labels_deduplicated_in_order() {
        let catalog = ChoicesCatalog::from_bundle(&sample_bundle(), Variant::V2);
        assert_eq!(catalog.labels, vec!["tier=web", "protected"]);
    }

    #[test]
    fn test_v3_projects_metadata_name() {
        let mut bundle = ResourceBundle::new();
        bundle.insert(
            "apps",
            json!({"items": [{"metadata": {"name": "wordpress"}}]}),
        );
        bundle.insert("contexts", json!({"items": [{"name": "prodctx"}]}));
        let catalog = ChoicesCatalog::from_bundle(&bundle, Variant::V3);
        assert_eq!(catalog.apps, vec!["wordpress"]);
        assert_eq!(catalog.contexts, vec!["prodctx"]);
    }

    #[test]
    fn test_dest_apps_starts_as_full_app_list() {
        let catalog = ChoicesCatalog::from_bundle(&sample_bundle(), Variant::V2);
        assert_eq!(catalog.dest_apps, catalog.apps);
    }
}
