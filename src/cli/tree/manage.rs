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

//! Descriptors for `manage` (alias `define`), `destroy`, and `unmanage`:
//! bringing objects under management and removing them again.

use super::{ArgSpec, CommandNode, MutexGroup};
use crate::domain::catalog::ChoiceList;
use crate::domain::command::Variant;

const BUCKET_PROVIDERS: &[&str] = &[
    "aws",
    "azure",
    "gcp",
    "generic-s3",
    "ontap-s3",
    "storagegrid-s3",
];

/// Three orthogonal ways to hand over object storage credentials: reference
/// an existing credential, point at a JSON key file, or pass the key pair
/// directly.
pub(super) fn credential_group(node: CommandNode) -> CommandNode {
    node.mutex(MutexGroup::new("credential", "credential group"))
        .arg(
            ArgSpec::option(Some('c'), "credential", "existing credential to authenticate with")
                .choices(ChoiceList::Credentials)
                .group("credential")
                .heading("credential group"),
        )
        .arg(
            ArgSpec::option(Some('j'), "json", "the local filesystem path to a JSON key file")
                .group("credential")
                .heading("credential group"),
        )
        .arg(
            ArgSpec::option(None, "accessKey", "object storage access key")
                .group("credential")
                .requires("accessSecret")
                .heading("credential group"),
        )
        .arg(
            ArgSpec::option(None, "accessSecret", "object storage access secret")
                .requires("accessKey")
                .heading("credential group"),
        )
}

fn manage_app_node(variant: Variant) -> CommandNode {
    let node = CommandNode::new("app", "define/manage an app from a namespace")
        .aliases(&["application"])
        .arg(ArgSpec::positional("appName", "name of the app to define"))
        .arg(
            ArgSpec::positional("namespace", "namespace the app runs in")
                .choices(ChoiceList::Namespaces),
        );
    let node = match variant {
        Variant::V2 => node.arg(
            ArgSpec::positional("clusterID", "cluster the namespace belongs to")
                .choices(ChoiceList::Clusters),
        ),
        Variant::V3 => node,
    };
    node.arg(ArgSpec::option(
        Some('l'),
        "labelSelectors",
        "restrict the app to resources matching this label selector",
    ))
    .arg(
        ArgSpec::option(
            Some('a'),
            "additionalNamespace",
            "additional namespace belonging to the app",
        )
        .append(),
    )
    .arg(
        ArgSpec::option(
            Some('c'),
            "clusterScopedResource",
            "cluster scoped resource belonging to the app (kind/name)",
        )
        .append(),
    )
}

fn manage_bucket_node(variant: Variant) -> CommandNode {
    let node = CommandNode::new("bucket", "manage an object storage bucket")
        .aliases(&["appVault"])
        .arg(ArgSpec::positional("provider", "bucket provider type").values(BUCKET_PROVIDERS))
        .arg(ArgSpec::positional("bucketName", "name of the bucket"))
        .arg(ArgSpec::option(
            Some('u'),
            "serverURL",
            "S3 endpoint (required for generic-s3, ontap-s3, storagegrid-s3)",
        ))
        .arg(ArgSpec::option(
            Some('a'),
            "storageAccount",
            "Azure storage account (required for azure)",
        ));
    let node = match variant {
        Variant::V3 => node
            .arg(ArgSpec::flag(None, "http", "use HTTP instead of HTTPS"))
            .arg(ArgSpec::flag(
                None,
                "skipCertValidation",
                "do not validate the endpoint TLS certificate",
            )),
        Variant::V2 => node,
    };
    credential_group(node)
}

fn manage_cloud_node() -> CommandNode {
    CommandNode::new("cloud", "manage a cloud")
        .arg(ArgSpec::positional("cloudType", "type of cloud to manage").values(&[
            "AWS",
            "Azure",
            "GCP",
            "private",
        ]))
        .arg(ArgSpec::positional("cloudName", "name of the cloud"))
        .arg(ArgSpec::option(
            Some('p'),
            "credentialPath",
            "the local filesystem path to the cloud service account credential",
        ))
        .arg(
            ArgSpec::option(Some('b'), "defaultBucketID", "default bucket for app backups")
                .choices(ChoiceList::Buckets),
        )
}

fn manage_cluster_node(variant: Variant) -> CommandNode {
    match variant {
        Variant::V3 => CommandNode::new("cluster", "manage a cluster")
            .arg(ArgSpec::positional("clusterName", "name of the cluster to manage"))
            .arg(
                ArgSpec::option(Some('c'), "cloudID", "cloud the cluster runs in")
                    .choices(ChoiceList::Clouds)
                    .default_if_sole_choice(),
            )
            .arg(
                ArgSpec::option(Some('v'), "operator-version", "connector operator version")
                    .default("24.02.0-202403151353"),
            )
            .arg(
                ArgSpec::option(None, "regCred", "registry credential for image pulls")
                    .choices(ChoiceList::Credentials),
            )
            .arg(ArgSpec::option(
                None,
                "registry",
                "override the default image registry",
            ))
            .arg(ArgSpec::flag(None, "headless", "do not wait for the cluster to settle").hidden()),
        Variant::V2 => CommandNode::new("cluster", "manage a cluster")
            .arg(
                ArgSpec::positional("cluster", "cluster to manage").choices(ChoiceList::Clusters),
            )
            .arg(
                ArgSpec::option(
                    Some('s'),
                    "defaultStorageClassID",
                    "default storage class for the cluster",
                )
                .choices(ChoiceList::StorageClasses),
            ),
    }
}

pub fn manage_node(variant: Variant) -> CommandNode {
    CommandNode::new("manage", "manage an object")
        .aliases(&["define"])
        .child(manage_app_node(variant))
        .child(manage_bucket_node(variant))
        .child(manage_cloud_node())
        .child(manage_cluster_node(variant))
        .child(CommandNode::new(
            "ldap",
            "re-enable a previously configured LDAP server",
        ))
}

/// `destroy backup APP BACKUP` style nodes: the owning app first, then the
/// object to destroy.
fn destroy_scoped(
    name: &'static str,
    aliases: &'static [&'static str],
    help: &'static str,
    object_help: &'static str,
    list: ChoiceList,
) -> CommandNode {
    CommandNode::new(name, help)
        .aliases(aliases)
        .arg(ArgSpec::positional("app", "app the object belongs to").choices(ChoiceList::Apps))
        .arg(ArgSpec::positional(name, object_help).choices(list))
}

fn destroy_plain(
    name: &'static str,
    aliases: &'static [&'static str],
    help: &'static str,
    object_help: &'static str,
    list: ChoiceList,
) -> CommandNode {
    CommandNode::new(name, help)
        .aliases(aliases)
        .arg(ArgSpec::positional(name, object_help).choices(list))
}

pub fn destroy_node(_variant: Variant) -> CommandNode {
    CommandNode::new("destroy", "destroy an object")
        .child(destroy_scoped(
            "backup",
            &[],
            "destroy a backup",
            "backup to destroy",
            ChoiceList::Backups,
        ))
        .child(destroy_plain(
            "cluster",
            &[],
            "destroy a non-managed cluster",
            "cluster to destroy",
            ChoiceList::Clusters,
        ))
        .child(destroy_plain(
            "credential",
            &["secret"],
            "destroy a credential",
            "credential to destroy",
            ChoiceList::Credentials,
        ))
        .child(destroy_plain(
            "group",
            &[],
            "destroy a group",
            "group to destroy",
            ChoiceList::Groups,
        ))
        .child(destroy_scoped(
            "hook",
            &["exechook"],
            "destroy an execution hook",
            "hook to destroy",
            ChoiceList::Hooks,
        ))
        .child(CommandNode::new("ldap", "destroy the LDAP server connection"))
        .child(destroy_scoped(
            "protection",
            &["schedule"],
            "destroy a protection policy",
            "protection policy to destroy",
            ChoiceList::Protections,
        ))
        .child(destroy_plain(
            "replication",
            &[],
            "destroy a replication policy",
            "replication policy to destroy",
            ChoiceList::Replications,
        ))
        .child(destroy_plain(
            "script",
            &[],
            "destroy a hook script",
            "script to destroy",
            ChoiceList::Scripts,
        ))
        .child(destroy_scoped(
            "snapshot",
            &[],
            "destroy a snapshot",
            "snapshot to destroy",
            ChoiceList::Snapshots,
        ))
        .child(destroy_plain(
            "user",
            &[],
            "destroy a user",
            "user to destroy",
            ChoiceList::Users,
        ))
}

pub fn unmanage_node(_variant: Variant) -> CommandNode {
    CommandNode::new("unmanage", "unmanage an object")
        .child(
            CommandNode::new("app", "unmanage an app")
                .aliases(&["application"])
                .arg(ArgSpec::positional("app", "app to unmanage").choices(ChoiceList::Apps)),
        )
        .child(
            CommandNode::new("bucket", "unmanage a bucket")
                .aliases(&["appVault"])
                .arg(
                    ArgSpec::positional("bucket", "bucket to unmanage")
                        .choices(ChoiceList::Buckets),
                ),
        )
        .child(
            CommandNode::new("cloud", "unmanage a cloud").arg(
                ArgSpec::positional("cloud", "cloud to unmanage").choices(ChoiceList::Clouds),
            ),
        )
        .child(
            CommandNode::new("cluster", "unmanage a cluster").arg(
                ArgSpec::positional("cluster", "managed cluster to unmanage")
                    .choices(ChoiceList::DestClusters),
            ),
        )
        .child(CommandNode::new(
            "ldap",
            "disable the LDAP server connection without removing it",
        ))
}
