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

//! Descriptors for `list` (alias `get`). Mostly read-only filters; the
//! v3-only object types surface state that exists only as Custom Resources.

use super::{ArgSpec, CommandNode};
use crate::domain::catalog::ChoiceList;
use crate::domain::command::Variant;

fn app_filter() -> ArgSpec {
    ArgSpec::option(Some('a'), "app", "only show objects from this app").choices(ChoiceList::Apps)
}

/// Paging and matching options shared by the LDAP directory listings.
fn ldap_paging(node: CommandNode) -> CommandNode {
    node.arg(
        ArgSpec::option(Some('l'), "limit", "maximum number of entries to return")
            .int(1, 1000)
            .default("25"),
    )
    .arg(ArgSpec::option(
        None,
        "continue",
        "continuation token from a previous listing",
    ))
    .arg(
        ArgSpec::option(None, "matchType", "filter match behavior")
            .values(&["partial", "exact"])
            .default("partial"),
    )
    .arg(ArgSpec::option(None, "cn", "filter by common name"))
    .arg(ArgSpec::option(None, "dn", "filter by distinguished name"))
}

pub fn node(variant: Variant) -> CommandNode {
    let mut node = CommandNode::new("list", "list all items in a class")
        .aliases(&["get"])
        .child(
            CommandNode::new("apiresources", "list api resources").arg(ArgSpec::option(
                Some('c'),
                "cluster",
                "only show api resources from this cluster",
            )),
        )
        .child(
            CommandNode::new("apps", "list apps")
                .aliases(&["applications"])
                .arg(ArgSpec::option(
                    Some('n'),
                    "namespace",
                    "only show apps from this namespace",
                ))
                .arg(ArgSpec::option(
                    Some('f'),
                    "nameFilter",
                    "only show apps whose name contains this string",
                ))
                .arg(ArgSpec::option(
                    Some('c'),
                    "cluster",
                    "only show apps from this cluster",
                )),
        )
        .child(
            CommandNode::new("assets", "list app assets")
                .arg(ArgSpec::positional("app", "app to list assets of").choices(ChoiceList::Apps)),
        )
        .child(CommandNode::new("backups", "list backups").arg(app_filter()))
        .child(
            CommandNode::new("buckets", "list buckets")
                .aliases(&["appVaults"])
                .arg(ArgSpec::option(
                    Some('f'),
                    "nameFilter",
                    "only show buckets whose name contains this string",
                ))
                .arg(ArgSpec::option(
                    Some('p'),
                    "provider",
                    "only show buckets of this provider type",
                )),
        )
        .child(CommandNode::new("clouds", "list clouds"))
        .child(
            CommandNode::new("clusters", "list clusters")
                .arg(ArgSpec::option(
                    Some('f'),
                    "nameFilter",
                    "only show clusters whose name contains this string",
                ))
                .arg(ArgSpec::flag(
                    Some('m'),
                    "hideManaged",
                    "hide managed clusters",
                ))
                .arg(ArgSpec::flag(
                    Some('u'),
                    "hideUnmanaged",
                    "hide unmanaged clusters",
                )),
        )
        .child(
            CommandNode::new("credentials", "list credentials")
                .aliases(&["secrets"])
                .arg(ArgSpec::flag(
                    Some('k'),
                    "kubeconfigOnly",
                    "only show kubeconfig credentials",
                )),
        )
        .child(CommandNode::new("groups", "list groups"))
        .child(
            CommandNode::new("hooks", "list execution hooks")
                .aliases(&["exechooks"])
                .arg(app_filter()),
        )
        .child(
            CommandNode::new("ldapgroups", "list LDAP groups known to the directory server")
                .apply(ldap_paging),
        )
        .child(
            CommandNode::new("ldapusers", "list LDAP users known to the directory server")
                .apply(ldap_paging)
                .arg(ArgSpec::option(None, "email", "filter by email address"))
                .arg(ArgSpec::option(None, "firstName", "filter by first name"))
                .arg(ArgSpec::option(None, "lastName", "filter by last name")),
        )
        .child(
            CommandNode::new("namespaces", "list namespaces")
                .arg(ArgSpec::option(
                    Some('c'),
                    "clusterID",
                    "only show namespaces from this cluster",
                ))
                .arg(ArgSpec::option(
                    Some('f'),
                    "nameFilter",
                    "only show namespaces whose name contains this string",
                ))
                .arg(ArgSpec::flag(
                    Some('u'),
                    "unassociated",
                    "only show namespaces not associated with any app",
                ))
                .arg(
                    ArgSpec::option(
                        Some('m'),
                        "minutes",
                        "only show namespaces created within the last X minutes",
                    )
                    .int(1, 527040),
                ),
        )
        .child(
            CommandNode::new("notifications", "list notifications")
                .arg(
                    ArgSpec::option(Some('l'), "limit", "maximum number of notifications")
                        .int(1, 10000),
                )
                .arg(ArgSpec::option(Some('o'), "offset", "listing offset").int(0, i64::MAX))
                .arg(
                    ArgSpec::option(
                        Some('m'),
                        "minutes",
                        "only show notifications from the last X minutes",
                    )
                    .int(1, 527040),
                )
                .arg(
                    ArgSpec::option(Some('s'), "severity", "only show this severity").values(&[
                        "informational",
                        "warning",
                        "critical",
                    ]),
                ),
        )
        .child(
            CommandNode::new("protections", "list protection policies")
                .aliases(&["schedules"])
                .arg(app_filter()),
        )
        .child(CommandNode::new("replications", "list replication policies"))
        .child(
            CommandNode::new("rolebindings", "list role bindings").arg(ArgSpec::option(
                Some('i'),
                "idFilter",
                "only show role bindings matching this user or group id",
            )),
        )
        .child(
            CommandNode::new("scripts", "list hook scripts")
                .arg(ArgSpec::option(
                    Some('f'),
                    "nameFilter",
                    "only show scripts whose name contains this string",
                ))
                .arg(ArgSpec::flag(
                    Some('s'),
                    "getScriptSource",
                    "print the source of the scripts",
                )),
        )
        .child(CommandNode::new("snapshots", "list snapshots").arg(app_filter()))
        .child(CommandNode::new("storagebackends", "list storage backends"))
        .child(CommandNode::new("storageclasses", "list storage classes"))
        .child(
            CommandNode::new("users", "list users").arg(ArgSpec::option(
                Some('f'),
                "nameFilter",
                "only show users whose name contains this string",
            )),
        );

    // Object types that only exist as Custom Resources.
    if variant.is_v3() {
        node = node
            .child(CommandNode::new("connectors", "list control plane connectors"))
            .child(CommandNode::new("hooksruns", "list execution hook runs"))
            .child(CommandNode::new("iprs", "list in-place restores"))
            .child(CommandNode::new("restores", "list restores"));
    }
    node
}
