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

//! Descriptors for `create`: protection tasks, policies, hooks, and
//! directory objects.

use super::{polling_group, ArgSpec, CommandNode, MutexGroup};
use crate::domain::catalog::ChoiceList;
use crate::domain::command::Variant;

const ROLES: &[&str] = &["viewer", "member", "admin", "owner"];

const HOOK_OPERATIONS: &[&str] = &[
    "pre-snapshot",
    "post-snapshot",
    "pre-backup",
    "post-backup",
    "post-restore",
    "post-failover",
];

const REPLICATION_FREQUENCIES: &[&str] = &[
    "5m", "10m", "15m", "20m", "30m", "1h", "2h", "3h", "4h", "6h", "8h", "12h", "24h",
];

/// v3 stores protection metadata through the bucket CR, so one must always
/// be resolved there; v2 falls back to the cloud's default bucket.
fn bucket_arg(variant: Variant) -> ArgSpec {
    let arg = ArgSpec::option(Some('u'), "bucketID", "bucket to store the object metadata in")
        .alias(&["appVault"])
        .choices(ChoiceList::Buckets);
    match variant {
        Variant::V3 => arg.default_if_sole_choice(),
        Variant::V2 => arg,
    }
}

/// v3 Custom Resources carry a reclaim policy deciding whether destroying
/// the CR also removes the object storage contents.
fn reclaim_policy_arg() -> ArgSpec {
    ArgSpec::option(Some('r'), "reclaimPolicy", "object storage reclaim behavior")
        .values(&["Delete", "Retain"])
}

/// User and group role bindings share the same role set and the same
/// optional namespace/label constraints.
fn constraint_args(node: CommandNode) -> CommandNode {
    node.arg(
        ArgSpec::option(
            Some('a'),
            "labelConstraint",
            "restrict the role binding to namespaces with this label",
        )
        .append()
        .choices(ChoiceList::Labels)
        .heading("constraint group"),
    )
    .arg(
        ArgSpec::option(
            Some('n'),
            "namespaceConstraint",
            "restrict the role binding to this namespace",
        )
        .append()
        .choices(ChoiceList::Namespaces)
        .heading("constraint group"),
    )
}

fn backup_node(variant: Variant) -> CommandNode {
    let node = CommandNode::new("backup", "create a backup of an app")
        .arg(ArgSpec::positional("app", "app to backup").choices(ChoiceList::Apps))
        .arg(ArgSpec::positional("name", "name of the backup to be taken"))
        .arg(bucket_arg(variant))
        .arg(
            ArgSpec::option(Some('s'), "snapshotID", "existing snapshot to base the backup on")
                .alias(&["snapshot"])
                .choices(ChoiceList::Snapshots),
        );
    match variant {
        Variant::V3 => node.arg(reclaim_policy_arg()),
        Variant::V2 => polling_group(node),
    }
}

fn snapshot_node(variant: Variant) -> CommandNode {
    let node = CommandNode::new("snapshot", "create a snapshot of an app")
        .arg(ArgSpec::positional("app", "app to snapshot").choices(ChoiceList::Apps))
        .arg(ArgSpec::positional("name", "name of the snapshot to be taken"))
        .arg(bucket_arg(variant));
    match variant {
        Variant::V3 => node.arg(reclaim_policy_arg()),
        Variant::V2 => polling_group(node),
    }
}

fn cluster_node() -> CommandNode {
    CommandNode::new("cluster", "create a cluster from a kubeconfig for later management")
        .arg(ArgSpec::positional(
            "filePath",
            "the local filesystem path to the cluster kubeconfig",
        ))
        .arg(
            ArgSpec::option(Some('c'), "cloudID", "cloud to add the cluster to")
                .choices(ChoiceList::Clouds)
                .default_if_sole_choice(),
        )
}

fn group_node() -> CommandNode {
    CommandNode::new("group", "create a remote group (requires LDAP)")
        .arg(ArgSpec::positional("groupname", "distinguished name of the group"))
        .arg(ArgSpec::positional("role", "role of the group").values(ROLES))
        .apply(constraint_args)
}

fn hook_node(variant: Variant) -> CommandNode {
    let node = CommandNode::new("hook", "create an execution hook for an app")
        .aliases(&["exechook"])
        .arg(ArgSpec::positional("app", "app to create the hook for").choices(ChoiceList::Apps))
        .arg(ArgSpec::positional("name", "name of the hook"));
    let node = match variant {
        Variant::V3 => node.arg(ArgSpec::positional(
            "filePath",
            "the local filesystem path to the hook script",
        )),
        Variant::V2 => node.arg(
            ArgSpec::positional("script", "script to run when the hook fires")
                .choices(ChoiceList::Scripts),
        ),
    };
    node.arg(
        ArgSpec::option(Some('o'), "operation", "lifecycle event the hook runs on")
            .values(HOOK_OPERATIONS)
            .required(),
    )
    .arg(hook_filter('i', "containerImage", "regex to match container images"))
    .arg(hook_filter('n', "namespace", "regex to match namespaces"))
    .arg(hook_filter('p', "podName", "regex to match pod names"))
    .arg(hook_filter('l', "label", "regex to match pod labels"))
    .arg(hook_filter('c', "containerName", "regex to match container names"))
}

/// Hook filters are repeatable and take any number of regex tokens per
/// occurrence; executors see one list per occurrence.
fn hook_filter(short: char, long: &'static str, help: &'static str) -> ArgSpec {
    ArgSpec::option(Some(short), long, help)
        .append_list()
        .regex()
        .heading("filter group")
}

fn ldap_node() -> CommandNode {
    CommandNode::new("ldap", "create an LDAP(S) server connection")
        .arg(ArgSpec::positional("url", "hostname or IP of the LDAP server"))
        .arg(ArgSpec::positional("port", "port of the LDAP server").int(1, 65535))
        .arg(ArgSpec::flag(None, "secure", "use LDAPS instead of LDAP"))
        .arg(
            ArgSpec::option(Some('u'), "username", "service account username (email)")
                .required()
                .heading("service account group"),
        )
        .arg(
            ArgSpec::option(Some('p'), "password", "service account password")
                .required()
                .heading("service account group"),
        )
        .arg(
            ArgSpec::option(None, "userBaseDN", "base DN for user searches")
                .required()
                .heading("user match group"),
        )
        .arg(
            ArgSpec::option(None, "userSearchFilter", "custom user search filter")
                .default("(objectClass=Person)")
                .heading("user match group"),
        )
        .arg(
            ArgSpec::option(None, "userLoginAttribute", "attribute users log in with")
                .values(&["mail", "userPrincipalName"])
                .default("mail")
                .heading("user match group"),
        )
        .arg(
            ArgSpec::option(None, "groupBaseDN", "base DN for group searches")
                .required()
                .heading("group match group"),
        )
        .arg(
            ArgSpec::option(None, "groupSearchFilter", "custom group search filter")
                .heading("group match group"),
        )
}

pub(super) fn protection_schedule_args(node: CommandNode, required: bool) -> CommandNode {
    let req = |arg: ArgSpec| if required { arg.required() } else { arg };
    node.arg(req(
        ArgSpec::option(Some('g'), "granularity", "schedule granularity").values(&[
            "hourly",
            "daily",
            "weekly",
            "monthly",
        ]),
    ))
    .arg(req(
        ArgSpec::option(Some('b'), "backupRetention", "number of backups to retain").int(0, 59),
    ))
    .arg(req(ArgSpec::option(
        Some('s'),
        "snapshotRetention",
        "number of snapshots to retain",
    )
    .int(0, 59)))
    .arg(ArgSpec::option(Some('M'), "dayOfMonth", "day of the month to run").int(1, 31))
    .arg(ArgSpec::option(Some('W'), "dayOfWeek", "day of the week to run (0 is Sunday)").int(0, 6))
    .arg(ArgSpec::option(Some('H'), "hour", "hour of the day to run (military time)").int(0, 23))
    .arg(
        ArgSpec::option(Some('m'), "minute", "minute of the hour to run")
            .int(0, 59)
            .default("0"),
    )
}

fn protection_node(variant: Variant) -> CommandNode {
    CommandNode::new("protection", "create a protection policy for an app")
        .aliases(&["schedule"])
        .arg(
            ArgSpec::positional("app", "app to create the protection policy for")
                .choices(ChoiceList::Apps),
        )
        .arg(bucket_arg(variant))
        .apply(|n| protection_schedule_args(n, true))
}

fn replication_node() -> CommandNode {
    CommandNode::new("replication", "create a replication policy for an app")
        .arg(
            ArgSpec::positional("appID", "app to create the replication policy for")
                .choices(ChoiceList::Apps),
        )
        .arg(
            ArgSpec::option(Some('c'), "destClusterID", "destination cluster to replicate to")
                .choices(ChoiceList::DestClusters)
                .required(),
        )
        .arg(
            ArgSpec::option(Some('n'), "destNamespace", "destination namespace").required(),
        )
        .arg(
            ArgSpec::option(Some('s'), "destStorageClass", "destination storage class")
                .choices(ChoiceList::StorageClasses),
        )
        .arg(
            ArgSpec::option(Some('f'), "replicationFrequency", "how often to replicate")
                .values(REPLICATION_FREQUENCIES)
                .required(),
        )
        .arg(
            ArgSpec::option(Some('o'), "offset", "offset within the replication window (hh:mm or mm)")
                .default("00:00")
                .pattern(r"^\d{1,2}(:[0-5]\d)?$", "hh:mm or mm"),
        )
}

fn script_node() -> CommandNode {
    CommandNode::new("script", "create a hook script")
        .arg(ArgSpec::positional("name", "name of the script"))
        .arg(ArgSpec::positional(
            "filePath",
            "the local filesystem path to the script",
        ))
        .arg(ArgSpec::option(
            Some('d'),
            "description",
            "optional description of the script",
        ))
}

fn user_node() -> CommandNode {
    CommandNode::new("user", "create a user")
        .arg(ArgSpec::positional("email", "email address of the user"))
        .arg(ArgSpec::positional("role", "role of the user").values(ROLES))
        .arg(ArgSpec::option(None, "firstName", "first name of the user"))
        .arg(ArgSpec::option(None, "lastName", "last name of the user"))
        .mutex(MutexGroup::new("acc-group", "account type group"))
        .arg(
            ArgSpec::option(Some('p'), "tempPassword", "temporary password (local accounts)")
                .group("acc-group"),
        )
        .arg(
            ArgSpec::flag(None, "ldap", "create an LDAP-backed user")
                .group("acc-group"),
        )
        .apply(constraint_args)
}

pub fn node(variant: Variant) -> CommandNode {
    CommandNode::new("create", "create an object")
        .child(backup_node(variant))
        .child(cluster_node())
        .child(group_node())
        .child(hook_node(variant))
        .child(ldap_node())
        .child(protection_node(variant))
        .child(replication_node())
        .child(script_node())
        .child(snapshot_node(variant))
        .child(user_node())
}
