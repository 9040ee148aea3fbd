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

//! Descriptors for `clone`, `restore`, and `ipr`: the three verbs that copy
//! an application, so they share namespace mapping, storage class, and
//! resource filter options.

use super::{filter_group, namespace_group, polling_group, ArgSpec, CommandNode, MutexGroup};
use crate::domain::catalog::ChoiceList;
use crate::domain::command::Variant;

/// The destination cluster argument. Under v2 it must name a managed
/// cluster; under v3 it is a context selector (context, kubeconfig path,
/// context@path, or None for the current context), so it stays free text.
fn cluster_arg(variant: Variant) -> ArgSpec {
    let arg = ArgSpec::positional(
        "cluster",
        "destination cluster (v3: context, kubeconfig path, context@path, or None)",
    );
    match variant {
        Variant::V2 => arg.choices(ChoiceList::DestClusters),
        Variant::V3 => arg,
    }
}

fn new_storage_class_arg() -> ArgSpec {
    ArgSpec::option(
        None,
        "newStorageClass",
        "optionally change the storage class of the copied application",
    )
    .choices(ChoiceList::StorageClasses)
}

pub fn clone_node(variant: Variant) -> CommandNode {
    let node = CommandNode::new("clone", "clone a live application to a new namespace")
        .arg(ArgSpec::positional("sourceApp", "application to clone").choices(ChoiceList::Apps))
        .arg(ArgSpec::positional("appName", "name of the new application"))
        .arg(cluster_arg(variant))
        .arg(new_storage_class_arg());
    let node = namespace_group(node);
    match variant {
        Variant::V2 => polling_group(node),
        Variant::V3 => node,
    }
}

pub fn restore_node(variant: Variant) -> CommandNode {
    let node = CommandNode::new(
        "restore",
        "restore an application from a backup or snapshot to a new namespace",
    )
    .arg(
        ArgSpec::positional("restoreSource", "backup or snapshot to restore from")
            .choices(ChoiceList::DataProtections),
    )
    .arg(ArgSpec::positional("appName", "name of the restored application"))
    .arg(cluster_arg(variant))
    .arg(new_storage_class_arg());
    let node = filter_group(namespace_group(node));
    match variant {
        Variant::V2 => polling_group(node),
        Variant::V3 => node,
    }
}

pub fn ipr_node(variant: Variant) -> CommandNode {
    let node = CommandNode::new(
        "ipr",
        "in-place restore an application (destructive) from one of its backups or snapshots",
    )
    .arg(ArgSpec::positional("app", "application to restore in place").choices(ChoiceList::Apps))
    .mutex(MutexGroup::new("restore-source", "restore source group").required())
    .arg(
        ArgSpec::option(None, "backup", "backup to restore from")
            .choices(ChoiceList::Backups)
            .group("restore-source"),
    )
    .arg(
        ArgSpec::option(None, "snapshot", "snapshot to restore from")
            .choices(ChoiceList::Snapshots)
            .group("restore-source"),
    );
    let node = filter_group(node);
    match variant {
        Variant::V2 => polling_group(node),
        Variant::V3 => node,
    }
}
