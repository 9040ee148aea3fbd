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

//! Descriptors for `update`: mutating fields of already-managed objects.

use super::{ArgSpec, CommandNode, MutexGroup};
use crate::domain::catalog::ChoiceList;
use crate::domain::command::Variant;

fn bucket_node() -> CommandNode {
    CommandNode::new("bucket", "update a bucket")
        .aliases(&["appVault"])
        .arg(ArgSpec::positional("bucketID", "bucket to update").choices(ChoiceList::Buckets))
        .apply(super::manage::credential_group)
}

fn cloud_node() -> CommandNode {
    CommandNode::new("cloud", "update a cloud")
        .arg(ArgSpec::positional("cloudID", "cloud to update").choices(ChoiceList::Clouds))
        .mutex(MutexGroup::new("cloud-field", "cloud update group"))
        .arg(
            ArgSpec::option(
                Some('c'),
                "credentialPath",
                "the local filesystem path to the new cloud credential",
            )
            .group("cloud-field"),
        )
        .arg(
            ArgSpec::option(Some('b'), "defaultBucketID", "new default bucket for app backups")
                .choices(ChoiceList::Buckets)
                .group("cloud-field"),
        )
}

fn cluster_node() -> CommandNode {
    CommandNode::new("cluster", "update a cluster")
        .arg(ArgSpec::positional("clusterID", "cluster to update").choices(ChoiceList::Clusters))
        .arg(
            ArgSpec::option(Some('b'), "defaultBucketID", "new default bucket for app backups")
                .choices(ChoiceList::Buckets),
        )
}

fn protection_node() -> CommandNode {
    CommandNode::new("protection", "update a protection policy")
        .aliases(&["schedule"])
        .arg(
            ArgSpec::positional("protection", "protection policy to update")
                .choices(ChoiceList::Protections),
        )
        .apply(|n| super::create::protection_schedule_args(n, false))
}

fn replication_node() -> CommandNode {
    CommandNode::new("replication", "update a replication policy")
        .arg(
            ArgSpec::positional("replicationID", "replication policy to update")
                .choices(ChoiceList::Replications),
        )
        .arg(
            ArgSpec::option(Some('o'), "operation", "replication operation to perform")
                .values(&["failover", "reverse", "resync"])
                .required(),
        )
}

fn script_node() -> CommandNode {
    CommandNode::new("script", "update a hook script")
        .arg(ArgSpec::positional("scriptID", "script to update").choices(ChoiceList::Scripts))
        .arg(ArgSpec::positional(
            "filePath",
            "the local filesystem path to the new script contents",
        ))
}

pub fn node(_variant: Variant) -> CommandNode {
    CommandNode::new("update", "update an object")
        .child(bucket_node())
        .child(cloud_node())
        .child(cluster_node())
        .child(protection_node())
        .child(replication_node())
        .child(script_node())
}
