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

use super::{ArgSpec, CommandNode};
use crate::domain::catalog::ChoiceList;
use crate::domain::command::Variant;

fn chart_node(variant: Variant) -> CommandNode {
    let node = CommandNode::new("chart", "deploy a Helm chart and manage the resulting app")
        .arg(ArgSpec::positional("chart", "chart to deploy").choices(ChoiceList::Charts))
        .arg(ArgSpec::positional("appName", "name of the deployed application"))
        .arg(ArgSpec::positional("namespace", "namespace to deploy into"))
        .arg(ArgSpec::option(Some('s'), "set", "set chart values (key=value)").append())
        .arg(ArgSpec::option(Some('f'), "values", "chart values file").append());
    match variant {
        Variant::V3 => node.arg(
            ArgSpec::option(Some('u'), "bucketID", "bucket to store app metadata in")
                .alias(&["appVault"])
                .choices(ChoiceList::Buckets),
        ),
        Variant::V2 => node,
    }
}

fn acp_node() -> CommandNode {
    CommandNode::new("acp", "deploy the provisioner onto the cluster")
        .arg(
            ArgSpec::option(Some('c'), "regCred", "registry credential for image pulls")
                .choices(ChoiceList::Credentials),
        )
        .arg(ArgSpec::option(
            Some('r'),
            "registry",
            "override the default image registry",
        ))
}

pub fn node(variant: Variant) -> CommandNode {
    let node = CommandNode::new("deploy", "deploy Kubernetes resources into the current context");
    let node = match variant {
        Variant::V3 => node.child(acp_node()),
        Variant::V2 => node,
    };
    node.child(chart_node(variant))
}
