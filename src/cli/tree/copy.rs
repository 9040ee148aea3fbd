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

//! Descriptors for `copy`: duplicating per-app settings between apps. The
//! destination app list is computed at validation time from the app list
//! minus the already-bound source app.

use super::{ArgSpec, CommandNode};
use crate::domain::catalog::ChoiceList;
use crate::domain::command::Variant;

fn copy_between_apps(name: &'static str, help: &'static str) -> CommandNode {
    CommandNode::new(name, help)
        .arg(ArgSpec::positional("sourceApp", "app to copy from").choices(ChoiceList::Apps))
        .arg(
            ArgSpec::positional("destinationApp", "app to copy to")
                .choices(ChoiceList::DestApps),
        )
}

pub fn node(_variant: Variant) -> CommandNode {
    CommandNode::new("copy", "copy app settings from one app to another")
        .child(copy_between_apps(
            "hooks",
            "copy the execution hooks of an app onto another app",
        ))
        .child(copy_between_apps(
            "protections",
            "copy the protection policies of an app onto another app",
        ))
}
