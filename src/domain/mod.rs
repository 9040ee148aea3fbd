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

//! Domain model: resource state snapshots, choice lists, parsed commands

pub mod bundle;
pub mod catalog;
pub mod command;
pub mod config;

pub use bundle::{path_get, ResourceBundle};
pub use catalog::{ChoiceList, ChoicesCatalog};
pub use config::ToolkitConfig;
pub use command::{
    canonical_object, ContextSelector, DryRun, GlobalFlags, OptionValue, OutputFormat,
    ParsedCommand, Variant, Verb,
};
