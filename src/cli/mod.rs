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

//! The command line front end: preflight scan, declarative command tree,
//! parse engine, dispatch, and output rendering.

pub mod dispatch;
pub mod display;
pub mod parse;
pub mod preflight;
pub mod tree;

pub use dispatch::{dispatch, CommandExecutor, DispatchContext, RenderExecutor};
pub use display::OutputRenderer;
pub use parse::{parse, ParseOutcome};
pub use preflight::Preflight;
pub use tree::{build_tree, ArgKind, ArgSpec, CommandNode, MutexGroup};
