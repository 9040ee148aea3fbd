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

//! The declarative command tree. Each verb module contributes a
//! `CommandNode` describing its object types, arguments, and mutually
//! exclusive groups as plain data; variant differences (v2 REST workflows
//! versus v3 CR workflows) are gates evaluated once while the tree is built,
//! never two copies of a tree.

mod clone_restore;
mod copy;
mod create;
mod deploy;
mod list;
mod manage;
mod update;

use crate::domain::catalog::ChoiceList;
use crate::domain::command::{Variant, Verb};

/// How an argument binds and coerces its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    /// Boolean switch, false unless present.
    Flag,
    /// Single free-form string.
    Str,
    /// Integer with an inclusive range check.
    Int { min: i64, max: i64 },
    /// Lowercased string checked against a fixed value set.
    Enum(&'static [&'static str]),
    /// Repeatable flag taking one value per occurrence.
    Append,
    /// Repeatable flag taking one or more values per occurrence; the bound
    /// value is a list of lists, one inner list per occurrence.
    AppendList,
}

/// One argument descriptor. The whole option surface of a subcommand is a
/// `Vec<ArgSpec>`: data, not code.
#[derive(Debug, Clone)]
pub struct ArgSpec {
    /// Canonical option name the value binds to.
    pub dest: &'static str,
    pub short: Option<char>,
    pub long: Option<&'static str>,
    /// Extra long spellings, e.g. `--appVault` for `--bucketID`.
    pub long_aliases: &'static [&'static str],
    pub positional: bool,
    pub required: bool,
    pub help: &'static str,
    pub kind: ArgKind,
    /// Catalog list constraining the value in non-plaid mode.
    pub choices: Option<ChoiceList>,
    pub default: Option<&'static str>,
    /// Mutually exclusive group id, scoped to the owning node.
    pub group: Option<&'static str>,
    /// Help section label; purely a rendering concern.
    pub heading: Option<&'static str>,
    pub hidden: bool,
    /// When the constraining list holds exactly one identifier and the flag
    /// is absent, bind that identifier instead of failing.
    pub default_if_sole_choice: bool,
    /// Every value must compile as a regular expression.
    pub regex: bool,
    /// Regex the bound value must match, with a description of the expected
    /// shape for error messages.
    pub pattern: Option<(&'static str, &'static str)>,
    /// Another argument of the same node that must be set whenever this one
    /// is. Declared on both members to pair two arguments.
    pub requires: Option<&'static str>,
}

impl ArgSpec {
    pub fn positional(dest: &'static str, help: &'static str) -> Self {
        Self {
            dest,
            short: None,
            long: None,
            long_aliases: &[],
            positional: true,
            required: true,
            help,
            kind: ArgKind::Str,
            choices: None,
            default: None,
            group: None,
            heading: None,
            hidden: false,
            default_if_sole_choice: false,
            regex: false,
            pattern: None,
            requires: None,
        }
    }

    pub fn option(short: Option<char>, long: &'static str, help: &'static str) -> Self {
        Self {
            dest: long,
            short,
            long: Some(long),
            long_aliases: &[],
            positional: false,
            required: false,
            help,
            kind: ArgKind::Str,
            choices: None,
            default: None,
            group: None,
            heading: None,
            hidden: false,
            default_if_sole_choice: false,
            regex: false,
            pattern: None,
            requires: None,
        }
    }

    pub fn flag(short: Option<char>, long: &'static str, help: &'static str) -> Self {
        Self {
            kind: ArgKind::Flag,
            ..Self::option(short, long, help)
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn choices(mut self, list: ChoiceList) -> Self {
        self.choices = Some(list);
        self
    }

    pub fn values(mut self, values: &'static [&'static str]) -> Self {
        self.kind = ArgKind::Enum(values);
        self
    }

    pub fn int(mut self, min: i64, max: i64) -> Self {
        self.kind = ArgKind::Int { min, max };
        self
    }

    pub fn default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    pub fn group(mut self, id: &'static str) -> Self {
        self.group = Some(id);
        self
    }

    pub fn heading(mut self, label: &'static str) -> Self {
        self.heading = Some(label);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn append(mut self) -> Self {
        self.kind = ArgKind::Append;
        self
    }

    pub fn append_list(mut self) -> Self {
        self.kind = ArgKind::AppendList;
        self
    }

    pub fn alias(mut self, aliases: &'static [&'static str]) -> Self {
        self.long_aliases = aliases;
        self
    }

    pub fn default_if_sole_choice(mut self) -> Self {
        self.default_if_sole_choice = true;
        self
    }

    pub fn regex(mut self) -> Self {
        self.regex = true;
        self
    }

    pub fn pattern(mut self, regex: &'static str, shape: &'static str) -> Self {
        self.pattern = Some((regex, shape));
        self
    }

    pub fn requires(mut self, dest: &'static str) -> Self {
        self.requires = Some(dest);
        self
    }
}

/// A mutually exclusive group of arguments within one node. `label` names the
/// group in conflict errors; a required group must bind exactly one member.
#[derive(Debug, Clone)]
pub struct MutexGroup {
    pub id: &'static str,
    pub label: &'static str,
    pub required: bool,
}

impl MutexGroup {
    pub fn new(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// One node of the command tree: a verb, an object type, or the root.
#[derive(Debug, Clone)]
pub struct CommandNode {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub help: &'static str,
    pub args: Vec<ArgSpec>,
    pub groups: Vec<MutexGroup>,
    pub children: Vec<CommandNode>,
}

impl CommandNode {
    pub fn new(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            aliases: &[],
            help,
            args: Vec::new(),
            groups: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn arg(mut self, arg: ArgSpec) -> Self {
        self.args.push(arg);
        self
    }

    pub fn mutex(mut self, group: MutexGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn child(mut self, node: CommandNode) -> Self {
        self.children.push(node);
        self
    }

    pub fn find_group(&self, id: &str) -> Option<&MutexGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Applies a reusable option block to this node.
    pub fn apply(self, f: impl FnOnce(CommandNode) -> CommandNode) -> CommandNode {
        f(self)
    }
}

/// v2-only polling options shared by long-running operations: run in the
/// background, or poll on an interval until the job settles.
pub(crate) fn polling_group(node: CommandNode) -> CommandNode {
    node.arg(
        ArgSpec::flag(
            Some('b'),
            "background",
            "run the operation in the background",
        )
        .heading("polling group"),
    )
    .arg(
        ArgSpec::option(
            Some('t'),
            "pollTimer",
            "polling interval in seconds for non-background operations",
        )
        .int(1, 3600)
        .default("5")
        .heading("polling group"),
    )
}

/// Namespace mapping for clone/restore targets: either a single new
/// namespace, or an explicit source=destination mapping per namespace.
pub(crate) fn namespace_group(node: CommandNode) -> CommandNode {
    node.mutex(MutexGroup::new("new-namespace", "new namespace group"))
        .arg(
            ArgSpec::option(None, "newNamespace", "new namespace for the copied application")
                .group("new-namespace"),
        )
        .arg(
            ArgSpec::option(
                None,
                "multiNsMapping",
                "source=destination namespace mappings for multi-namespace applications",
            )
            .append()
            .group("new-namespace"),
        )
}

/// Resource filter options shared by restore and in-place restore.
pub(crate) fn filter_group(node: CommandNode) -> CommandNode {
    node.arg(
        ArgSpec::option(
            None,
            "filterSelection",
            "whether the filter set selects resources to include or exclude",
        )
        .values(&["include", "exclude"])
        .heading("filter group"),
    )
    .arg(
        ArgSpec::option(
            None,
            "filterSet",
            "comma separated set of key=value filters (namespace, name, label, group, version, kind)",
        )
        .append()
        .heading("filter group"),
    )
}

/// Assembles the whole tree for a variant. Choices are referenced by name;
/// the engine resolves them against the catalog at validation time.
pub fn build_tree(variant: Variant) -> CommandNode {
    CommandNode::new("actoolkit", "manage data protection for Kubernetes applications")
        .child(deploy::node(variant))
        .child(clone_restore::clone_node(variant))
        .child(clone_restore::restore_node(variant))
        .child(clone_restore::ipr_node(variant))
        .child(list::node(variant))
        .child(copy::node(variant))
        .child(create::node(variant))
        .child(manage::manage_node(variant))
        .child(manage::destroy_node(variant))
        .child(manage::unmanage_node(variant))
        .child(update::node(variant))
}

/// Internal nodes use the next positional as the child discriminator; every
/// verb with object types requires one.
pub fn verb_has_objects(verb: Verb) -> bool {
    !matches!(verb, Verb::Clone | Verb::Restore | Verb::Ipr)
}
