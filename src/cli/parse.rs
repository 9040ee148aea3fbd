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

//! The parse engine. Lowers the declarative command tree to a `clap` command
//! for tokenization, flag matching, defaults, abbreviation, and help, then
//! runs its own validation pass over the bound values: catalog membership,
//! integer ranges, fixed value sets, and mutually exclusive groups. Plaid
//! mode skips only the catalog checks; structural validation always runs.

use crate::cli::preflight::Preflight;
use crate::cli::tree::{ArgKind, ArgSpec, CommandNode};
use crate::domain::catalog::{ChoiceList, ChoicesCatalog};
use crate::domain::command::{
    DryRun, GlobalFlags, OptionValue, OutputFormat, ParsedCommand, Verb,
};
use crate::shared::{Result, ToolkitError, UsageError};
use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use std::collections::BTreeMap;

/// Keys accepted inside a `--filterSet` entry.
const FILTER_KEYS: &[&str] = &["namespace", "name", "label", "group", "version", "kind"];

/// At most this many legal values are enumerated in an invalid-choice error.
const MAX_LISTED_CHOICES: usize = 40;

/// The outcome of a parse: either a dispatchable command, or rendered help
/// text the caller should print before exiting cleanly.
#[derive(Debug)]
pub enum ParseOutcome {
    Command(ParsedCommand),
    Help(String),
}

/// Parses `argv` (without the program name) against the tree. The catalog
/// supplies the legal values for every dynamic argument; `preflight` carries
/// the plaid and variant decisions made before discovery.
pub fn parse(
    argv: &[String],
    tree: &CommandNode,
    catalog: &ChoicesCatalog,
    preflight: &Preflight,
) -> Result<ParseOutcome> {
    let (globals, remaining) = split_globals(argv, preflight)?;

    let mut full = Vec::with_capacity(remaining.len() + 1);
    full.push(tree.name.to_string());
    full.extend(remaining);

    let matches = match lower(tree).try_get_matches_from(&full) {
        Ok(matches) => matches,
        Err(err) => {
            return match err.kind() {
                clap::error::ErrorKind::DisplayHelp
                | clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    Ok(ParseOutcome::Help(err.to_string()))
                }
                _ => Err(UsageError::new(err.to_string().trim_end()).into()),
            };
        }
    };

    // Descend to the leaf subcommand. clap reports canonical names even when
    // an alias was typed, so tree lookup is by canonical name only.
    let mut node = tree;
    let mut verb = None;
    let mut object = None;
    let mut leaf = &matches;
    while let Some((name, sub)) = leaf.subcommand() {
        let child = node
            .children
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ToolkitError::usage(format!("unknown command '{name}'")))?;
        if verb.is_none() {
            verb = Verb::from_token(name);
        } else {
            object = Some(name.to_string());
        }
        node = child;
        leaf = sub;
    }
    let verb = verb.ok_or_else(|| ToolkitError::usage("no command given"))?;

    let mut options = BTreeMap::new();
    for spec in &node.args {
        options.insert(spec.dest.to_string(), extract(spec, leaf, node)?);
    }
    validate(node, &options, catalog, preflight).map(|validated| {
        ParseOutcome::Command(ParsedCommand {
            verb,
            object,
            options: validated,
            globals,
            variant: preflight.variant(),
        })
    })
}

/// Consumes the global flags that appear before the verb, leaving everything
/// else for the tree parser. `-f`/`--fast` and `--v3` were already decoded by
/// preflight; they are swallowed here so clap never sees them.
fn split_globals(argv: &[String], preflight: &Preflight) -> Result<(GlobalFlags, Vec<String>)> {
    let mut globals = GlobalFlags {
        fast: preflight.plaid_mode,
        v3_context: preflight.v3_context.clone(),
        ..GlobalFlags::default()
    };
    let mut remaining = Vec::with_capacity(argv.len());
    let mut tokens = argv.iter().peekable();
    let mut in_globals = true;
    while let Some(token) = tokens.next() {
        if in_globals && Verb::is_verb_token(token) {
            in_globals = false;
        }
        if !in_globals {
            remaining.push(token.clone());
            continue;
        }
        match token.as_str() {
            "-v" | "--verbose" => globals.verbose = true,
            "-q" | "--quiet" => globals.quiet = true,
            "-f" | "--fast" => {}
            "--insecure-skip-tls-verify" => globals.insecure_skip_tls_verify = true,
            "-o" | "--output" => {
                let value = tokens
                    .next()
                    .ok_or_else(|| ToolkitError::usage("--output requires a value"))?;
                globals.output = value.parse::<OutputFormat>()?;
            }
            "--dry-run" => {
                let value = tokens
                    .next()
                    .ok_or_else(|| ToolkitError::usage("--dry-run requires a value"))?;
                globals.dry_run = Some(value.parse::<DryRun>()?);
            }
            "--v3" => {
                // The optional value token was already decoded by preflight;
                // swallow it only when one is actually present.
                let has_value = tokens
                    .peek()
                    .map(|t| !t.starts_with('-') && !Verb::is_verb_token(t))
                    .unwrap_or(false);
                if has_value {
                    let _ = tokens.next();
                }
            }
            other => {
                if let Some(value) = other.strip_prefix("--output=") {
                    globals.output = value.parse::<OutputFormat>()?;
                } else if let Some(value) = other.strip_prefix("--dry-run=") {
                    globals.dry_run = Some(value.parse::<DryRun>()?);
                } else if other.starts_with("--v3=") {
                    // Already decoded by preflight.
                } else {
                    remaining.push(token.clone());
                }
            }
        }
    }
    Ok((globals, remaining))
}

/// Lowers one tree node (and its subtree) to a `clap` command. All the purely
/// lexical concerns live here; value semantics stay with the engine.
fn lower(node: &CommandNode) -> ClapCommand {
    let mut cmd = ClapCommand::new(node.name)
        .about(node.help)
        .infer_long_args(true)
        .disable_version_flag(true);
    for alias in node.aliases {
        cmd = cmd.visible_alias(*alias);
    }
    if !node.children.is_empty() {
        cmd = cmd.subcommand_required(true);
        for child in &node.children {
            cmd = cmd.subcommand(lower(child));
        }
    }
    for spec in &node.args {
        cmd = cmd.arg(lower_arg(spec));
    }
    cmd
}

fn lower_arg(spec: &ArgSpec) -> Arg {
    let mut arg = Arg::new(spec.dest).help(spec.help);
    if spec.positional {
        arg = arg.required(spec.required);
    } else {
        if let Some(short) = spec.short {
            arg = arg.short(short);
        }
        if let Some(long) = spec.long {
            arg = arg.long(long);
        }
        for alias in spec.long_aliases {
            arg = arg.visible_alias(*alias);
        }
        if spec.required {
            arg = arg.required(true);
        }
    }
    match spec.kind {
        ArgKind::Flag => arg = arg.action(ArgAction::SetTrue),
        ArgKind::Append => arg = arg.action(ArgAction::Append),
        ArgKind::AppendList => arg = arg.action(ArgAction::Append).num_args(1..),
        ArgKind::Str | ArgKind::Int { .. } | ArgKind::Enum(_) => {}
    }
    if let Some(default) = spec.default {
        arg = arg.default_value(default);
    }
    if let Some(heading) = spec.heading {
        arg = arg.help_heading(heading);
    }
    if spec.hidden {
        arg = arg.hide(true);
    }
    arg
}

/// How an argument is named in error messages.
fn display_name(spec: &ArgSpec) -> String {
    match spec.long {
        Some(long) => format!("--{long}"),
        None => spec.dest.to_string(),
    }
}

/// Binds one argument from the clap matches, applying the coercion its kind
/// demands. Range and value-set violations surface here, with the catalog
/// checks deferred to `validate`.
fn extract(spec: &ArgSpec, matches: &ArgMatches, node: &CommandNode) -> Result<OptionValue> {
    let value = match spec.kind {
        ArgKind::Flag => OptionValue::Bool(matches.get_flag(spec.dest)),
        ArgKind::Str => match matches.get_one::<String>(spec.dest) {
            Some(value) => OptionValue::Str(value.clone()),
            None => OptionValue::Null,
        },
        ArgKind::Int { min, max } => match matches.get_one::<String>(spec.dest) {
            Some(raw) => {
                let parsed = raw.parse::<i64>().ok().filter(|v| (min..=max).contains(v));
                match parsed {
                    Some(v) => OptionValue::Int(v),
                    None => {
                        return Err(usage_for(
                            node,
                            format!(
                                "argument {}: invalid value '{raw}': expected an integer between {min} and {max}",
                                display_name(spec)
                            ),
                        ));
                    }
                }
            }
            None => OptionValue::Null,
        },
        ArgKind::Enum(values) => match matches.get_one::<String>(spec.dest) {
            Some(raw) => match normalize_enum(raw, values) {
                Some(v) => OptionValue::Str(v),
                None => {
                    return Err(usage_for(
                        node,
                        format!(
                            "argument {}: invalid choice: '{raw}' (choose from {})",
                            display_name(spec),
                            values.join(", ")
                        ),
                    ));
                }
            },
            None => OptionValue::Null,
        },
        ArgKind::Append => match matches.get_many::<String>(spec.dest) {
            Some(values) => OptionValue::List(values.cloned().collect()),
            None => OptionValue::List(Vec::new()),
        },
        ArgKind::AppendList => match matches.get_occurrences::<String>(spec.dest) {
            Some(occurrences) => OptionValue::ListList(
                occurrences.map(|o| o.cloned().collect()).collect(),
            ),
            None => OptionValue::ListList(Vec::new()),
        },
    };
    Ok(value)
}

/// Fixed value sets are matched case-insensitively only when every legal
/// value is lowercase; mixed-case sets like `Delete`/`Retain` match exactly.
fn normalize_enum(raw: &str, values: &'static [&'static str]) -> Option<String> {
    let all_lowercase = values
        .iter()
        .all(|v| !v.chars().any(|c| c.is_uppercase()));
    let candidate = if all_lowercase {
        raw.to_lowercase()
    } else {
        raw.to_string()
    };
    values.contains(&candidate.as_str()).then_some(candidate)
}

/// Post-bind validation: catalog membership, sole-choice defaults, filter
/// set keys, and mutually exclusive groups.
fn validate(
    node: &CommandNode,
    options: &BTreeMap<String, OptionValue>,
    catalog: &ChoicesCatalog,
    preflight: &Preflight,
) -> Result<BTreeMap<String, OptionValue>> {
    let mut options = options.clone();

    if !preflight.plaid_mode {
        for spec in &node.args {
            let Some(list) = spec.choices else { continue };
            let allowed = resolve_choices(list, catalog, &options);
            let bound = options.get(spec.dest).cloned().unwrap_or(OptionValue::Null);
            match bound {
                OptionValue::Str(value) => {
                    check_choice(node, spec, &value, &allowed)?;
                }
                OptionValue::List(values) => {
                    for value in &values {
                        check_choice(node, spec, value, &allowed)?;
                    }
                }
                OptionValue::Null if spec.default_if_sole_choice => match allowed.len() {
                    1 => {
                        options.insert(spec.dest.to_string(), OptionValue::Str(allowed[0].clone()));
                    }
                    0 => {
                        return Err(usage_for(
                            node,
                            format!("no {} exist", list.describe()),
                        ));
                    }
                    _ => {
                        return Err(usage_for(
                            node,
                            format!(
                                "argument {} is required when more than one of the {} exists (choose from {})",
                                display_name(spec),
                                list.describe(),
                                render_choices(&allowed)
                            ),
                        ));
                    }
                },
                _ => {}
            }
        }
    }

    for spec in &node.args {
        if !spec.regex {
            continue;
        }
        if let Some(OptionValue::ListList(groups)) = options.get(spec.dest) {
            for pattern in groups.iter().flatten() {
                if let Err(err) = regex::Regex::new(pattern) {
                    return Err(usage_for(
                        node,
                        format!(
                            "argument {}: invalid regular expression '{pattern}': {err}",
                            display_name(spec)
                        ),
                    ));
                }
            }
        }
    }

    for spec in &node.args {
        let Some((pattern, shape)) = spec.pattern else {
            continue;
        };
        if let Some(OptionValue::Str(value)) = options.get(spec.dest) {
            let matched = regex::Regex::new(pattern)
                .map(|re| re.is_match(value))
                .unwrap_or(false);
            if !matched {
                return Err(usage_for(
                    node,
                    format!(
                        "argument {}: invalid value '{value}': expected {shape}",
                        display_name(spec)
                    ),
                ));
            }
        }
    }

    for spec in &node.args {
        let Some(partner) = spec.requires else { continue };
        let bound = options
            .get(spec.dest)
            .map(OptionValue::is_set)
            .unwrap_or(false);
        let partner_bound = options
            .get(partner)
            .map(OptionValue::is_set)
            .unwrap_or(false);
        if bound && !partner_bound {
            return Err(usage_for(
                node,
                format!("argument {} requires --{partner}", display_name(spec)),
            ));
        }
    }

    if let Some(OptionValue::List(filters)) = options.get("filterSet") {
        for entry in filters {
            validate_filter_set(node, entry)?;
        }
    }

    for group in &node.groups {
        let members: Vec<&ArgSpec> = node
            .args
            .iter()
            .filter(|a| a.group == Some(group.id))
            .collect();
        let set: Vec<&&ArgSpec> = members
            .iter()
            .filter(|a| {
                options
                    .get(a.dest)
                    .map(OptionValue::is_set)
                    .unwrap_or(false)
            })
            .collect();
        if set.len() > 1 {
            let names: Vec<String> = set.iter().map(|a| display_name(a)).collect();
            return Err(usage_for(
                node,
                format!(
                    "the {} options {} are mutually exclusive",
                    group.label,
                    names.join(" and ")
                ),
            ));
        }
        if group.required && set.is_empty() {
            let names: Vec<String> = members.iter().map(|a| display_name(a)).collect();
            return Err(usage_for(
                node,
                format!(
                    "one of the {} options is required ({})",
                    group.label,
                    names.join(", ")
                ),
            ));
        }
    }

    Ok(options)
}

/// Resolves a list reference against the catalog. Destination applications
/// are derived on the fly: the full app list minus the bound source app.
fn resolve_choices(
    list: ChoiceList,
    catalog: &ChoicesCatalog,
    options: &BTreeMap<String, OptionValue>,
) -> Vec<String> {
    match list {
        ChoiceList::DestApps => {
            let source = options.get("sourceApp").and_then(OptionValue::as_str);
            catalog
                .dest_apps
                .iter()
                .filter(|app| Some(app.as_str()) != source)
                .cloned()
                .collect()
        }
        other => catalog.list(other).to_vec(),
    }
}

fn check_choice(node: &CommandNode, spec: &ArgSpec, value: &str, allowed: &[String]) -> Result<()> {
    let list = match spec.choices {
        Some(list) => list,
        None => return Ok(()),
    };
    if allowed.is_empty() {
        return Err(usage_for(
            node,
            format!("no {} exist", list.describe()),
        ));
    }
    if !allowed.iter().any(|a| a == value) {
        return Err(usage_for(
            node,
            format!(
                "argument {}: invalid choice: '{value}' (choose from {})",
                display_name(spec),
                render_choices(allowed)
            ),
        ));
    }
    Ok(())
}

fn validate_filter_set(node: &CommandNode, entry: &str) -> Result<()> {
    for pair in entry.split(',') {
        let valid = pair
            .split_once('=')
            .map(|(key, value)| FILTER_KEYS.contains(&key) && !value.is_empty())
            .unwrap_or(false);
        if !valid {
            return Err(usage_for(
                node,
                format!(
                    "invalid --filterSet entry '{pair}': expected key=value with key one of {}",
                    FILTER_KEYS.join(", ")
                ),
            ));
        }
    }
    Ok(())
}

fn render_choices(choices: &[String]) -> String {
    if choices.len() <= MAX_LISTED_CHOICES {
        choices.join(", ")
    } else {
        format!(
            "{}, ... {} more",
            choices[..MAX_LISTED_CHOICES].join(", "),
            choices.len() - MAX_LISTED_CHOICES
        )
    }
}

/// A usage error annotated with the synopsis of the subcommand that rejected
/// the command line.
fn usage_for(node: &CommandNode, message: String) -> ToolkitError {
    let usage = lower(node).render_usage().to_string();
    UsageError::with_usage(message, usage).into()
}
