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

use actoolkit::cli::{parse, preflight, ParseOutcome};
use actoolkit::domain::catalog::ChoiceList;
use actoolkit::domain::{ChoicesCatalog, ContextSelector, Variant, Verb};
use actoolkit::*;

fn args(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|s| s.to_string()).collect()
}

fn catalog() -> ChoicesCatalog {
    ChoicesCatalog {
        apps: vec!["wordpress".into(), "gitlab".into()],
        dest_apps: vec!["wordpress".into(), "gitlab".into()],
        backups: vec!["wp-backup".into()],
        snapshots: vec!["wp-snap".into()],
        data_protections: vec!["wp-backup".into(), "wp-snap".into()],
        dest_clusters: vec!["prod-cluster".into()],
        buckets: vec!["bucket-1".into()],
        scripts: vec!["pre-freeze".into()],
        ..ChoicesCatalog::default()
    }
}

fn run(tokens: &[&str], catalog: &ChoicesCatalog) -> Result<ParseOutcome> {
    let argv = args(tokens);
    let pf = preflight::scan(&argv)?;
    let tree = build_tree(pf.variant());
    parse(&argv, &tree, catalog, &pf)
}

fn command(outcome: ParseOutcome) -> ParsedCommand {
    match outcome {
        ParseOutcome::Command(cmd) => cmd,
        ParseOutcome::Help(text) => panic!("expected a command, got help: {text}"),
    }
}

#[test]
fn test_v3_context_selects_variant_and_object_set() {
    // The same listing is legal or not depending on the backend variant.
    let cmd = command(run(&["--v3", "prodctx", "list", "connectors"], &catalog()).unwrap());
    assert_eq!(cmd.variant, Variant::V3);
    assert_eq!(
        cmd.globals.v3_context,
        Some(ContextSelector::Context("prodctx".to_string()))
    );
    assert_eq!(cmd.object.as_deref(), Some("connectors"));

    let err = run(&["list", "connectors"], &catalog()).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_bare_v3_selects_v3_with_default_context() {
    // No context value means the current kubeconfig context.
    let argv = args(&["--v3", "list", "connectors"]);
    let pf = preflight::scan(&argv).unwrap();
    assert_eq!(pf.variant(), Variant::V3);
    assert!(pf.v3_context.is_none());

    let tree = build_tree(pf.variant());
    let cmd = command(parse(&argv, &tree, &catalog(), &pf).unwrap());
    assert_eq!(cmd.variant, Variant::V3);
    assert_eq!(cmd.object.as_deref(), Some("connectors"));
    assert_eq!(cmd.globals.v3_context, None);
}

#[test]
fn test_plaid_mode_parses_against_empty_catalog() {
    // -f skips discovery entirely, so unknown identifiers must pass.
    let cmd = command(
        run(
            &["-f", "destroy", "backup", "ghost-app", "ghost-backup"],
            &ChoicesCatalog::default(),
        )
        .unwrap(),
    );
    assert!(cmd.globals.fast);
    assert_eq!(cmd.verb, Verb::Destroy);
    assert_eq!(cmd.str_option("app"), Some("ghost-app"));
    assert_eq!(cmd.str_option("backup"), Some("ghost-backup"));
}

#[test]
fn test_bad_granularity_exits_two_with_legal_values() {
    let err = run(
        &[
            "create",
            "protection",
            "wordpress",
            "-g",
            "yearly",
            "-b",
            "1",
            "-s",
            "1",
        ],
        &catalog(),
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), 2);
    let msg = err.to_string();
    for legal in ["hourly", "daily", "weekly", "monthly"] {
        assert!(msg.contains(legal), "missing {legal} in: {msg}");
    }
}

#[test]
fn test_namespace_mapping_conflict_names_the_group() {
    let err = run(
        &[
            "clone",
            "wordpress",
            "wp-copy",
            "prod-cluster",
            "--newNamespace",
            "wp-ns",
            "--multiNsMapping",
            "a=b",
        ],
        &catalog(),
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("new namespace group"));
}

#[test]
fn test_empty_restore_sources_give_a_clean_error() {
    let mut empty_protections = catalog();
    empty_protections.backups.clear();
    empty_protections.snapshots.clear();
    empty_protections.data_protections.clear();
    let err = run(
        &[
            "restore",
            "wp-backup",
            "wp-restored",
            "prod-cluster",
            "--newNamespace",
            "ns",
        ],
        &empty_protections,
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err
        .to_string()
        .contains("no restore sources (backups or snapshots) exist"));
}

#[test]
fn test_usage_errors_carry_a_synopsis() {
    let err = run(
        &["create", "snapshot", "nope", "snap"],
        &catalog(),
    )
    .unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.to_lowercase().contains("usage"), "{rendered}");
}

#[test]
fn test_alias_spellings_produce_identical_commands() {
    let a = command(run(&["list", "apps"], &catalog()).unwrap());
    let b = command(run(&["get", "applications"], &catalog()).unwrap());
    assert_eq!(a.verb, b.verb);
    assert_eq!(a.object, b.object);

    let a = command(run(&["list", "protections"], &catalog()).unwrap());
    let b = command(run(&["get", "schedules"], &catalog()).unwrap());
    assert_eq!(a.object, b.object);
}

#[test]
fn test_every_choice_list_resolvable_in_both_variants() {
    // Every list referenced by the tree must exist in the catalog, even when
    // empty, so validation never panics on a missing class.
    fn collect(node: &actoolkit::cli::CommandNode, lists: &mut Vec<ChoiceList>) {
        for arg in &node.args {
            if let Some(list) = arg.choices {
                lists.push(list);
            }
        }
        for child in &node.children {
            collect(child, lists);
        }
    }
    let catalog = ChoicesCatalog::default();
    for variant in [Variant::V2, Variant::V3] {
        let mut lists = Vec::new();
        collect(&build_tree(variant), &mut lists);
        assert!(!lists.is_empty());
        for list in lists {
            let _ = catalog.list(list);
        }
    }
}

#[test]
fn test_v2_cluster_positional_checks_managed_clusters() {
    let err = run(
        &[
            "clone",
            "wordpress",
            "wp-copy",
            "lab-cluster",
            "--newNamespace",
            "ns",
        ],
        &catalog(),
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("prod-cluster"));
}

#[test]
fn test_v3_cluster_positional_is_free_text() {
    let cmd = command(
        run(
            &[
                "--v3",
                "prodctx",
                "clone",
                "wordpress",
                "wp-copy",
                "otherctx@kube.yaml",
                "--newNamespace",
                "ns",
            ],
            &catalog(),
        )
        .unwrap(),
    );
    assert_eq!(cmd.str_option("cluster"), Some("otherctx@kube.yaml"));
}

#[test]
fn test_malformed_v3_value_exits_two() {
    let argv = args(&["--v3", "@nope", "list", "apps"]);
    let err = preflight::scan(&argv).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_deploy_chart_values_flag_is_not_plaid() {
    // -f after the verb belongs to deploy chart; -f before it is plaid mode.
    let argv = args(&[
        "deploy",
        "chart",
        "wordpress",
        "wp",
        "wp-ns",
        "-f",
        "values.yaml",
    ]);
    let pf = preflight::scan(&argv).unwrap();
    assert!(!pf.plaid_mode);

    let mut charts = catalog();
    charts.charts = vec!["wordpress".into()];
    let cmd = command({
        let tree = build_tree(pf.variant());
        parse(&argv, &tree, &charts, &pf).unwrap()
    });
    assert_eq!(
        cmd.option("values"),
        Some(&actoolkit::domain::OptionValue::List(vec![
            "values.yaml".to_string()
        ]))
    );
}

#[test]
fn test_ipr_requires_exactly_one_restore_source() {
    let err = run(&["ipr", "wordpress"], &catalog()).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("restore source group"));

    let err = run(
        &[
            "ipr",
            "wordpress",
            "--backup",
            "wp-backup",
            "--snapshot",
            "wp-snap",
        ],
        &catalog(),
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), 2);

    let cmd = command(run(&["ipr", "wordpress", "--backup", "wp-backup"], &catalog()).unwrap());
    assert_eq!(cmd.str_option("backup"), Some("wp-backup"));
}

#[test]
fn test_copy_destination_excludes_the_source() {
    let err = run(&["copy", "protections", "gitlab", "gitlab"], &catalog()).unwrap_err();
    assert_eq!(err.exit_code(), 2);

    let cmd = command(run(&["copy", "protections", "gitlab", "wordpress"], &catalog()).unwrap());
    assert_eq!(cmd.str_option("sourceApp"), Some("gitlab"));
    assert_eq!(cmd.str_option("destinationApp"), Some("wordpress"));
}

#[test]
fn test_manage_bucket_credential_group_is_exclusive() {
    let mut with_creds = catalog();
    with_creds.credentials = vec!["s3-cred".into()];
    let err = run(
        &[
            "manage",
            "bucket",
            "aws",
            "my-bucket",
            "--credential",
            "s3-cred",
            "--json",
            "/tmp/key.json",
        ],
        &with_creds,
    )
    .unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("credential group"));
}

#[test]
fn test_bare_invocation_exits_two() {
    let err = run(&[], &catalog()).unwrap_err();
    assert_eq!(err.exit_code(), 2);
}
