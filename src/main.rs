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

use actoolkit::cli::{
    build_tree, dispatch, parse, preflight, DispatchContext, OutputRenderer, ParseOutcome,
    Preflight, RenderExecutor,
};
use actoolkit::domain::{ChoicesCatalog, ToolkitConfig, Variant, Verb};
use actoolkit::infrastructure::{
    discovery, ClusterWriter, KubeResourceProvider, ResourceProvider, StaticProvider,
};
use actoolkit::shared::{Result, ToolkitError};

#[tokio::main]
async fn main() {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    init_tracing(&argv);

    let code = match run(&argv).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err}");
            err.exit_code()
        }
    };
    std::process::exit(code);
}

/// The five stages in order: preflight, discovery, tree construction, parse,
/// dispatch. Discovery and dispatch race a Ctrl-C watcher so an interrupt
/// exits cleanly instead of leaving a half-rendered run behind.
async fn run(argv: &[String]) -> Result<i32> {
    let preflight = preflight::scan(argv)?;
    let variant = preflight.variant();
    let insecure = pre_verb_flag(argv, &["--insecure-skip-tls-verify"]);
    let backend = build_backend(&preflight, insecure).await?;

    let catalog = if preflight.plaid_mode {
        ChoicesCatalog::default()
    } else {
        let (bundle, diagnostics) = tokio::select! {
            result = discovery::discover(backend.provider(), variant) => result?,
            _ = tokio::signal::ctrl_c() => return Err(ToolkitError::Interrupted),
        };
        for diagnostic in &diagnostics {
            tracing::debug!("{diagnostic}");
        }
        ChoicesCatalog::from_bundle(&bundle, variant)
    };

    let tree = build_tree(variant);
    let cmd = match parse(argv, &tree, &catalog, &preflight)? {
        ParseOutcome::Help(text) => {
            println!("{text}");
            return Ok(0);
        }
        ParseOutcome::Command(cmd) => cmd,
    };

    let renderer = OutputRenderer::new();
    let ctx = DispatchContext {
        provider: backend.provider(),
        renderer: &renderer,
        writer: backend.writer(),
    };
    let output = tokio::select! {
        result = dispatch(&cmd, &ctx, &RenderExecutor) => result?,
        _ = tokio::signal::ctrl_c() => return Err(ToolkitError::Interrupted),
    };
    if !cmd.globals.quiet && !output.is_empty() {
        println!("{output}");
    }
    Ok(0)
}

/// The connected backend. The kube backend doubles as the cluster writer;
/// the v2 backend never writes from this binary.
enum Backend {
    Kube(KubeResourceProvider),
    Static(StaticProvider),
}

impl Backend {
    fn provider(&self) -> &dyn ResourceProvider {
        match self {
            Backend::Kube(provider) => provider,
            Backend::Static(provider) => provider,
        }
    }

    fn writer(&self) -> Option<&dyn ClusterWriter> {
        match self {
            Backend::Kube(provider) => Some(provider),
            Backend::Static(_) => None,
        }
    }
}

/// v3 talks to the cluster named by the context selector; v2 reads the
/// control plane config and serves canned resources when one is configured.
async fn build_backend(preflight: &Preflight, insecure: bool) -> Result<Backend> {
    match preflight.variant() {
        Variant::V3 => {
            let provider =
                KubeResourceProvider::connect(preflight.v3_context.as_ref(), insecure).await?;
            Ok(Backend::Kube(provider))
        }
        Variant::V2 => match ToolkitConfig::load()? {
            Some(config) => {
                tracing::debug!(project = %config.project, "loaded control plane config");
                if let Some(path) = &config.resources_file {
                    let raw = std::fs::read_to_string(path)?;
                    let doc: serde_json::Value = serde_json::from_str(&raw)?;
                    Ok(Backend::Static(StaticProvider::from_document(&doc)?))
                } else {
                    Ok(Backend::Static(StaticProvider::new()))
                }
            }
            None => {
                tracing::debug!("no control plane config found");
                Ok(Backend::Static(StaticProvider::new()))
            }
        },
    }
}

/// Checks for a flag among the tokens before the first verb, the same window
/// the preflight scan honors.
fn pre_verb_flag(argv: &[String], spellings: &[&str]) -> bool {
    argv.iter()
        .take_while(|t| !Verb::is_verb_token(t))
        .any(|t| spellings.contains(&t.as_str()))
}

fn init_tracing(argv: &[String]) {
    let verbose = pre_verb_flag(argv, &["-v", "--verbose"]);
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}
