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

//! Pre-parse scan of raw argv. Plaid mode and the backend variant must be
//! known before discovery runs and before the parser is built, so these two
//! flags are recognized by a token scan that never consults the command tree.

use crate::domain::{ContextSelector, Variant, Verb};
use crate::shared::Result;

/// What the scan found: enough to choose the variant and decide whether
/// discovery runs at all. `--v3` selects the variant on its own; the context
/// value is optional, and absent means the current kubeconfig context.
#[derive(Debug, Clone, Default)]
pub struct Preflight {
    pub plaid_mode: bool,
    pub v3_mode: bool,
    pub v3_context: Option<ContextSelector>,
}

impl Preflight {
    pub fn variant(&self) -> Variant {
        if self.v3_mode {
            Variant::V3
        } else {
            Variant::V2
        }
    }
}

/// Scans the tokens before the first verb. Tokens past the verb belong to
/// subcommands, which may reuse short flags like `-f` for their own options,
/// so the scan must stop there.
pub fn scan<I, S>(argv: I) -> Result<Preflight>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut found = Preflight::default();
    let mut tokens = argv.into_iter().peekable();
    while let Some(token) = tokens.next() {
        let token = token.as_ref();
        if Verb::is_verb_token(token) {
            break;
        }
        match token {
            "-f" | "--fast" => found.plaid_mode = true,
            "--v3" => {
                found.v3_mode = true;
                // The context value is optional: a following flag or verb
                // means the current kubeconfig context.
                let has_value = tokens
                    .peek()
                    .map(|t| {
                        let t = t.as_ref();
                        !t.starts_with('-') && !Verb::is_verb_token(t)
                    })
                    .unwrap_or(false);
                if has_value {
                    if let Some(value) = tokens.next() {
                        found.v3_context = Some(value.as_ref().parse::<ContextSelector>()?);
                    }
                }
            }
            other => {
                if let Some(value) = other.strip_prefix("--v3=") {
                    found.v3_mode = true;
                    found.v3_context = Some(value.parse::<ContextSelector>()?);
                }
            }
        }
    }
    Ok(found)
}
