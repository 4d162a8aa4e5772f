// Dweve Cypher Fluent - Immutable Cypher query builder
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Compile command - turn a JSON plan into `{text, parameters}`

use super::{read_file, write_output};
use crate::error::CliError;
use crate::plan::{OfflineClient, Plan};
use cypher_fluent::{CypherFluentQuery, CypherQuery, QueryConfig, ServerVersion};
use tracing::info;

/// Options for [`compile`].
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Server version the plan targets.
    pub server_version: String,
    /// Optional JSON file holding a `QueryConfig`.
    pub config: Option<String>,
    /// Write to this file instead of stdout.
    pub output: Option<String>,
    /// Pretty-print the JSON output.
    pub pretty: bool,
    /// Print the text with parameters inlined instead of JSON.
    pub inline: bool,
}

/// Compile the plan in `file` and print the result.
///
/// # Errors
///
/// Returns `Err` if any file cannot be read or parsed, the server version is
/// malformed, or a plan step is rejected by the builder.
///
/// # Examples
///
/// ```no_run
/// use cypher_fluent_cli::commands::{compile, CompileOptions};
///
/// # fn main() -> Result<(), cypher_fluent_cli::error::CliError> {
/// compile(
///     "plan.json",
///     &CompileOptions {
///         server_version: "1.8".to_string(),
///         pretty: true,
///         ..CompileOptions::default()
///     },
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn compile(file: &str, options: &CompileOptions) -> Result<(), CliError> {
    let query = compile_query(&read_file(file)?, options)?;
    info!(file, parameters = query.parameters().len(), "compiled plan");

    let mut rendered = if options.inline {
        query.debug_text()
    } else if options.pretty {
        serde_json::to_string_pretty(&query)?
    } else {
        serde_json::to_string(&query)?
    };
    rendered.push('\n');

    write_output(&rendered, options.output.as_deref())
}

/// Compile plan text without touching stdout.
pub fn compile_query(plan: &str, options: &CompileOptions) -> Result<CypherQuery, CliError> {
    let version = ServerVersion::parse(&options.server_version)?;
    let config = match &options.config {
        Some(path) => serde_json::from_str::<QueryConfig>(&read_file(path)?)?,
        None => QueryConfig::default(),
    };
    let plan = Plan::from_json(plan)?;

    let client = OfflineClient::new(version);
    let query = plan.apply(CypherFluentQuery::with_config(&client, config)?)?;
    Ok(query.query())
}
