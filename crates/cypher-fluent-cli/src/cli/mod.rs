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

//! CLI command definitions and argument parsing.

use crate::commands::{self, CompileOptions};
use crate::error::CliError;
use clap::Subcommand;

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use cypher_fluent_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Compile a JSON query plan
    ///
    /// Applies each step of the plan to a fresh query and prints the compiled
    /// text and parameters as JSON. Nothing is sent to a server.
    Compile {
        /// Plan file path
        #[arg(value_name = "PLAN")]
        file: String,

        /// Server version the query targets (gates RELATE / CREATE UNIQUE)
        #[arg(short = 's', long, default_value = "1.8")]
        server_version: String,

        /// JSON file with query builder settings
        #[arg(short, long, value_name = "FILE")]
        config: Option<String>,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Print the text with parameter values inlined (for reading only)
        #[arg(short, long, conflicts_with = "pretty")]
        inline: bool,
    },

    /// Show which version-gated clauses a server version accepts
    Versions {
        /// Server version, e.g. 1.8, 1.8.M07 or 1.9.0
        #[arg(value_name = "VERSION")]
        version: String,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if reading input, parsing, or compiling fails.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Compile {
                file,
                server_version,
                config,
                output,
                pretty,
                inline,
            } => commands::compile(
                &file,
                &CompileOptions {
                    server_version,
                    config,
                    output,
                    pretty,
                    inline,
                },
            ),
            Commands::Versions { version } => commands::versions(&version),
        }
    }
}
