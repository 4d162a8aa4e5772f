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

//! Versions command - report which gated clauses a server accepts

use crate::error::CliError;
use colored::Colorize;
use cypher_fluent::{ClauseGate, ServerVersion};

/// Print whether each version-gated clause is available on `version`.
///
/// # Output
///
/// One line per clause, marked ✓ or ✗, followed by the version ranges the
/// clause is unavailable on.
pub fn versions(version: &str) -> Result<(), CliError> {
    let version = ServerVersion::parse(version)?;
    println!("Server version {}", version);
    for line in report(&version) {
        println!("{}", line);
    }
    Ok(())
}

fn report(version: &ServerVersion) -> Vec<String> {
    ClauseGate::all()
        .iter()
        .map(|gate| {
            let ranges: Vec<String> = gate
                .unsupported_ranges()
                .iter()
                .map(ToString::to_string)
                .collect();
            let mark = if gate.is_supported(version) {
                "✓".green().bold()
            } else {
                "✗".red().bold()
            };
            format!(
                "  {} {} (unavailable on {})",
                mark,
                gate.keyword(),
                ranges.join(", ")
            )
        })
        .collect()
}
