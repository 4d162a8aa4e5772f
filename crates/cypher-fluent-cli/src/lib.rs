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

//! Command-line front end for `cypher-fluent`.
//!
//! # Commands
//!
//! - **compile**: apply a JSON plan (see [`plan`]) to a fresh query and
//!   print the compiled `{text, parameters}`
//! - **versions**: report which version-gated clauses a server accepts
//!
//! # Examples
//!
//! ```no_run
//! use cypher_fluent_cli::commands::versions;
//!
//! # fn main() -> Result<(), cypher_fluent_cli::error::CliError> {
//! versions("1.8.M07")?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod plan;
