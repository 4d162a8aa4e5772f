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

//! Cypher text and value primitives.
//!
//! This module holds the pieces the builder assembles queries from:
//! parameter values, escaping, map-literal serialization and the compiled
//! query itself.

pub mod escape;
pub mod literal;
pub mod query;
pub mod value;

pub use escape::{
    escape_identifier, escape_string, is_valid_identifier, normalize_unicode, quote_string,
    validate_identifier, validate_property_key, validate_string_length,
};
pub use literal::to_map_literal;
pub use query::CypherQuery;
pub use value::CypherValue;
