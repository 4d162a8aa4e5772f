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

//! Direct references to nodes and relationships by server id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A node identified by its server-assigned id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeReference(u64);

impl NodeReference {
    /// Reference the node with `id`.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The node id.
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeReference {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A relationship identified by its server-assigned id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipReference(u64);

impl RelationshipReference {
    /// Reference the relationship with `id`.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The relationship id.
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl From<u64> for RelationshipReference {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RelationshipReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
