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

//! Parameter and literal values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::escape::{escape_identifier, quote_string};
use crate::error::Result;

/// A value bound to a query parameter or rendered into a map literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CypherValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
    /// List value.
    List(Vec<CypherValue>),
    /// Map value, in insertion order.
    Map(IndexMap<String, CypherValue>),
}

impl From<bool> for CypherValue {
    fn from(v: bool) -> Self {
        CypherValue::Bool(v)
    }
}

impl From<i64> for CypherValue {
    fn from(v: i64) -> Self {
        CypherValue::Int(v)
    }
}

impl From<i32> for CypherValue {
    fn from(v: i32) -> Self {
        CypherValue::Int(v as i64)
    }
}

impl From<u32> for CypherValue {
    fn from(v: u32) -> Self {
        CypherValue::Int(v as i64)
    }
}

impl From<f64> for CypherValue {
    fn from(v: f64) -> Self {
        CypherValue::Float(v)
    }
}

impl From<String> for CypherValue {
    fn from(v: String) -> Self {
        CypherValue::String(v)
    }
}

impl From<&str> for CypherValue {
    fn from(v: &str) -> Self {
        CypherValue::String(v.to_string())
    }
}

impl<T: Into<CypherValue>> From<Vec<T>> for CypherValue {
    fn from(v: Vec<T>) -> Self {
        CypherValue::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<CypherValue>> From<Option<T>> for CypherValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CypherValue::Null, Into::into)
    }
}

impl From<serde_json::Value> for CypherValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => CypherValue::Null,
            serde_json::Value::Bool(b) => CypherValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => CypherValue::Int(i),
                // u64 beyond i64::MAX and real floats both land here
                None => CypherValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => CypherValue::String(s),
            serde_json::Value::Array(items) => {
                CypherValue::List(items.into_iter().map(CypherValue::from).collect())
            }
            serde_json::Value::Object(map) => CypherValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, CypherValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl CypherValue {
    /// Convert any serializable value, e.g. a struct bound as a parameter.
    ///
    /// ```
    /// # use cypher_fluent::CypherValue;
    /// #[derive(serde::Serialize)]
    /// struct Point { x: i32, y: i32 }
    ///
    /// let value = CypherValue::from_serializable(&Point { x: 1, y: 2 }).unwrap();
    /// assert_eq!(value.to_cypher_literal(), "{x: 1, y: 2}");
    /// ```
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(serde_json::to_value(value)?.into())
    }

    /// Convert to Cypher literal syntax.
    pub fn to_cypher_literal(&self) -> String {
        match self {
            CypherValue::Null => "null".to_string(),
            CypherValue::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            CypherValue::Int(i) => i.to_string(),
            CypherValue::Float(f) => {
                if f.is_nan() {
                    "0.0/0.0".to_string()
                } else if f.is_infinite() {
                    if *f > 0.0 {
                        "1.0/0.0".to_string()
                    } else {
                        "-1.0/0.0".to_string()
                    }
                } else {
                    let s = f.to_string();
                    if s.contains('.') || s.contains('e') || s.contains('E') {
                        s
                    } else {
                        format!("{}.0", s)
                    }
                }
            }
            CypherValue::String(s) => quote_string(s),
            CypherValue::List(items) => {
                let inner: Vec<String> = items.iter().map(|v| v.to_cypher_literal()).collect();
                format!("[{}]", inner.join(", "))
            }
            CypherValue::Map(map) => {
                let pairs: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{}: {}", escape_identifier(k), v.to_cypher_literal()))
                    .collect();
                format!("{{{}}}", pairs.join(", "))
            }
        }
    }

    /// Drop null-valued map entries, recursing into nested maps and lists.
    ///
    /// Null list elements are kept; removing them would shift positions.
    pub fn without_null_properties(self) -> Self {
        match self {
            CypherValue::Map(map) => CypherValue::Map(
                map.into_iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k, v.without_null_properties()))
                    .collect(),
            ),
            CypherValue::List(items) => CypherValue::List(
                items
                    .into_iter()
                    .map(CypherValue::without_null_properties)
                    .collect(),
            ),
            other => other,
        }
    }

    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, CypherValue::Null)
    }

    /// Try to get as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CypherValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CypherValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as a map.
    pub fn as_map(&self) -> Option<&IndexMap<String, CypherValue>> {
        match self {
            CypherValue::Map(map) => Some(map),
            _ => None,
        }
    }
}
