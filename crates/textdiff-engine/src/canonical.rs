//! Order-insensitive JSON rendering.
//!
//! Every object key found anywhere in the document (plus every array index
//! in string form) is collected into one global list sorted by UTF-16 code
//! units, so `"1" < "10" < "2"`. Each object's entries are emitted in the
//! order of that list; arrays keep their natural order. Output uses two-space
//! indentation and never ends with a line terminator.
//!
//! Keys are plain map entries: a key such as `"__proto__"` is ordinary data
//! and is preserved like any other.
//!
//! Nesting depth is unbounded. Parsing and rendering grow the stack on
//! demand, and everything else walks the document with an explicit stack.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};
use textdiff_types::Side;

use crate::error::{CompareError, CompareResult};

/// Magnitude below which integral floats are printed without a fraction.
const INTEGRAL_FLOAT_LIMIT: f64 = 1e21;

/// Remaining stack below which rendering moves to a fresh segment.
const STACK_RED_ZONE: usize = 64 * 1024;
/// Size of each stack segment allocated while rendering.
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Render `value` in canonical form.
pub fn canonicalize(value: &Value) -> String {
    let order = KeyOrder::collect(value);
    let canonical = Canonical {
        value,
        order: &order,
    };
    match serde_json::to_string_pretty(&canonical) {
        Ok(text) => text,
        Err(err) => {
            // Unreachable for values produced by serde_json itself.
            tracing::warn!(error = %err, "canonical rendering failed; using compact form");
            value.to_string()
        }
    }
}

/// Parse `text` as JSON and render it in canonical form.
pub fn canonicalize_str(text: &str, side: Side) -> CompareResult<String> {
    let value = parse(text).map_err(|e| CompareError::JsonParse {
        side,
        message: e.to_string(),
    })?;
    let text = canonicalize(&value);
    dismantle(value);
    Ok(text)
}

fn parse(text: &str) -> serde_json::Result<Value> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// Drop a value without recursing once per nesting level.
fn dismantle(value: Value) {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            Value::Array(items) => pending.extend(items),
            Value::Object(map) => pending.extend(map.into_iter().map(|(_, item)| item)),
            _ => {}
        }
    }
}

/// Compare two keys by UTF-16 code units.
fn utf16_cmp(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

/// Global key order shared by every object in one document.
struct KeyOrder {
    rank: HashMap<String, usize>,
}

impl KeyOrder {
    fn collect(value: &Value) -> Self {
        let mut keys = HashSet::new();
        gather_keys(value, &mut keys);
        let mut keys: Vec<String> = keys.into_iter().collect();
        keys.sort_by(|a, b| utf16_cmp(a, b));
        let rank = keys
            .into_iter()
            .enumerate()
            .map(|(i, key)| (key, i))
            .collect();
        Self { rank }
    }

    fn rank(&self, key: &str) -> usize {
        self.rank.get(key).copied().unwrap_or(usize::MAX)
    }
}

fn gather_keys(value: &Value, keys: &mut HashSet<String>) {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    keys.insert(index.to_string());
                    pending.push(item);
                }
            }
            Value::Object(map) => {
                for (key, item) in map {
                    keys.insert(key.clone());
                    pending.push(item);
                }
            }
            _ => {}
        }
    }
}

struct Canonical<'a> {
    value: &'a Value,
    order: &'a KeyOrder,
}

impl<'a> Canonical<'a> {
    fn child(&self, value: &'a Value) -> Self {
        Self {
            value,
            order: self.order,
        }
    }
}

impl Serialize for Canonical<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_SEGMENT, move || match self.value {
            Value::Number(number) => serialize_number(number, serializer),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&self.child(item))?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                entries.sort_by_key(|(key, _)| self.order.rank(key));
                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (key, item) in entries {
                    out.serialize_entry(key, &self.child(item))?;
                }
                out.end()
            }
            other => other.serialize(serializer),
        })
    }
}

/// Integral floats below 1e21 print as integers so `1.0` and `1`
/// canonicalize alike.
fn serialize_number<S: Serializer>(number: &Number, serializer: S) -> Result<S::Ok, S::Error> {
    if let Some(value) = number.as_f64().filter(|_| number.is_f64()) {
        if value.fract() == 0.0 && value.abs() < INTEGRAL_FLOAT_LIMIT {
            // Exact: every integral f64 below 1e21 fits in an i128.
            return serializer.serialize_i128(value as i128);
        }
    }
    number.serialize(serializer)
}
