// src/codec.rs
//
// DataMap <-> JSON text

use serde_json::{Map as JsonMap, Number, Value as Json};
use thiserror::Error;

use crate::data::{DataList, DataMap, Value};

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("top-level JSON value must be an object, found {0}")]
    NotAnObject(&'static str),

    #[error("cannot encode non-finite number {0}")]
    NonFinite(f64),
}

/// Encode bytes as a string with one char per byte (code points 0-255).
pub fn bytes_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Inverse of [`bytes_to_string`]; `None` if any char is above U+00FF.
pub fn bytes_from_str(s: &str) -> Option<Vec<u8>> {
    s.chars().map(|c| u8::try_from(c).ok()).collect()
}

pub fn value_to_json(value: &Value) -> Result<Json, CodecError> {
    Ok(match value {
        Value::Null => Json::Null,
        Value::Boolean(b) => Json::Bool(*b),
        Value::Int(i) => Json::from(*i),
        Value::Long(l) => Json::from(*l),
        Value::Float(f) => finite(*f as f64)?,
        Value::Double(d) => finite(*d)?,
        Value::String(s) => Json::String(s.clone()),
        Value::Bytes(b) => Json::String(bytes_to_string(b)),
        Value::Map(m) => map_to_json(m)?,
        Value::List(l) => Json::Array(l.iter().map(value_to_json).collect::<Result<_, _>>()?),
    })
}

fn finite(v: f64) -> Result<Json, CodecError> {
    Number::from_f64(v).map(Json::Number).ok_or(CodecError::NonFinite(v))
}

fn map_to_json(map: &DataMap) -> Result<Json, CodecError> {
    let mut obj = JsonMap::new();
    for (k, v) in map.iter() {
        obj.insert(k.to_owned(), value_to_json(v)?);
    }
    Ok(Json::Object(obj))
}

/// Schema-less decode: integers become `Int` when they fit, else `Long`;
/// everything else numeric is `Double`. Strings stay strings.
pub fn value_from_json(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Boolean(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => i32::try_from(i).map(Value::Int).unwrap_or(Value::Long(i)),
            None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => Value::String(s.clone()),
        Json::Array(a) => Value::List(a.iter().map(value_from_json).collect::<DataList>()),
        Json::Object(o) => Value::Map(
            o.iter()
                .map(|(k, v)| (k.clone(), value_from_json(v)))
                .collect(),
        ),
    }
}

pub fn to_json(map: &DataMap) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&map_to_json(map)?)?)
}

pub fn to_json_pretty(map: &DataMap) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(&map_to_json(map)?)?)
}

pub fn from_json(text: &str) -> Result<DataMap, CodecError> {
    let json: Json = serde_json::from_str(text)?;
    match value_from_json(&json) {
        Value::Map(m) => Ok(m),
        _ => Err(CodecError::NotAnObject(json_kind(&json))),
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
