// src/schema.rs
//
// Record schema language: JSON schema text -> DataSchema tree.
//
// Supported:
//   primitives  null boolean int long float double string bytes
//   record      { "type": "record", "name", "namespace"?, "doc"?, "fields": [...] }
//   enum        { "type": "enum", "name", "namespace"?, "symbols": [...] }
//   array       { "type": "array", "items": <type> }
//   map         { "type": "map", "values": <type> }
//   references  by name to a record or enum defined earlier in the same document

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde_json::{Map as JsonMap, Value as Json};
use thiserror::Error;
use tracing::debug;

use crate::data::{DataList, DataMap, Value};

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("malformed schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{context}: missing required attribute \"{attribute}\"")]
    MissingAttribute { attribute: &'static str, context: String },

    #[error("{context}: invalid attribute \"{attribute}\": {reason}")]
    InvalidAttribute {
        attribute: &'static str,
        context: String,
        reason: String,
    },

    #[error("unknown type \"{0}\"")]
    UnknownType(String),

    #[error("invalid name \"{0}\"")]
    InvalidName(String),

    #[error("type \"{0}\" is defined more than once")]
    DuplicateName(String),

    #[error("record {record}: field \"{field}\" is defined more than once")]
    DuplicateField { record: String, field: String },

    #[error("field \"{field}\": invalid default: {reason}")]
    InvalidDefault { field: String, reason: String },

    #[error("expected a record schema, found {0}")]
    NotARecord(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    String,
    Bytes,
}

impl PrimitiveType {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "null" => PrimitiveType::Null,
            "boolean" => PrimitiveType::Boolean,
            "int" => PrimitiveType::Int,
            "long" => PrimitiveType::Long,
            "float" => PrimitiveType::Float,
            "double" => PrimitiveType::Double,
            "string" => PrimitiveType::String,
            "bytes" => PrimitiveType::Bytes,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Null => "null",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::String => "string",
            PrimitiveType::Bytes => "bytes",
        }
    }
}

/// A parsed type. Named types are shared through `Arc` so that a record
/// referenced from several places is parsed once.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSchema {
    Primitive(PrimitiveType),
    Record(Arc<RecordDataSchema>),
    Enum(Arc<EnumDataSchema>),
    Array(Box<DataSchema>),
    Map(Box<DataSchema>),
}

impl fmt::Display for DataSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSchema::Primitive(p) => f.write_str(p.name()),
            DataSchema::Record(r) => write!(f, "record {}", r.full_name()),
            DataSchema::Enum(e) => write!(f, "enum {}", e.full_name()),
            DataSchema::Array(items) => write!(f, "array<{items}>"),
            DataSchema::Map(values) => write!(f, "map<{values}>"),
        }
    }
}

impl DataSchema {
    pub fn as_record(&self) -> Option<&Arc<RecordDataSchema>> {
        match self {
            DataSchema::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Render the schema back to JSON. Named types after their first
    /// appearance are emitted as name references.
    pub fn to_json(&self) -> Json {
        let mut seen = HashSet::new();
        self.to_json_inner(&mut seen)
    }

    fn to_json_inner(&self, seen: &mut HashSet<String>) -> Json {
        match self {
            DataSchema::Primitive(p) => Json::String(p.name().to_owned()),
            DataSchema::Record(r) => {
                if !seen.insert(r.full_name()) {
                    return Json::String(r.full_name());
                }
                let mut obj = JsonMap::new();
                obj.insert("type".into(), "record".into());
                obj.insert("name".into(), r.name.clone().into());
                if let Some(ns) = &r.namespace {
                    obj.insert("namespace".into(), ns.clone().into());
                }
                if let Some(doc) = &r.doc {
                    obj.insert("doc".into(), doc.clone().into());
                }
                let fields = r
                    .fields
                    .iter()
                    .map(|field| {
                        let mut f = JsonMap::new();
                        f.insert("name".into(), field.name.clone().into());
                        f.insert("type".into(), field.schema.to_json_inner(seen));
                        if field.optional {
                            f.insert("optional".into(), true.into());
                        }
                        if let Some(default) = &field.default {
                            f.insert("default".into(), value_to_json(default));
                        }
                        if let Some(doc) = &field.doc {
                            f.insert("doc".into(), doc.clone().into());
                        }
                        Json::Object(f)
                    })
                    .collect();
                obj.insert("fields".into(), Json::Array(fields));
                Json::Object(obj)
            }
            DataSchema::Enum(e) => {
                if !seen.insert(e.full_name()) {
                    return Json::String(e.full_name());
                }
                let mut obj = JsonMap::new();
                obj.insert("type".into(), "enum".into());
                obj.insert("name".into(), e.name.clone().into());
                if let Some(ns) = &e.namespace {
                    obj.insert("namespace".into(), ns.clone().into());
                }
                obj.insert(
                    "symbols".into(),
                    Json::Array(e.symbols.iter().cloned().map(Json::String).collect()),
                );
                Json::Object(obj)
            }
            DataSchema::Array(items) => {
                let mut obj = JsonMap::new();
                obj.insert("type".into(), "array".into());
                obj.insert("items".into(), items.to_json_inner(seen));
                Json::Object(obj)
            }
            DataSchema::Map(values) => {
                let mut obj = JsonMap::new();
                obj.insert("type".into(), "map".into());
                obj.insert("values".into(), values.to_json_inner(seen));
                Json::Object(obj)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordDataSchema {
    name: String,
    namespace: Option<String>,
    doc: Option<String>,
    fields: Vec<Field>,
}

impl RecordDataSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// `namespace.name`, or just `name` without a namespace.
    pub fn full_name(&self) -> String {
        full_name(self.namespace.as_deref(), &self.name)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn to_json(&self) -> Json {
        DataSchema::Record(Arc::new(self.clone())).to_json()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    schema: DataSchema,
    optional: bool,
    default: Option<Value>,
    doc: Option<String>,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &DataSchema {
        &self.schema
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDataSchema {
    name: String,
    namespace: Option<String>,
    symbols: Vec<String>,
}

impl EnumDataSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> String {
        full_name(self.namespace.as_deref(), &self.name)
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }
}

fn full_name(namespace: Option<&str>, name: &str) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() => format!("{ns}.{name}"),
        _ => name.to_owned(),
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse one schema document.
pub fn parse_schema(text: &str) -> Result<DataSchema, SchemaError> {
    let json: Json = serde_json::from_str(text)?;
    let mut parser = SchemaParser::default();
    let schema = parser.parse_type(&json, None)?;
    debug!(schema = %schema, named_types = parser.named.len(), "parsed schema");
    Ok(schema)
}

/// Parse a document whose top-level type must be a record.
pub fn parse_record_schema(text: &str) -> Result<RecordDataSchema, SchemaError> {
    match parse_schema(text)? {
        DataSchema::Record(r) => Ok(Arc::unwrap_or_clone(r)),
        other => Err(SchemaError::NotARecord(other.to_string())),
    }
}

#[derive(Default)]
struct SchemaParser {
    named: HashMap<String, DataSchema>,
}

impl SchemaParser {
    fn parse_type(&mut self, json: &Json, namespace: Option<&str>) -> Result<DataSchema, SchemaError> {
        match json {
            Json::String(name) => self.resolve_name(name, namespace),
            Json::Object(obj) => self.parse_complex(obj, namespace),
            other => Err(SchemaError::UnknownType(other.to_string())),
        }
    }

    fn resolve_name(&self, name: &str, namespace: Option<&str>) -> Result<DataSchema, SchemaError> {
        if let Some(p) = PrimitiveType::from_name(name) {
            return Ok(DataSchema::Primitive(p));
        }
        if let Some(found) = self.named.get(name) {
            return Ok(found.clone());
        }
        if !name.contains('.') {
            if let Some(found) = self.named.get(&full_name(namespace, name)) {
                return Ok(found.clone());
            }
        }
        Err(SchemaError::UnknownType(name.to_owned()))
    }

    fn parse_complex(
        &mut self,
        obj: &JsonMap<String, Json>,
        namespace: Option<&str>,
    ) -> Result<DataSchema, SchemaError> {
        let ty = match obj.get("type") {
            Some(Json::String(t)) => t.as_str(),
            // { "type": { ... } } wraps another type definition
            Some(inner @ Json::Object(_)) => return self.parse_type(inner, namespace),
            Some(other) => {
                return Err(SchemaError::InvalidAttribute {
                    attribute: "type",
                    context: "type definition".into(),
                    reason: format!("expected a string, found {other}"),
                });
            }
            None => {
                return Err(SchemaError::MissingAttribute {
                    attribute: "type",
                    context: "type definition".into(),
                });
            }
        };

        match ty {
            "record" => self.parse_record(obj, namespace),
            "enum" => self.parse_enum(obj, namespace),
            "array" => {
                let items = obj.get("items").ok_or_else(|| SchemaError::MissingAttribute {
                    attribute: "items",
                    context: "array".into(),
                })?;
                Ok(DataSchema::Array(Box::new(self.parse_type(items, namespace)?)))
            }
            "map" => {
                let values = obj.get("values").ok_or_else(|| SchemaError::MissingAttribute {
                    attribute: "values",
                    context: "map".into(),
                })?;
                Ok(DataSchema::Map(Box::new(self.parse_type(values, namespace)?)))
            }
            other => self.resolve_name(other, namespace),
        }
    }

    fn parse_name(
        &self,
        obj: &JsonMap<String, Json>,
        kind: &str,
        namespace: Option<&str>,
    ) -> Result<(String, Option<String>), SchemaError> {
        let name = required_str(obj, "name", kind)?;
        let ns = match obj.get("namespace") {
            Some(Json::String(ns)) => Some(ns.clone()),
            Some(other) => {
                return Err(SchemaError::InvalidAttribute {
                    attribute: "namespace",
                    context: format!("{kind} {name}"),
                    reason: format!("expected a string, found {other}"),
                });
            }
            None => namespace.map(str::to_owned),
        };

        // a dotted name carries its own namespace
        let (ns, name) = match name.rsplit_once('.') {
            Some((prefix, last)) => (Some(prefix.to_owned()), last.to_owned()),
            None => (ns, name.to_owned()),
        };
        if !is_identifier(&name) {
            return Err(SchemaError::InvalidName(name));
        }
        if let Some(ns) = &ns {
            if !ns.is_empty() && !ns.split('.').all(is_identifier) {
                return Err(SchemaError::InvalidName(ns.clone()));
            }
        }
        let full = full_name(ns.as_deref(), &name);
        if PrimitiveType::from_name(&full).is_some() || self.named.contains_key(&full) {
            return Err(SchemaError::DuplicateName(full));
        }
        Ok((name, ns))
    }

    fn parse_record(
        &mut self,
        obj: &JsonMap<String, Json>,
        namespace: Option<&str>,
    ) -> Result<DataSchema, SchemaError> {
        let (name, ns) = self.parse_name(obj, "record", namespace)?;
        let full = full_name(ns.as_deref(), &name);
        let doc = optional_str(obj, "doc", &full)?;

        let raw_fields = match obj.get("fields") {
            Some(Json::Array(a)) => a,
            Some(other) => {
                return Err(SchemaError::InvalidAttribute {
                    attribute: "fields",
                    context: format!("record {full}"),
                    reason: format!("expected an array, found {other}"),
                });
            }
            None => {
                return Err(SchemaError::MissingAttribute {
                    attribute: "fields",
                    context: format!("record {full}"),
                });
            }
        };

        let mut fields: Vec<Field> = Vec::with_capacity(raw_fields.len());
        for raw in raw_fields {
            let field_obj = raw.as_object().ok_or_else(|| SchemaError::InvalidAttribute {
                attribute: "fields",
                context: format!("record {full}"),
                reason: format!("expected a field object, found {raw}"),
            })?;
            let field_name = required_str(field_obj, "name", &format!("field of record {full}"))?;
            if !is_identifier(field_name) {
                return Err(SchemaError::InvalidName(field_name.to_owned()));
            }
            if fields.iter().any(|f| f.name == field_name) {
                return Err(SchemaError::DuplicateField {
                    record: full.clone(),
                    field: field_name.to_owned(),
                });
            }

            let context = format!("field {full}.{field_name}");
            let ty = field_obj.get("type").ok_or_else(|| SchemaError::MissingAttribute {
                attribute: "type",
                context: context.clone(),
            })?;
            let schema = self.parse_type(ty, ns.as_deref())?;

            let optional = match field_obj.get("optional") {
                Some(Json::Bool(b)) => *b,
                Some(other) => {
                    return Err(SchemaError::InvalidAttribute {
                        attribute: "optional",
                        context,
                        reason: format!("expected a boolean, found {other}"),
                    });
                }
                None => false,
            };
            let default = field_obj
                .get("default")
                .map(|d| {
                    default_value(d, &schema).map_err(|reason| SchemaError::InvalidDefault {
                        field: field_name.to_owned(),
                        reason,
                    })
                })
                .transpose()?;
            let doc = optional_str(field_obj, "doc", &context)?;

            fields.push(Field {
                name: field_name.to_owned(),
                schema,
                optional,
                default,
                doc,
            });
        }

        let record = DataSchema::Record(Arc::new(RecordDataSchema {
            name,
            namespace: ns,
            doc,
            fields,
        }));
        // Registered after its fields: a record cannot refer to itself.
        if self.named.insert(full.clone(), record.clone()).is_some() {
            return Err(SchemaError::DuplicateName(full));
        }
        Ok(record)
    }

    fn parse_enum(
        &mut self,
        obj: &JsonMap<String, Json>,
        namespace: Option<&str>,
    ) -> Result<DataSchema, SchemaError> {
        let (name, ns) = self.parse_name(obj, "enum", namespace)?;
        let full = full_name(ns.as_deref(), &name);
        let context = format!("enum {full}");

        let raw = match obj.get("symbols") {
            Some(Json::Array(a)) => a,
            Some(other) => {
                return Err(SchemaError::InvalidAttribute {
                    attribute: "symbols",
                    context,
                    reason: format!("expected an array, found {other}"),
                });
            }
            None => {
                return Err(SchemaError::MissingAttribute {
                    attribute: "symbols",
                    context,
                });
            }
        };

        let mut symbols: Vec<String> = Vec::with_capacity(raw.len());
        for s in raw {
            let symbol = s.as_str().filter(|s| is_identifier(s)).ok_or_else(|| {
                SchemaError::InvalidAttribute {
                    attribute: "symbols",
                    context: context.clone(),
                    reason: format!("invalid symbol {s}"),
                }
            })?;
            if symbols.iter().any(|existing| existing == symbol) {
                return Err(SchemaError::InvalidAttribute {
                    attribute: "symbols",
                    context: context.clone(),
                    reason: format!("duplicate symbol {symbol}"),
                });
            }
            symbols.push(symbol.to_owned());
        }

        let schema = DataSchema::Enum(Arc::new(EnumDataSchema {
            name,
            namespace: ns,
            symbols,
        }));
        self.named.insert(full, schema.clone());
        Ok(schema)
    }
}

fn required_str<'a>(
    obj: &'a JsonMap<String, Json>,
    attribute: &'static str,
    context: &str,
) -> Result<&'a str, SchemaError> {
    match obj.get(attribute) {
        Some(Json::String(s)) => Ok(s),
        Some(other) => Err(SchemaError::InvalidAttribute {
            attribute,
            context: context.to_owned(),
            reason: format!("expected a string, found {other}"),
        }),
        None => Err(SchemaError::MissingAttribute {
            attribute,
            context: context.to_owned(),
        }),
    }
}

fn optional_str(
    obj: &JsonMap<String, Json>,
    attribute: &'static str,
    context: &str,
) -> Result<Option<String>, SchemaError> {
    match obj.get(attribute) {
        None => Ok(None),
        Some(Json::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(SchemaError::InvalidAttribute {
            attribute,
            context: context.to_owned(),
            reason: format!("expected a string, found {other}"),
        }),
    }
}

/// Convert a JSON default into a `Value` of the field's type.
fn default_value(json: &Json, schema: &DataSchema) -> Result<Value, String> {
    let mismatch = || format!("{json} is not a valid {schema}");
    match schema {
        DataSchema::Primitive(p) => match p {
            PrimitiveType::Null => json.is_null().then_some(Value::Null).ok_or_else(mismatch),
            PrimitiveType::Boolean => json.as_bool().map(Value::Boolean).ok_or_else(mismatch),
            PrimitiveType::Int => json
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .map(Value::Int)
                .ok_or_else(mismatch),
            PrimitiveType::Long => json.as_i64().map(Value::Long).ok_or_else(mismatch),
            PrimitiveType::Float => json.as_f64().map(|v| Value::Float(v as f32)).ok_or_else(mismatch),
            PrimitiveType::Double => json.as_f64().map(Value::Double).ok_or_else(mismatch),
            PrimitiveType::String => json
                .as_str()
                .map(|s| Value::String(s.to_owned()))
                .ok_or_else(mismatch),
            PrimitiveType::Bytes => json
                .as_str()
                .and_then(crate::codec::bytes_from_str)
                .map(Value::Bytes)
                .ok_or_else(mismatch),
        },
        DataSchema::Enum(e) => json
            .as_str()
            .filter(|s| e.contains(s))
            .map(|s| Value::String(s.to_owned()))
            .ok_or_else(mismatch),
        DataSchema::Array(items) => {
            let arr = json.as_array().ok_or_else(mismatch)?;
            arr.iter()
                .map(|item| default_value(item, items))
                .collect::<Result<DataList, _>>()
                .map(Value::List)
        }
        DataSchema::Map(values) => {
            let obj = json.as_object().ok_or_else(mismatch)?;
            obj.iter()
                .map(|(k, v)| default_value(v, values).map(|v| (k.clone(), v)))
                .collect::<Result<DataMap, _>>()
                .map(Value::Map)
        }
        DataSchema::Record(r) => {
            let obj = json.as_object().ok_or_else(mismatch)?;
            let mut map = DataMap::new();
            for field in r.fields() {
                match (obj.get(field.name()), field.default()) {
                    (Some(v), _) => {
                        map.insert(field.name(), default_value(v, field.schema())?);
                    }
                    (None, Some(d)) => {
                        map.insert(field.name(), d.clone());
                    }
                    (None, None) if field.is_optional() => {}
                    (None, None) => {
                        return Err(format!("missing required field \"{}\"", field.name()));
                    }
                }
            }
            Ok(Value::Map(map))
        }
    }
}

fn value_to_json(value: &Value) -> Json {
    crate::codec::value_to_json(value).unwrap_or(Json::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BAR_SCHEMA_JSON, FOO_SCHEMA_JSON};

    #[test]
    fn parses_bar() {
        let bar = parse_record_schema(BAR_SCHEMA_JSON).unwrap();
        assert_eq!(bar.name(), "Bar");
        assert_eq!(bar.fields().len(), 1);
        let field = bar.field("int").unwrap();
        assert_eq!(field.schema(), &DataSchema::Primitive(PrimitiveType::Int));
        assert!(!field.is_optional());
        assert!(field.default().is_none());
    }

    #[test]
    fn parses_nested_foo() {
        let foo = parse_record_schema(FOO_SCHEMA_JSON).unwrap();
        let inner = foo.field("record").unwrap().schema().as_record().unwrap();
        assert_eq!(inner.full_name(), "Bar");
        assert!(inner.field("int").is_some());
        assert!(foo.field("int").is_none());
    }

    #[test]
    fn named_reference_and_namespace() {
        let text = r#"{ "type": "record", "name": "Pair", "namespace": "com.example", "doc": "two points", "fields": [
            { "name": "left", "doc": "first", "type": { "type": "record", "name": "Point", "fields": [
                { "name": "x", "type": "long", "default": 0 } ] } },
            { "name": "right", "type": "Point" },
            { "name": "color", "type": { "type": "enum", "name": "Color", "symbols": ["RED", "GREEN"] },
              "default": "RED" },
            { "name": "tags", "type": { "type": "array", "items": "string" }, "optional": true },
            { "name": "weights", "type": { "type": "map", "values": "double" }, "default": { "a": 1.5 } }
        ] }"#;
        let pair = parse_record_schema(text).unwrap();
        assert_eq!(pair.full_name(), "com.example.Pair");
        assert_eq!(pair.namespace(), Some("com.example"));
        assert_eq!(pair.doc(), Some("two points"));
        assert_eq!(pair.field("left").unwrap().doc(), Some("first"));
        assert_eq!(pair.field("right").unwrap().doc(), None);

        let left = pair.field("left").unwrap().schema();
        let right = pair.field("right").unwrap().schema();
        assert_eq!(left, right);
        assert_eq!(left.as_record().unwrap().full_name(), "com.example.Point");

        let color = pair.field("color").unwrap();
        assert_eq!(color.default(), Some(&Value::String("RED".into())));
        match color.schema() {
            DataSchema::Enum(e) => assert_eq!(e.symbols(), ["RED", "GREEN"]),
            other => panic!("expected enum, got {other}"),
        }
        assert!(pair.field("tags").unwrap().is_optional());

        let mut expected = DataMap::new();
        expected.insert("a", 1.5f64);
        assert_eq!(pair.field("weights").unwrap().default(), Some(&Value::Map(expected)));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(parse_schema("{ \"type\": "), Err(SchemaError::Json(_))));
    }

    #[test]
    fn rejects_unknown_type() {
        let err = parse_schema(r#"{ "type": "record", "name": "A", "fields": [ { "name": "f", "type": "Nope" } ] }"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownType(ref t) if t == "Nope"));
    }

    #[test]
    fn rejects_self_reference() {
        let err = parse_schema(r#"{ "type": "record", "name": "Node", "fields": [ { "name": "next", "type": "Node" } ] }"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownType(_)));
    }

    #[test]
    fn rejects_duplicate_field_and_name() {
        let err = parse_schema(
            r#"{ "type": "record", "name": "A", "fields": [ { "name": "f", "type": "int" }, { "name": "f", "type": "long" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { .. }));

        let err = parse_schema(
            r#"{ "type": "record", "name": "A", "fields": [
                { "name": "f", "type": { "type": "record", "name": "B", "fields": [] } },
                { "name": "g", "type": { "type": "record", "name": "B", "fields": [] } } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateName(ref n) if n == "B"));
    }

    #[test]
    fn rejects_bad_default() {
        let err = parse_schema(
            r#"{ "type": "record", "name": "A", "fields": [ { "name": "f", "type": "int", "default": "x" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDefault { ref field, .. } if field == "f"));

        let err = parse_schema(
            r#"{ "type": "record", "name": "A", "fields": [ { "name": "f", "type": "int", "default": 3000000000 } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDefault { .. }));
    }

    #[test]
    fn rejects_missing_attributes() {
        assert!(matches!(
            parse_schema(r#"{ "type": "record", "name": "A" }"#),
            Err(SchemaError::MissingAttribute { attribute: "fields", .. })
        ));
        assert!(matches!(
            parse_schema(r#"{ "type": "array" }"#),
            Err(SchemaError::MissingAttribute { attribute: "items", .. })
        ));
        assert!(matches!(
            parse_schema(r#"{ "type": "enum", "name": "E", "symbols": ["A", "A"] }"#),
            Err(SchemaError::InvalidAttribute { attribute: "symbols", .. })
        ));
    }

    #[test]
    fn not_a_record() {
        let err = parse_record_schema(r#""int""#).unwrap_err();
        assert!(matches!(err, SchemaError::NotARecord(ref t) if t == "int"));
    }

    #[test]
    fn to_json_references_repeated_types() {
        let text = r#"{ "type": "record", "name": "P", "fields": [
            { "name": "a", "type": { "type": "record", "name": "Q", "fields": [] } },
            { "name": "b", "type": "Q" } ] }"#;
        let json = parse_schema(text).unwrap().to_json();
        assert_eq!(json["fields"][0]["type"]["type"], "record");
        assert_eq!(json["fields"][1]["type"], "Q");

        // rendered output parses back to the same schema
        let again = parse_schema(&json.to_string()).unwrap();
        assert_eq!(again, parse_schema(text).unwrap());
    }
}
