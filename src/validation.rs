// src/validation.rs
//
// Check a DataMap against a RecordDataSchema and collect every problem found.
//
// Numeric values are accepted when they widen losslessly into the declared
// type (an int is a valid long), since schema-less decoding of JSON picks the
// narrowest integer type.

use std::fmt;

use crate::data::{DataMap, Value};
use crate::schema::{DataSchema, PrimitiveType, RecordDataSchema};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnrecognizedFieldMode {
    /// Fields not named by the schema are allowed.
    #[default]
    Ignore,
    /// Fields not named by the schema are reported.
    Disallow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    pub unrecognized_fields: UnrecognizedFieldMode,
}

impl ValidationOptions {
    pub fn strict() -> Self {
        Self {
            unrecognized_fields: UnrecognizedFieldMode::Disallow,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationMessage {
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{path} :: {}", self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    messages: Vec<ValidationMessage>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[ValidationMessage] {
        &self.messages
    }

    fn report(&mut self, path: &str, message: impl Into<String>) {
        self.messages.push(ValidationMessage {
            path: path.to_owned(),
            message: message.into(),
        });
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.messages.is_empty() {
            return f.write_str("valid");
        }
        for (i, m) in self.messages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{m}")?;
        }
        Ok(())
    }
}

pub fn validate(data: &DataMap, schema: &RecordDataSchema) -> ValidationResult {
    validate_with(data, schema, &ValidationOptions::default())
}

pub fn validate_with(
    data: &DataMap,
    schema: &RecordDataSchema,
    options: &ValidationOptions,
) -> ValidationResult {
    let mut result = ValidationResult::default();
    validate_record(data, schema, "", options, &mut result);
    result
}

fn validate_record(
    data: &DataMap,
    schema: &RecordDataSchema,
    path: &str,
    options: &ValidationOptions,
    out: &mut ValidationResult,
) {
    for field in schema.fields() {
        let field_path = format!("{path}/{}", field.name());
        match data.get(field.name()) {
            Some(value) => validate_value(value, field.schema(), &field_path, options, out),
            None if field.is_optional() || field.default().is_some() => {}
            None => out.report(&field_path, "field is required but not found and has no default value"),
        }
    }

    if options.unrecognized_fields == UnrecognizedFieldMode::Disallow {
        for key in data.keys().filter(|k| schema.field(k).is_none()) {
            out.report(
                &format!("{path}/{key}"),
                format!("field is not defined by record {}", schema.full_name()),
            );
        }
    }
}

fn validate_value(
    value: &Value,
    schema: &DataSchema,
    path: &str,
    options: &ValidationOptions,
    out: &mut ValidationResult,
) {
    match (schema, value) {
        (DataSchema::Primitive(p), v) => {
            if !primitive_accepts(*p, v) {
                out.report(path, format!("{} is not backed by a {}", v.kind(), p.name()));
            }
        }
        (DataSchema::Enum(e), Value::String(s)) => {
            if !e.contains(s) {
                out.report(path, format!("\"{s}\" is not an enum symbol of {}", e.full_name()));
            }
        }
        (DataSchema::Record(r), Value::Map(m)) => validate_record(m, r, path, options, out),
        (DataSchema::Array(items), Value::List(list)) => {
            for (i, item) in list.iter().enumerate() {
                validate_value(item, items, &format!("{path}/{i}"), options, out);
            }
        }
        (DataSchema::Map(values), Value::Map(m)) => {
            for (k, v) in m.iter() {
                validate_value(v, values, &format!("{path}/{k}"), options, out);
            }
        }
        (expected, v) => out.report(path, format!("{} is not backed by a {expected}", v.kind())),
    }
}

fn primitive_accepts(p: PrimitiveType, v: &Value) -> bool {
    match p {
        PrimitiveType::Null => matches!(v, Value::Null),
        PrimitiveType::Boolean => matches!(v, Value::Boolean(_)),
        PrimitiveType::Int => matches!(v, Value::Int(_)),
        PrimitiveType::Long => matches!(v, Value::Int(_) | Value::Long(_)),
        PrimitiveType::Float | PrimitiveType::Double => matches!(
            v,
            Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Double(_)
        ),
        PrimitiveType::String => matches!(v, Value::String(_)),
        PrimitiveType::Bytes => match v {
            Value::Bytes(_) => true,
            Value::String(s) => crate::codec::bytes_from_str(s).is_some(),
            _ => false,
        },
    }
}
