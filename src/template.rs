// src/template.rs
//
// Typed get/set delegation over a schema-described DataMap.
//
// A record type implements the four accessor hooks of `RecordTemplate`;
// the provided methods do field lookup, mode handling and type checks.

use thiserror::Error;

use crate::data::{DataMap, Value, ValueKind};
use crate::schema::{DataSchema, Field, PrimitiveType, RecordDataSchema};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("field \"{field}\" is not defined by record {record}")]
    UnknownField { record: String, field: String },

    #[error("required field \"{field}\" of record {record} is not present")]
    RequiredFieldNotPresent { record: String, field: String },

    #[error("cannot set field \"{field}\" of record {record} to null")]
    NullNotAllowed { record: String, field: String },

    #[error("field \"{field}\" of record {record}: expected {expected}, found {found}")]
    TypeMismatch {
        record: String,
        field: String,
        expected: String,
        found: String,
    },
}

/// How a getter treats a field that is absent from the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GetMode {
    /// Absent -> `None`.
    Null,
    /// Absent -> the field's default, or `None` without one.
    #[default]
    Default,
    /// Like `Default`, but an absent required field with no default is an error.
    Strict,
}

/// How a setter treats `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SetMode {
    /// `None` leaves the field unchanged.
    IgnoreNull,
    /// `None` removes the field.
    RemoveIfNull,
    /// `None` removes an optional field; on a required field it is an error.
    RemoveOptionalIfNull,
    /// `None` is always an error.
    #[default]
    DisallowNull,
}

/// Rust types that can be stored directly in a field.
pub trait DirectValue: Sized {
    /// Read from a stored value, widening where lossless.
    fn from_value(value: &Value) -> Option<Self>;
    fn into_value(self) -> Value;
    fn expected() -> ValueKind;
}

macro_rules! direct_value {
    ($ty:ty, $kind:ident, $($pat:pat => $out:expr),+ $(,)?) => {
        impl DirectValue for $ty {
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    $($pat => Some($out),)+
                    _ => None,
                }
            }

            fn into_value(self) -> Value {
                Value::from(self)
            }

            fn expected() -> ValueKind {
                ValueKind::$kind
            }
        }
    };
}

direct_value!(bool, Boolean, Value::Boolean(b) => *b);
direct_value!(i32, Int, Value::Int(i) => *i);
direct_value!(i64, Long, Value::Long(l) => *l, Value::Int(i) => i64::from(*i));
direct_value!(f32, Float, Value::Float(f) => *f);
direct_value!(f64, Double, Value::Double(d) => *d, Value::Float(f) => f64::from(*f));
direct_value!(String, String, Value::String(s) => s.clone());
direct_value!(Vec<u8>, Bytes, Value::Bytes(b) => b.clone());

/// Whether `value` may be stored in a field of type `schema`.
pub(crate) fn accepts(schema: &DataSchema, value: &Value) -> bool {
    match (schema, value) {
        (DataSchema::Primitive(p), v) => matches!(
            (p, v),
            (PrimitiveType::Null, Value::Null)
                | (PrimitiveType::Boolean, Value::Boolean(_))
                | (PrimitiveType::Int, Value::Int(_))
                | (PrimitiveType::Long, Value::Long(_))
                | (PrimitiveType::Float, Value::Float(_))
                | (PrimitiveType::Double, Value::Double(_))
                | (PrimitiveType::String, Value::String(_))
                | (PrimitiveType::Bytes, Value::Bytes(_))
        ),
        (DataSchema::Enum(e), Value::String(s)) => e.contains(s),
        (DataSchema::Record(_), Value::Map(_)) => true,
        (DataSchema::Array(_), Value::List(_)) => true,
        (DataSchema::Map(_), Value::Map(_)) => true,
        _ => false,
    }
}

/// A record whose storage is a [`DataMap`] described by a static schema.
pub trait RecordTemplate: Sized {
    fn schema() -> &'static RecordDataSchema;
    fn from_data(data: DataMap) -> Self;
    fn data(&self) -> &DataMap;
    fn data_mut(&mut self) -> &mut DataMap;
    fn into_data(self) -> DataMap;

    fn schema_field(name: &str) -> Result<&'static Field, TemplateError> {
        let schema = Self::schema();
        schema.field(name).ok_or_else(|| TemplateError::UnknownField {
            record: schema.full_name(),
            field: name.to_owned(),
        })
    }

    fn contains(&self, field: &str) -> bool {
        self.data().contains_key(field)
    }

    fn remove(&mut self, field: &str) -> Result<Option<Value>, TemplateError> {
        let f = Self::schema_field(field)?;
        Ok(self.data_mut().remove(f.name()))
    }

    /// Raw access honoring `mode`; shared by the typed getters.
    fn obtain_value(&self, field: &str, mode: GetMode) -> Result<Option<&Value>, TemplateError> {
        let f = Self::schema_field(field)?;
        if let Some(v) = self.data().get(f.name()) {
            return Ok(Some(v));
        }
        match mode {
            GetMode::Null => Ok(None),
            GetMode::Default => Ok(f.default()),
            GetMode::Strict => match f.default() {
                Some(d) => Ok(Some(d)),
                None if f.is_optional() => Ok(None),
                None => Err(TemplateError::RequiredFieldNotPresent {
                    record: Self::schema().full_name(),
                    field: f.name().to_owned(),
                }),
            },
        }
    }

    fn obtain_direct<T: DirectValue>(&self, field: &str, mode: GetMode) -> Result<Option<T>, TemplateError> {
        let Some(value) = self.obtain_value(field, mode)? else {
            return Ok(None);
        };
        T::from_value(value).map(Some).ok_or_else(|| TemplateError::TypeMismatch {
            record: Self::schema().full_name(),
            field: field.to_owned(),
            expected: T::expected().to_string(),
            found: value.kind().to_string(),
        })
    }

    fn obtain_wrapped<T: RecordTemplate>(&self, field: &str, mode: GetMode) -> Result<Option<T>, TemplateError> {
        let Some(value) = self.obtain_value(field, mode)? else {
            return Ok(None);
        };
        match value {
            Value::Map(m) => Ok(Some(T::from_data(m.clone()))),
            other => Err(TemplateError::TypeMismatch {
                record: Self::schema().full_name(),
                field: field.to_owned(),
                expected: format!("record {}", T::schema().full_name()),
                found: other.kind().to_string(),
            }),
        }
    }

    /// Apply `mode` to a `None` write.
    fn put_null(&mut self, f: &Field, mode: SetMode) -> Result<(), TemplateError> {
        let null_error = || TemplateError::NullNotAllowed {
            record: Self::schema().full_name(),
            field: f.name().to_owned(),
        };
        match mode {
            SetMode::IgnoreNull => Ok(()),
            SetMode::RemoveIfNull => {
                self.data_mut().remove(f.name());
                Ok(())
            }
            SetMode::RemoveOptionalIfNull if f.is_optional() => {
                self.data_mut().remove(f.name());
                Ok(())
            }
            SetMode::RemoveOptionalIfNull | SetMode::DisallowNull => Err(null_error()),
        }
    }

    fn put_direct<T: DirectValue>(
        &mut self,
        field: &str,
        value: Option<T>,
        mode: SetMode,
    ) -> Result<&mut Self, TemplateError> {
        let f = Self::schema_field(field)?;
        let Some(value) = value else {
            self.put_null(f, mode)?;
            return Ok(self);
        };
        let value = value.into_value();
        if !accepts(f.schema(), &value) {
            return Err(TemplateError::TypeMismatch {
                record: Self::schema().full_name(),
                field: f.name().to_owned(),
                expected: f.schema().to_string(),
                found: value.kind().to_string(),
            });
        }
        self.data_mut().insert(f.name(), value);
        Ok(self)
    }

    fn put_wrapped<T: RecordTemplate>(
        &mut self,
        field: &str,
        value: Option<T>,
        mode: SetMode,
    ) -> Result<&mut Self, TemplateError> {
        let f = Self::schema_field(field)?;
        let Some(value) = value else {
            self.put_null(f, mode)?;
            return Ok(self);
        };
        let compatible = f
            .schema()
            .as_record()
            .is_some_and(|r| r.full_name() == T::schema().full_name());
        if !compatible {
            return Err(TemplateError::TypeMismatch {
                record: Self::schema().full_name(),
                field: f.name().to_owned(),
                expected: f.schema().to_string(),
                found: format!("record {}", T::schema().full_name()),
            });
        }
        self.data_mut().insert(f.name(), value.into_data());
        Ok(self)
    }
}
