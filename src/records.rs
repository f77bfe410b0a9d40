// src/records.rs
//
// The two records built on every benchmark iteration: `Foo` owns one `Bar`,
// `Bar` holds one int.

use once_cell::sync::Lazy;

use crate::constants::{BAR_SCHEMA_JSON, FOO_SCHEMA_JSON};
use crate::data::DataMap;
use crate::schema::{RecordDataSchema, parse_record_schema};
use crate::template::{GetMode, RecordTemplate, SetMode, TemplateError};

// Schema text is a compile-time constant, so a parse failure is a build defect
// and surfaces on first use.
static FOO_SCHEMA: Lazy<RecordDataSchema> = Lazy::new(|| {
    parse_record_schema(FOO_SCHEMA_JSON).expect("embedded Foo schema must parse")
});

static BAR_SCHEMA: Lazy<RecordDataSchema> = Lazy::new(|| {
    parse_record_schema(BAR_SCHEMA_JSON).expect("embedded Bar schema must parse")
});

const FIELD_RECORD: &str = "record";
const FIELD_INT: &str = "int";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Foo {
    data: DataMap,
}

impl Foo {
    pub fn new() -> Self {
        Self::default()
    }

    /// The attached `Bar`, or `None` if none was set.
    pub fn record(&self) -> Result<Option<Bar>, TemplateError> {
        self.obtain_wrapped(FIELD_RECORD, GetMode::Default)
    }

    pub fn set_record(&mut self, value: Bar) -> Result<&mut Self, TemplateError> {
        self.put_wrapped(FIELD_RECORD, Some(value), SetMode::DisallowNull)
    }

    pub fn has_record(&self) -> bool {
        self.contains(FIELD_RECORD)
    }
}

impl RecordTemplate for Foo {
    fn schema() -> &'static RecordDataSchema {
        &FOO_SCHEMA
    }

    fn from_data(data: DataMap) -> Self {
        Self { data }
    }

    fn data(&self) -> &DataMap {
        &self.data
    }

    fn data_mut(&mut self) -> &mut DataMap {
        &mut self.data
    }

    fn into_data(self) -> DataMap {
        self.data
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bar {
    data: DataMap,
}

impl Bar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors with `RequiredFieldNotPresent` until `set_int` was called.
    pub fn int(&self) -> Result<i32, TemplateError> {
        self.obtain_direct::<i32>(FIELD_INT, GetMode::Strict)?
            .ok_or_else(|| TemplateError::RequiredFieldNotPresent {
                record: Self::schema().full_name(),
                field: FIELD_INT.to_owned(),
            })
    }

    pub fn set_int(&mut self, value: i32) -> Result<&mut Self, TemplateError> {
        self.put_direct(FIELD_INT, Some(value), SetMode::DisallowNull)
    }

    pub fn has_int(&self) -> bool {
        self.contains(FIELD_INT)
    }

    pub fn remove_int(&mut self) -> Result<&mut Self, TemplateError> {
        self.put_direct::<i32>(FIELD_INT, None, SetMode::RemoveIfNull)
    }
}

impl RecordTemplate for Bar {
    fn schema() -> &'static RecordDataSchema {
        &BAR_SCHEMA
    }

    fn from_data(data: DataMap) -> Self {
        Self { data }
    }

    fn data(&self) -> &DataMap {
        &self.data
    }

    fn data_mut(&mut self) -> &mut DataMap {
        &mut self.data
    }

    fn into_data(self) -> DataMap {
        self.data
    }
}
