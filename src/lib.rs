// src/lib.rs
//
// Crate root — module tree plus the re-exports used by the CLI and benches.

pub mod constants;
pub mod config;
pub mod copy;
pub mod data;
pub mod schema;
pub mod codec;
pub mod template;
pub mod validation;
pub mod records;
pub mod harness;
pub mod progress;

// ===== Convenience Re-exports =====
pub use config::{FillPattern, HarnessConfig};
pub use copy::{CopyError, arraycopy, arraycopy_within};
pub use data::{DataList, DataMap, Value};
pub use harness::{BenchError, BenchState, RunSummary, bench_iteration, build_records, copy_buffers, run_loop};
pub use records::{Bar, Foo};
pub use schema::{DataSchema, RecordDataSchema, SchemaError, parse_record_schema, parse_schema};
pub use template::{GetMode, RecordTemplate, SetMode, TemplateError};
pub use validation::{ValidationOptions, ValidationResult, validate, validate_with};
