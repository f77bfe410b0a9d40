// src/constants.rs
//
// Centralized constants for datamap-bench to avoid hardcoded values throughout the codebase

/// Size of each benchmark buffer, source and target (32 KiB)
pub const DEFAULT_BUFFER_SIZE: usize = 32 * 1024;

/// Value written into `Bar.int` on every benchmark iteration
pub const DEFAULT_INT_VALUE: i32 = 54;

/// Default iteration count for the sequential run loop.
/// Large enough that the loop is effectively unbounded for interactive use.
pub const DEFAULT_ITERATIONS: u64 = i32::MAX as u64;

/// How often (in iterations) the sequential loop reports progress
pub const DEFAULT_REPORT_EVERY: u64 = 1 << 20;

/// Upper bound accepted for a benchmark buffer (256 MB)
pub const MAX_BUFFER_SIZE: usize = 256 * 1024 * 1024;

// ============================================================================
// Environment Variable Names
// ============================================================================

/// Overrides [`DEFAULT_BUFFER_SIZE`]
pub const ENV_BUFFER_SIZE: &str = "DATAMAP_BENCH_BUFFER_SIZE";

/// Overrides [`DEFAULT_ITERATIONS`]
pub const ENV_ITERATIONS: &str = "DATAMAP_BENCH_ITERATIONS";

/// Overrides [`DEFAULT_INT_VALUE`]
pub const ENV_INT_VALUE: &str = "DATAMAP_BENCH_INT_VALUE";

/// Selects the source buffer fill pattern: `zero` or `random`
pub const ENV_FILL: &str = "DATAMAP_BENCH_FILL";

/// Overrides [`DEFAULT_REPORT_EVERY`]
pub const ENV_REPORT_EVERY: &str = "DATAMAP_BENCH_REPORT_EVERY";

// ============================================================================
// Record Schema Text
// ============================================================================

/// Schema of the inner record: a single required `int` field
pub const BAR_SCHEMA_JSON: &str =
    r#"{ "type" : "record", "name" : "Bar", "fields" : [ { "name" : "int", "type" : "int" } ] }"#;

/// Schema of the outer record: a single required `record` field holding a `Bar`
pub const FOO_SCHEMA_JSON: &str = r#"{ "type" : "record", "name" : "Foo", "fields" : [
{ "name" : "record", "type" : { "type" : "record", "name" : "Bar", "fields" : [ { "name" : "int", "type" : "int" } ] } }
] }"#;
