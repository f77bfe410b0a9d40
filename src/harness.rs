// src/harness.rs
//
// The benchmarked operation and a sequential loop that times it.
//
// One iteration copies the whole source buffer into the target and then
// builds a `Foo` holding a `Bar` whose int is set. Criterion drives
// `bench_iteration` directly; `run_loop` is the stand-alone equivalent.

use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::codec;
use crate::config::{FillPattern, HarnessConfig};
use crate::constants::DEFAULT_BUFFER_SIZE;
use crate::copy::{CopyError, arraycopy};
use crate::records::{Bar, Foo};
use crate::template::{RecordTemplate, TemplateError};
use crate::validation::{ValidationOptions, ValidationResult, validate_with};

/// Crate-level error for everything the harness can hit.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error(transparent)]
    Copy(#[from] CopyError),

    #[error(transparent)]
    Record(#[from] TemplateError),

    #[error(transparent)]
    Codec(#[from] codec::CodecError),
}

/// Source and target buffers shared by every iteration of a run.
#[derive(Debug, Clone)]
pub struct BenchState {
    pub source: Vec<u8>,
    pub target: Vec<u8>,
}

impl Default for BenchState {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}

impl BenchState {
    /// Two zeroed buffers of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            source: vec![0u8; size],
            target: vec![0u8; size],
        }
    }

    pub fn with_fill(size: usize, fill: FillPattern) -> Self {
        let mut state = Self::new(size);
        if fill == FillPattern::Random {
            let mut rng = rand::rngs::ThreadRng::default();
            rng.fill(state.source.as_mut_slice());
        }
        state
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::with_fill(config.buffer_size, config.fill)
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

/// Copy the entire source buffer to the start of the target.
pub fn copy_buffers(state: &mut BenchState) -> Result<(), CopyError> {
    let len = state.source.len();
    arraycopy(&state.source, 0, &mut state.target, 0, len)
}

/// Build the nested record pair with `Bar.int == value`.
pub fn build_records(value: i32) -> Result<Foo, TemplateError> {
    let mut bar = Bar::new();
    bar.set_int(value)?;
    let mut foo = Foo::new();
    foo.set_record(bar)?;
    Ok(foo)
}

/// One benchmark iteration: buffer copy followed by record construction.
pub fn bench_iteration(state: &mut BenchState, value: i32) -> Result<Foo, BenchError> {
    copy_buffers(state)?;
    Ok(build_records(value)?)
}

/// JSON text of the records one iteration builds.
pub fn render_records(value: i32, pretty: bool) -> Result<String, BenchError> {
    let foo = build_records(value)?;
    let text = if pretty {
        codec::to_json_pretty(foo.data())?
    } else {
        codec::to_json(foo.data())?
    };
    Ok(text)
}

/// Decode JSON text and validate it as a `Foo`.
pub fn validate_foo_json(text: &str, options: &ValidationOptions) -> Result<ValidationResult, BenchError> {
    let data = codec::from_json(text)?;
    Ok(validate_with(&data, Foo::schema(), options))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub iterations: u64,
    pub elapsed: Duration,
    pub bytes_per_iteration: usize,
}

impl RunSummary {
    /// Mean wall time per iteration in nanoseconds; 0 for an empty run.
    pub fn avg_ns_per_op(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.elapsed.as_nanos() as f64 / self.iterations as f64
    }

    /// Copy throughput in MiB/s; 0 when nothing measurable ran.
    pub fn copy_mib_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        let bytes = self.bytes_per_iteration as f64 * self.iterations as f64;
        bytes / 1_048_576.0 / secs
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} iterations in {} ({:.2} ns/op, {:.2} MiB/s copied)",
            self.iterations,
            humantime::format_duration(self.elapsed),
            self.avg_ns_per_op(),
            self.copy_mib_per_sec()
        )
    }
}

/// Run `config.iterations` iterations back to back.
///
/// `on_progress` is called with the completed iteration count every
/// `config.report_every` iterations (never when that is 0). The first
/// failing iteration aborts the run.
pub fn run_loop<F>(
    state: &mut BenchState,
    config: &HarnessConfig,
    mut on_progress: F,
) -> Result<RunSummary, BenchError>
where
    F: FnMut(u64),
{
    debug!(
        iterations = config.iterations,
        buffer_size = state.len(),
        int_value = config.int_value,
        "starting run loop"
    );

    let start = Instant::now();
    for i in 1..=config.iterations {
        black_box(bench_iteration(state, config.int_value)?);
        if config.report_every > 0 && i % config.report_every == 0 {
            on_progress(i);
        }
    }

    let summary = RunSummary {
        iterations: config.iterations,
        elapsed: start.elapsed(),
        bytes_per_iteration: state.len(),
    };
    info!("run complete: {summary}");
    Ok(summary)
}
