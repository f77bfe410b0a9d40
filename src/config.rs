use clap::ValueEnum;
use std::str::FromStr;
use tracing::warn;

use crate::constants::{
    DEFAULT_BUFFER_SIZE, DEFAULT_INT_VALUE, DEFAULT_ITERATIONS, DEFAULT_REPORT_EVERY, ENV_BUFFER_SIZE,
    ENV_FILL, ENV_INT_VALUE, ENV_ITERATIONS, ENV_REPORT_EVERY, MAX_BUFFER_SIZE,
};

/// How the source buffer is filled before the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "lowercase")] // CLI shows zero, random
pub enum FillPattern {
    #[default]
    Zero,
    Random,
}

impl FromStr for FillPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zero" | "zeros" => Ok(FillPattern::Zero),
            "random" | "rand" => Ok(FillPattern::Random),
            other => Err(format!("unknown fill pattern \"{other}\"")),
        }
    }
}

/// Runtime parameters used by the harness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub buffer_size: usize,   // bytes in each of source and target
    pub iterations:  u64,     // sequential loop count
    pub int_value:   i32,     // written into Bar.int
    pub fill:        FillPattern,
    pub report_every: u64,    // progress callback interval, 0 disables
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            iterations: DEFAULT_ITERATIONS,
            int_value: DEFAULT_INT_VALUE,
            fill: FillPattern::Zero,
            report_every: DEFAULT_REPORT_EVERY,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from environment variables
    pub fn from_environment() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unparsable values are ignored
    /// with a warning and the default is kept.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(size) = parse_var::<usize>(&lookup, ENV_BUFFER_SIZE) {
            if size <= MAX_BUFFER_SIZE {
                config.buffer_size = size;
            } else {
                warn!("{ENV_BUFFER_SIZE}={size} exceeds {MAX_BUFFER_SIZE}, keeping default");
            }
        }
        if let Some(n) = parse_var::<u64>(&lookup, ENV_ITERATIONS) {
            config.iterations = n;
        }
        if let Some(v) = parse_var::<i32>(&lookup, ENV_INT_VALUE) {
            config.int_value = v;
        }
        if let Some(fill) = parse_var::<FillPattern>(&lookup, ENV_FILL) {
            config.fill = fill;
        }
        if let Some(n) = parse_var::<u64>(&lookup, ENV_REPORT_EVERY) {
            config.report_every = n;
        }

        config
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_int_value(mut self, value: i32) -> Self {
        self.int_value = value;
        self
    }

    pub fn with_fill(mut self, fill: FillPattern) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_report_every(mut self, n: u64) -> Self {
        self.report_every = n;
        self
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("ignoring invalid {key}={raw:?}");
            None
        }
    }
}
