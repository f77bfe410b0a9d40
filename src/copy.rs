// src/copy.rs
//
// Bounded byte-range copy used by the benchmark hot loop

use std::ops::Range;
use thiserror::Error;

/// Errors raised when a copy range does not fit its buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CopyError {
    #[error("{side} range {pos}+{length} out of bounds for buffer of {buffer_len} bytes")]
    OutOfBounds {
        side: CopySide,
        pos: usize,
        length: usize,
        buffer_len: usize,
    },
}

/// Which end of a copy a bounds failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopySide {
    Source,
    Destination,
}

impl std::fmt::Display for CopySide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CopySide::Source => f.write_str("source"),
            CopySide::Destination => f.write_str("destination"),
        }
    }
}

fn checked_range(
    side: CopySide,
    pos: usize,
    length: usize,
    buffer_len: usize,
) -> Result<Range<usize>, CopyError> {
    match pos.checked_add(length) {
        Some(end) if end <= buffer_len => Ok(pos..end),
        _ => Err(CopyError::OutOfBounds {
            side,
            pos,
            length,
            buffer_len,
        }),
    }
}

/// Copy `length` bytes from `source[src_pos..]` into `target[dest_pos..]`.
///
/// Both ranges are checked before anything is written, so a failed call
/// leaves `target` untouched. A zero-length copy is a no-op, including at
/// `pos == len`.
pub fn arraycopy(
    source: &[u8],
    src_pos: usize,
    target: &mut [u8],
    dest_pos: usize,
    length: usize,
) -> Result<(), CopyError> {
    let src = checked_range(CopySide::Source, src_pos, length, source.len())?;
    let dst = checked_range(CopySide::Destination, dest_pos, length, target.len())?;
    target[dst].copy_from_slice(&source[src]);
    Ok(())
}

/// Copy `length` bytes inside one buffer using strict forward iteration.
///
/// Byte `i` of the source range is read after bytes `0..i` of the
/// destination range were written. When the destination starts inside the
/// source range, the leading bytes are repeated through the destination
/// rather than moved intact (this is not a `memmove`).
pub fn arraycopy_within(
    buffer: &mut [u8],
    src_pos: usize,
    dest_pos: usize,
    length: usize,
) -> Result<(), CopyError> {
    checked_range(CopySide::Source, src_pos, length, buffer.len())?;
    checked_range(CopySide::Destination, dest_pos, length, buffer.len())?;

    let overlaps = src_pos < dest_pos + length && dest_pos < src_pos + length;
    if !overlaps || dest_pos <= src_pos {
        // Forward iteration and memmove agree here.
        buffer.copy_within(src_pos..src_pos + length, dest_pos);
        return Ok(());
    }

    for i in 0..length {
        buffer[dest_pos + i] = buffer[src_pos + i];
    }
    Ok(())
}
