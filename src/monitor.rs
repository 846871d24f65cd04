// src/monitor.rs
//
// Formatting of Apple ][ system monitor fill commands. Each command is one
// carriage-return terminated line:
//
//     <pad><address>:<hex bytes>\r
//
// The pad absorbs characters the monitor drops while it is still busy
// processing the previous line; 16 spaces proved adequate at 2400 baud.
use anyhow::Result;
use log::warn;
use std::io::Write;

/// Spaces prepended to every command line.
pub const LINE_START_PAD_LENGTH: usize = 16;

pub fn line_start_pad() -> String {
    " ".repeat(LINE_START_PAD_LENGTH)
}

/// Monitor address field: uppercase hex, at least two digits. A negative
/// address renders empty; not expected in normal operation, but the monitor
/// treats a bare ":" as "continue from last address" so the output stays
/// well-formed.
pub fn memory_address(target_start_address: i32) -> String {
    if target_start_address < 0 {
        String::new()
    } else {
        format!("{:02X}", target_start_address)
    }
}

/// Space-separated uppercase hex rendering of a byte group, no trailing space.
pub fn byte_group_string(byte_group: &[u8]) -> String {
    byte_group.iter().map(|b| format!("{:02X}", b)).collect::<Vec<_>>().join(" ")
}

/// Write one fill command covering `count` bytes of `source` starting at
/// `start`, targeting `target_start_address`. A request past the end of
/// `source` is clamped to the available bytes rather than failing; the
/// resulting short line is reported on the diagnostic channel only.
pub fn write_fill_command(
    out: &mut impl Write,
    source: &[u8],
    pad: &str,
    target_start_address: i32,
    start: usize,
    count: usize,
) -> Result<()> {
    let end = (start + count).min(source.len());
    let start = start.min(end);
    if end - start < count {
        warn!(
            "segment at {:04X} clamped from {} to {} bytes",
            target_start_address,
            count,
            end - start
        );
    }
    let address = memory_address(target_start_address);
    let bytes = byte_group_string(&source[start..end]);
    write!(out, "{}{}:{}\r", pad, address, bytes)?;
    Ok(())
}
