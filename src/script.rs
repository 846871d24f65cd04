// src/script.rs
use crate::image::{DiskImage, TrackNum};
use crate::monitor::{line_start_pad, write_fill_command};
use crate::tables::{
    CLIENT_ADDRESS, CLIENT_PROGRAM, CLIENT_TRACK_OFFSET, TRACK_BUFFER_ADDRESS, TRACK_NUM_BYTES,
    TRACK_SIZE,
};
use anyhow::Result;
use log::info;
use std::io::Write;

/// Serial-link tuning knobs. The defaults were derived by trial and error at
/// 2400 baud, 7 data bits, 1 stop bit; a different link may want different
/// values, so nothing here is hardcoded into the generators.
#[derive(Debug, Clone, Copy)]
pub struct ScriptConfig {
    /// Bytes per fill command in steady state.
    pub segment_size: usize,
    /// Number of short warm-up commands before steady state: the first chunk
    /// is re-sent with byte counts `segment_size - ramp_len ..= segment_size`.
    /// Must not exceed `segment_size`.
    pub ramp_len: usize,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        ScriptConfig { segment_size: 8, ramp_len: 8 }
    }
}

/// Emit the commands that fill 0x2000..0x2FFF on the target with one track of
/// image data.
///
/// The monitor drops a disproportionate number of leading characters on the
/// first commands of a burst, before its line-processing cadence settles. The
/// ramp re-sends the first chunk with byte counts stepping up from
/// `segment_size - ramp_len` to `segment_size`; every ramp command uses the
/// same source offset and target address, so lost or repeated ramp lines are
/// harmless.
pub fn write_track_load_commands(
    out: &mut impl Write,
    image: &DiskImage,
    track: TrackNum,
    config: &ScriptConfig,
) -> Result<()> {
    let pad = line_start_pad();
    let mut source_pos = DiskImage::track_start(track);
    let mut target = TRACK_BUFFER_ADDRESS;
    for count in (config.segment_size - config.ramp_len)..=config.segment_size {
        write_fill_command(out, image.data(), &pad, target, source_pos, count)?;
    }
    let mut written = 0;
    while written < TRACK_SIZE {
        write_fill_command(out, image.data(), &pad, target, source_pos, config.segment_size)?;
        target += config.segment_size as i32;
        source_pos += config.segment_size;
        written += config.segment_size;
    }
    Ok(())
}

/// Patch the client program's IOB track byte and emit the commands that load
/// it at 0x0C00. No ramp: by this point the link cadence is established.
pub fn write_client_load_commands(
    out: &mut impl Write,
    track: TrackNum,
    config: &ScriptConfig,
) -> Result<()> {
    let mut client = CLIENT_PROGRAM;
    client[CLIENT_TRACK_OFFSET] = TRACK_NUM_BYTES[track.index()];
    let pad = line_start_pad();
    let mut source_pos = 0;
    let mut target = CLIENT_ADDRESS;
    let mut written = 0;
    while written < client.len() {
        // the program length is not a segment multiple, so the last command
        // carries the remainder
        let count = config.segment_size.min(client.len() - written);
        write_fill_command(out, &client, &pad, target, source_pos, count)?;
        target += config.segment_size as i32;
        source_pos += config.segment_size;
        written += config.segment_size;
    }
    Ok(())
}

/// Emit the go command that runs the client at 0x0C00.
pub fn write_execute_command(out: &mut impl Write, track: TrackNum) -> Result<()> {
    info!("executing binary client program to write track {}", track);
    write!(out, "{}C00G\r", line_start_pad())?;
    Ok(())
}
