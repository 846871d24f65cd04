use anyhow::{anyhow, Result};
use clap::Parser;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

mod image;
mod monitor;
mod script;
mod tables;

use image::{DiskImage, TrackNum};
use script::ScriptConfig;

/// Generate Apple ][ monitor commands that write one track of a ProDOS-order
/// disk image over a serial link. The target must be booted into DOS 3.3 so
/// the RWTS routine is resident. Commands go to stdout, diagnostics to stderr.
#[derive(Parser)]
#[command(about = "ProDOS disk image to serial track-write script")]
struct Cli {
    /// ProDOS sector order disk image (e.g. a .po file)
    image: PathBuf,
    /// Track to write, 0-34
    track: usize,
    /// Bytes per monitor fill command
    #[arg(long, default_value_t = 8)]
    segment_size: usize,
    /// Warm-up commands before steady-state transfer
    #[arg(long, default_value_t = 8)]
    ramp_len: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let track = TrackNum::try_from(cli.track)?;
    if cli.segment_size == 0 || cli.ramp_len > cli.segment_size {
        return Err(anyhow!(
            "segment size must be positive and at least the ramp length (got {} and {})",
            cli.segment_size,
            cli.ramp_len
        ));
    }
    let config = ScriptConfig { segment_size: cli.segment_size, ramp_len: cli.ramp_len };

    let mut image = DiskImage::load(&cli.image)?;
    image.reorder_prodos_to_dos33()?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    script::write_track_load_commands(&mut out, &image, track, &config)?;
    script::write_client_load_commands(&mut out, track, &config)?;
    script::write_execute_command(&mut out, track)?;
    out.flush()?;
    Ok(())
}
