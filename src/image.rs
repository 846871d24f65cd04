// src/image.rs
use crate::tables::{SECTOR_SIZE, SECTOR_SWAP_PAIRS, TRACK_COUNT, TRACK_SIZE};
use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Errors from bounds-checked image access.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("illegal track number encountered: {0}")]
    IllegalTrack(usize),
    #[error("image too short: track {track} sector {sector:#04X} needs {needed} bytes, have {have}")]
    OutOfBounds { track: usize, sector: usize, needed: usize, have: usize },
}

/// A validated track index in [0,34]. Every component that takes a track goes
/// through this type, so the range check lives in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackNum(usize);

impl TrackNum {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for TrackNum {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self, Error> {
        if value >= TRACK_COUNT {
            return Err(Error::IllegalTrack(value));
        }
        Ok(TrackNum(value))
    }
}

impl std::fmt::Display for TrackNum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// In-memory disk image, 35 tracks x 16 sectors x 256 bytes when complete.
/// Loaded once, reordered once, read-only afterwards.
pub struct DiskImage {
    data: Vec<u8>,
}

impl DiskImage {
    pub fn new(data: Vec<u8>) -> Self {
        DiskImage { data }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let mut file = File::open(path)
            .with_context(|| format!("cannot open disk image {}", path.display()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .with_context(|| format!("cannot read disk image {}", path.display()))?;
        info!("read {} bytes from file {}", data.len(), path.display());
        Ok(DiskImage { data })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Linear offset of (track, sector): 0x000TTSBB.
    fn sector_start(track: usize, sector: usize) -> usize {
        track * TRACK_SIZE + sector * SECTOR_SIZE
    }

    fn sector_range(&self, track: usize, sector: usize) -> Result<std::ops::Range<usize>, Error> {
        let start = Self::sector_start(track, sector);
        let end = start + SECTOR_SIZE;
        if end > self.data.len() {
            return Err(Error::OutOfBounds { track, sector, needed: end, have: self.data.len() });
        }
        Ok(start..end)
    }

    /// Byte offset where a track's data begins; the encoder clamps reads past
    /// the end of the buffer, so no length check happens here.
    pub fn track_start(track: TrackNum) -> usize {
        Self::sector_start(track.index(), 0)
    }

    /// Swap two sectors of one track through a scratch buffer: source to
    /// scratch, destination to source, scratch to destination. No overlapping
    /// writes at any step.
    fn swap_sectors(&mut self, track: usize, a: usize, b: usize) -> Result<(), Error> {
        let ra = self.sector_range(track, a)?;
        let rb = self.sector_range(track, b)?;
        let mut scratch = [0u8; SECTOR_SIZE];
        scratch.copy_from_slice(&self.data[ra.clone()]);
        self.data.copy_within(rb.clone(), ra.start);
        self.data[rb].copy_from_slice(&scratch);
        Ok(())
    }

    /// Convert the whole image from ProDOS sector order to the order the DOS
    /// 3.3 RWTS write routine expects, track by track. Fails if the image does
    /// not hold full sector data for every track.
    pub fn reorder_prodos_to_dos33(&mut self) -> Result<(), Error> {
        for track in 0..TRACK_COUNT {
            for &(a, b) in &SECTOR_SWAP_PAIRS {
                self.swap_sectors(track, a, b)?;
            }
        }
        Ok(())
    }
}
