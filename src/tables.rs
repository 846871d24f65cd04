// src/tables.rs
//
// Constant tables for the target machine. The sector pairing was determined
// empirically against a real drive; it is authoritative even where online
// references suggest a different ProDOS skew.

/// Tracks on a standard 5.25" Apple II disk.
pub const TRACK_COUNT: usize = 35;
/// Sectors per track.
pub const SECTORS_PER_TRACK: usize = 16;
/// Bytes per sector.
pub const SECTOR_SIZE: usize = 0x100;
/// Bytes per track (16 sectors).
pub const TRACK_SIZE: usize = 0x1000;

/// Sector pairs exchanged when converting a track from ProDOS order to the
/// order the DOS 3.3 RWTS write routine expects. Sectors 0x00 and 0x0F stay
/// put; the resulting physical write order is
/// 00,0E,0D,0C,0B,0A,09,08,07,06,05,04,03,02,01,0F.
pub const SECTOR_SWAP_PAIRS: [(usize, usize); 7] =
    [(0x1, 0xE), (0x2, 0xD), (0x3, 0xC), (0x4, 0xB), (0x5, 0xA), (0x6, 0x9), (0x7, 0x8)];

/// Memory page the track data is staged at on the target.
pub const TRACK_BUFFER_ADDRESS: i32 = 0x2000;
/// Load address of the RWTS client routine.
pub const CLIENT_ADDRESS: i32 = 0x0C00;

/// Offset within [`CLIENT_PROGRAM`] of the IOB track-number byte. This is the
/// single patch point; everything else in the image is fixed.
pub const CLIENT_TRACK_OFFSET: usize = 0x20;

/// 6502 routine loaded at 0x0C00. Calls RWTS through the 0x03D9 vector 16
/// times, bumping the IOB sector (0x0C21) and buffer page (0x0C25) each pass,
/// and returns after sector 0x0F is written. The IOB and DCT follow the code.
pub const CLIENT_PROGRAM: [u8; 52] = [
    0xA9, 0x0C, // lda #$0C  IOB address into A/Y for RWTS
    0xA0, 0x1C, // ldy #$1C
    0x20, 0xD9, 0x03, // jsr $03D9  call RWTS
    0xB0, 0x12, // bcs +18  bail on error
    0xA9, 0x0F, // lda #$0F  final sector written?
    0xCD, 0x21, 0x0C, // cmp $0C21
    0xF0, 0x0A, // beq +10  done
    0xEE, 0x21, 0x0C, // inc $0C21  next sector
    0xEE, 0x25, 0x0C, // inc $0C25  next buffer page
    0xF0, 0xE8, // beq -24  iterate
    0xD0, 0xE6, // bne -26  iterate
    0x60, // rts
    0x00, // brk
    0x01, 0x60, 0x01, 0x00, 0x00, 0x00, // IOB: slot, drive, volume, track, sector
    0x30, 0x0C, // DCT address ($0C30)
    0x00, 0x20, // data buffer ($2000)
    0x00, 0x00, 0x02, // command: write
    0x00, 0x00, 0x60, 0x01, // actual volume, previous slot/drive
    0x00, 0x00, 0x00, // unused
    0x00, 0x01, 0xEF, 0xD8, // DCT (constant)
];

/// IOB track byte for a given track index. Identity over the valid range; kept
/// as a table so the encoding is visible and testable on its own.
pub const TRACK_NUM_BYTES: [u8; TRACK_COUNT] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E,
    0x0F, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x1B, 0x1C, 0x1D,
    0x1E, 0x1F, 0x20, 0x21, 0x22,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_pairs_cover_middle_sectors_once() {
        let mut seen = [false; SECTORS_PER_TRACK];
        for &(a, b) in &SECTOR_SWAP_PAIRS {
            assert!(!seen[a] && !seen[b]);
            seen[a] = true;
            seen[b] = true;
            assert_eq!(a + b, 0xF);
        }
        assert!(!seen[0x0] && !seen[0xF]);
        assert_eq!(seen.iter().filter(|&&s| s).count(), 14);
    }

    #[test]
    fn client_track_offset_points_into_iob() {
        assert_eq!(CLIENT_PROGRAM[CLIENT_TRACK_OFFSET], 0x00);
        // slot/drive/volume precede the track byte
        assert_eq!(&CLIENT_PROGRAM[CLIENT_TRACK_OFFSET - 4..CLIENT_TRACK_OFFSET], &[0x01, 0x60, 0x01, 0x00]);
    }

    #[test]
    fn track_num_bytes_are_identity() {
        for (i, &b) in TRACK_NUM_BYTES.iter().enumerate() {
            assert_eq!(b as usize, i);
        }
    }
}
