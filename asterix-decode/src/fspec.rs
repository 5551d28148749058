//! `FspecEngine` (spec §4.4, component C4): reads and writes the variable
//! length Field Specification bitmap that prefixes every ASTERIX record.
//!
//! Byte *k* (1-based) contributes data slots `7*(k-1)+1 ..= 7*(k-1)+7`,
//! read MSB-first; its LSB is the FX continuation bit, never itself a
//! slot. FSPEC ends at the first byte whose FX bit is 0.

use asterix_core::cursor::BitCursor;
use asterix_core::error::ErrorKind;

/// Reads an FSPEC, returning one `bool` per data slot (`true` = present).
/// `max_fspec_bytes` bounds runaway FX chains; exceeding it is
/// unrecoverable for the enclosing record (spec §6).
pub fn read_fspec(cursor: &mut BitCursor, max_fspec_bytes: usize) -> Result<Vec<bool>, ErrorKind> {
    let mut slots = Vec::new();
    let mut bytes_read = 0usize;

    loop {
        if bytes_read >= max_fspec_bytes {
            return Err(ErrorKind::FspecOverflow { max_bytes: max_fspec_bytes });
        }
        let byte = cursor.read_bits_be(8)? as u8;
        bytes_read += 1;
        for bit in (1..8).rev() {
            slots.push((byte >> bit) & 1 == 1);
        }
        let fx = byte & 1;
        if fx == 0 {
            break;
        }
    }

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_byte_fspec_with_no_extension() {
        let data = [0b1010_1010];
        let mut cursor = BitCursor::from_slice(&data);
        let slots = read_fspec(&mut cursor, 8).unwrap();
        assert_eq!(slots, vec![true, false, true, false, true, false, true]);
        assert_eq!(cursor.bytes_consumed(), 1);
    }

    #[test]
    fn extension_bit_pulls_in_a_second_byte() {
        // 0xFF = all 7 data slots set + FX=1; 0x80 = slot8 set, FX=0.
        let data = [0xFF, 0x80];
        let mut cursor = BitCursor::from_slice(&data);
        let slots = read_fspec(&mut cursor, 8).unwrap();
        assert_eq!(slots.len(), 14);
        assert!(slots[..7].iter().all(|&s| s));
        assert!(slots[7]);
        assert!(slots[8..].iter().all(|&s| !s));
    }

    #[test]
    fn runaway_fx_chain_is_reported_as_overflow() {
        let data = [0xFF; 10];
        let mut cursor = BitCursor::from_slice(&data);
        let err = read_fspec(&mut cursor, 4).unwrap_err();
        assert_eq!(err, ErrorKind::FspecOverflow { max_bytes: 4 });
    }

    #[test]
    fn truncated_fspec_is_reported() {
        let data: [u8; 0] = [];
        let mut cursor = BitCursor::from_slice(&data);
        let err = read_fspec(&mut cursor, 8).unwrap_err();
        assert!(matches!(err, ErrorKind::Truncated { .. }));
    }
}
