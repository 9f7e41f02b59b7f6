//! Elapsed-time rendering.
//!
//! Every function here formats into a stack buffer and hands the sink a single
//! slice (plus an optional padding slice), so rendering a line allocates
//! nothing. Splitting a duration into a coarser unit and a finer remainder
//! always truncates.

use std::io::{self, Write};
use std::time::Duration;

use crate::template::Unit;

/// Decimal digits in `u128::MAX`.
const U128_DIGITS: usize = 39;

/// `<int>.<3 digits>`
const ELAPSED_LEN: usize = U128_DIGITS + 4;

/// `H` (up to 20 digits) + `:MM:SS.mmm`
const CLOCK_LEN: usize = 20 + 10;

/// Write `value` right-aligned at the end of `buf`; returns the first digit's index.
#[allow(clippy::cast_possible_truncation)] // a single decimal digit
fn write_decimal(mut value: u128, buf: &mut [u8]) -> usize {
    let mut start = buf.len();
    loop {
        start -= 1;
        buf[start] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            return start;
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn write_fixed<const N: usize>(mut value: u64, buf: &mut [u8; N]) {
    for slot in buf.iter_mut().rev() {
        *slot = b'0' + (value % 10) as u8;
        value /= 10;
    }
}

/// Render `elapsed` as `<whole units>.<thousandths>`.
///
/// `pad` is the part's padding view; its length is the minimum width of the
/// integer portion. Only as many bytes as needed are taken from it.
///
/// For [`Unit::Microseconds`] the thousandths are nanoseconds.
pub fn write_elapsed<W: Write + ?Sized>(
    out: &mut W,
    elapsed: Duration,
    unit: Unit,
    pad: &[u8],
) -> io::Result<()> {
    let nanos = elapsed.as_nanos();
    let per_unit = unit.nanos();
    let whole = nanos / per_unit;
    #[allow(clippy::cast_possible_truncation)] // below 1000
    let thousandths = ((nanos % per_unit) / (per_unit / 1000)) as u64;

    let mut buf = [0u8; ELAPSED_LEN];
    let dot = ELAPSED_LEN - 4;
    buf[dot] = b'.';
    let mut fraction = [0u8; 3];
    write_fixed(thousandths, &mut fraction);
    buf[dot + 1..].copy_from_slice(&fraction);
    let start = write_decimal(whole, &mut buf[..dot]);

    let digits = dot - start;
    if pad.len() > digits {
        out.write_all(&pad[..pad.len() - digits])?;
    }
    out.write_all(&buf[start..])
}

/// Render `elapsed` as `H:MM:SS.mmm`.
///
/// Hours are unbounded and unpadded; the other fields have a fixed width.
pub fn write_clock<W: Write + ?Sized>(out: &mut W, elapsed: Duration) -> io::Result<()> {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = total % 3600 / 60;
    let seconds = total % 60;
    let millis = u64::from(elapsed.subsec_millis());

    let mut buf = [0u8; CLOCK_LEN];
    let tail = CLOCK_LEN - 10;
    let mut field = [0u8; 2];

    buf[tail] = b':';
    write_fixed(minutes, &mut field);
    buf[tail + 1..tail + 3].copy_from_slice(&field);
    buf[tail + 3] = b':';
    write_fixed(seconds, &mut field);
    buf[tail + 4..tail + 6].copy_from_slice(&field);
    buf[tail + 6] = b'.';
    let mut ms = [0u8; 3];
    write_fixed(millis, &mut ms);
    buf[tail + 7..].copy_from_slice(&ms);

    let start = write_decimal(u128::from(hours), &mut buf[..tail]);
    out.write_all(&buf[start..])
}
