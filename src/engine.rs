//! The read-measure-render loop.
//!
//! [`Engine::run`] reads one `\n`-terminated record at a time, measures the
//! time since the previous record was emitted and renders the compiled
//! [`Template`] for it. The read buffer is reused across records.

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use crate::error::TimedlineError;
use crate::render;
use crate::template::{Part, Template};

/// Monotonic time source.
pub trait Clock {
    /// Current instant; never earlier than a previously returned one.
    fn now(&mut self) -> Instant;
}

/// [`Clock`] backed by [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&mut self) -> Instant {
        Instant::now()
    }
}

/// One input line as read, including its `\n` when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'b> {
    bytes: &'b [u8],
    terminated: bool,
}

impl<'b> Record<'b> {
    pub fn new(bytes: &'b [u8]) -> Self {
        Self {
            bytes,
            terminated: bytes.last() == Some(&b'\n'),
        }
    }

    /// Raw bytes, delimiter included.
    pub fn bytes(&self) -> &'b [u8] {
        self.bytes
    }

    /// Whether the record ended with `\n` (the last line of a stream may not).
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Bytes without the trailing `\n`.
    pub fn content(&self) -> &'b [u8] {
        if self.terminated {
            &self.bytes[..self.bytes.len() - 1]
        } else {
            self.bytes
        }
    }
}

/// Executes a compiled template once per input record.
#[derive(Debug)]
pub struct Engine<'a, C> {
    template: Template<'a>,
    clock: C,
    /// Instant of the last emitted record, or of construction before the first.
    previous: Instant,
    line_flush: bool,
}

impl<'a, C: Clock> Engine<'a, C> {
    /// The first record is measured from this call.
    pub fn new(template: Template<'a>, mut clock: C) -> Self {
        Self {
            template,
            previous: clock.now(),
            clock,
            line_flush: false,
        }
    }

    /// Flush the sink after every record instead of only at the end.
    #[must_use]
    pub fn with_line_flush(mut self, line_flush: bool) -> Self {
        self.line_flush = line_flush;
        self
    }

    /// Instant the next record's elapsed time will be measured from.
    pub fn previous(&self) -> Instant {
        self.previous
    }

    /// Process `input` until end of stream, writing to `out`.
    ///
    /// Returns the number of records rendered. A read error ends the stream
    /// like end-of-file does.
    ///
    /// # Errors
    ///
    /// [`TimedlineError::Write`] as soon as `out` rejects a write or flush;
    /// nothing further is read or written.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut out: W,
    ) -> Result<u64, TimedlineError> {
        let mut buf = Vec::with_capacity(256);
        let mut records = 0;

        loop {
            buf.clear();
            match input.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    log::debug!("read error, ending input: {e}");
                    break;
                }
            }

            let now = self.clock.now();
            let elapsed = now.saturating_duration_since(self.previous);

            self.render_record(Record::new(&buf), elapsed, &mut out)?;
            if self.line_flush {
                out.flush()?;
            }

            self.previous = now;
            records += 1;
        }

        out.flush()?;
        log::debug!("processed {records} records");
        Ok(records)
    }

    /// Render one record with the given elapsed time.
    ///
    /// The record's `\n` is held back from `%i` and written after the last
    /// part, unless the template itself ends with `%i`.
    ///
    /// # Errors
    ///
    /// The first error returned by `out`; later parts are not written.
    pub fn render_record<W: Write + ?Sized>(
        &self,
        record: Record<'_>,
        elapsed: Duration,
        out: &mut W,
    ) -> io::Result<()> {
        let deferred = record.is_terminated() && !self.template.ends_with_input();
        let echo = if deferred {
            record.content()
        } else {
            record.bytes()
        };

        for part in self.template.parts() {
            match *part {
                Part::Elapsed { unit, pad } => {
                    render::write_elapsed(out, elapsed, unit, self.template.pad_bytes(pad))?;
                }
                Part::ClockFace => render::write_clock(out, elapsed)?,
                Part::Literal(text) => out.write_all(text)?,
                Part::PercentLiteral => out.write_all(b"%")?,
                Part::InputEcho => out.write_all(echo)?,
            }
        }

        if deferred {
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}
