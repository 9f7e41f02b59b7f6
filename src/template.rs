//! Format template compiler.
//!
//! Turns a printf-like template such as `"%5s %i"` into a [`Template`]: an
//! ordered list of [`Part`]s plus one shared padding buffer. The template is
//! compiled once and then executed for every input line, so all the work that
//! does not depend on the line (splitting literals, parsing widths, laying
//! out padding) happens here.
//!
//! Escapes:
//! - `%%` literal percent
//! - `%i` the input line
//! - `%t` elapsed time as `H:MM:SS.mmm`
//! - `%s`, `%m`, `%u` elapsed seconds, milliseconds, microseconds
//! - `%[0]<N><s|m|u>` the same, integer part left-padded to `N` with spaces
//!   (or zeros when the width starts with `0`)

use crate::error::TemplateError;

/// Granularity of an elapsed-time part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Seconds,
    Milliseconds,
    Microseconds,
}

impl Unit {
    /// Nanoseconds in one whole unit.
    pub const fn nanos(self) -> u128 {
        match self {
            Self::Seconds => 1_000_000_000,
            Self::Milliseconds => 1_000_000,
            Self::Microseconds => 1_000,
        }
    }

    /// Unit for an escape selector byte (`s`, `m` or `u`).
    const fn from_selector(selector: u8) -> Option<Self> {
        match selector {
            b's' => Some(Self::Seconds),
            b'm' => Some(Self::Milliseconds),
            b'u' => Some(Self::Microseconds),
            _ => None,
        }
    }
}

/// Character used to left-pad a numeric part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fill {
    Space,
    Zero,
}

/// Minimum width of a numeric part and its view into the shared padding buffer.
///
/// The view is `padding[offset..offset + width]` of the owning [`Template`];
/// resolve it with [`Template::pad_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pad {
    pub fill: Fill,
    pub width: usize,
    offset: usize,
}

impl Pad {
    /// No padding (plain `%s`, `%m`, `%u`).
    pub const NONE: Self = Self {
        fill: Fill::Space,
        width: 0,
        offset: 0,
    };

    const fn new(fill: Fill, width: usize) -> Self {
        Self {
            fill,
            width,
            offset: 0,
        }
    }

    /// Start of this part's view into the padding buffer.
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

/// One instruction of a compiled template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part<'a> {
    /// Elapsed time as `<int>.<3 digits>` in the given unit (`%s`, `%m`, `%u`).
    Elapsed { unit: Unit, pad: Pad },
    /// Elapsed time as `H:MM:SS.mmm` (`%t`).
    ClockFace,
    /// Literal bytes, borrowed from the template source.
    Literal(&'a [u8]),
    /// A single `%` (`%%` with no literal text before it).
    PercentLiteral,
    /// The input line (`%i`).
    InputEcho,
}

impl Part<'_> {
    const fn elapsed(unit: Unit) -> Self {
        Self::Elapsed {
            unit,
            pad: Pad::NONE,
        }
    }
}

/// A compiled format template.
///
/// Literal parts borrow from the source bytes, so a `Template<'a>` cannot
/// outlive the template it was compiled from. The source need not be UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template<'a> {
    parts: Vec<Part<'a>>,
    padding: Box<[u8]>,
}

impl<'a> Template<'a> {
    /// Compile `source` into a [`Template`].
    ///
    /// # Errors
    ///
    /// [`TemplateError::Syntax`] with the byte offset of the first `%` that
    /// does not start a valid escape, or [`TemplateError::Empty`] when the
    /// template produces no parts at all.
    pub fn compile<S>(source: &'a S) -> Result<Self, TemplateError>
    where
        S: AsRef<[u8]> + ?Sized,
    {
        let bytes = source.as_ref();
        let mut parts = Vec::with_capacity(4);
        let mut max_space = 0;
        let mut max_zero = 0;
        let mut cursor = 0;

        while let Some(found) = bytes[cursor..].iter().position(|&b| b == b'%') {
            let at = cursor + found;
            let literal = &bytes[cursor..at];
            if !literal.is_empty() {
                parts.push(Part::Literal(literal));
            }

            let (part, consumed) = match bytes.get(at + 1).copied() {
                Some(b'i') => (Part::InputEcho, 2),
                Some(b't') => (Part::ClockFace, 2),
                Some(b's') => (Part::elapsed(Unit::Seconds), 2),
                Some(b'm') => (Part::elapsed(Unit::Milliseconds), 2),
                Some(b'u') => (Part::elapsed(Unit::Microseconds), 2),
                Some(b'%') if literal.is_empty() => (Part::PercentLiteral, 2),
                Some(b'%') => {
                    // The first `%` joins the literal pushed just above.
                    if let Some(Part::Literal(text)) = parts.last_mut() {
                        *text = &bytes[cursor..=at];
                    }
                    cursor = at + 2;
                    continue;
                }
                _ => {
                    let (unit, pad, consumed) = parse_padded(&bytes[at + 1..])
                        .ok_or(TemplateError::Syntax { position: at })?;
                    match pad.fill {
                        Fill::Space => max_space = max_space.max(pad.width),
                        Fill::Zero => max_zero = max_zero.max(pad.width),
                    }
                    (Part::Elapsed { unit, pad }, consumed)
                }
            };

            parts.push(part);
            cursor = at + consumed;
        }

        if cursor < bytes.len() {
            parts.push(Part::Literal(&bytes[cursor..]));
        }

        if parts.is_empty() {
            return Err(TemplateError::Empty);
        }

        let mut padding = vec![b' '; max_space];
        padding.resize(max_space + max_zero, b'0');

        for part in &mut parts {
            if let Part::Elapsed { pad, .. } = part {
                pad.offset = match pad.fill {
                    Fill::Space => 0,
                    Fill::Zero => max_space,
                };
            }
        }

        log::debug!(
            "compiled template into {} parts, {} padding bytes",
            parts.len(),
            padding.len()
        );

        Ok(Self {
            parts,
            padding: padding.into_boxed_slice(),
        })
    }

    /// The compiled parts, in output order.
    pub fn parts(&self) -> &[Part<'a>] {
        &self.parts
    }

    /// The shared padding buffer: spaces first, then zeros.
    pub fn padding(&self) -> &[u8] {
        &self.padding
    }

    /// Padding bytes available to a numeric part; exactly `pad.width` long.
    pub fn pad_bytes(&self, pad: Pad) -> &[u8] {
        &self.padding[pad.offset..pad.offset + pad.width]
    }

    /// Whether the last part echoes the input line.
    pub fn ends_with_input(&self) -> bool {
        matches!(self.parts.last(), Some(Part::InputEcho))
    }
}

/// Parse `[0]<digits><s|m|u>`, where `rest` starts just after the `%`.
///
/// Returns the unit, the padding and the escape length including the `%`.
/// A single `0` before the unit is a width of zero, not a fill flag.
fn parse_padded(rest: &[u8]) -> Option<(Unit, Pad, usize)> {
    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let unit = Unit::from_selector(*rest.get(digits)?)?;

    let (fill, width_digits) = if digits > 1 && rest[0] == b'0' {
        (Fill::Zero, &rest[1..digits])
    } else {
        (Fill::Space, &rest[..digits])
    };
    let width: u16 = std::str::from_utf8(width_digits).ok()?.parse().ok()?;

    Some((unit, Pad::new(fill, usize::from(width)), digits + 2))
}
