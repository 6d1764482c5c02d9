//! `%`-style placeholder scanning and format validation.
//!
//! A format string is split into literal segments around its argument
//! placeholders, and each placeholder is resolved to the argument it
//! refers to. Resolution doubles as validation: any placeholder the host
//! formatter would reject makes the whole template invalid, and callers
//! fall back to treating the raw string as plain text.
//!
//! Supported placeholder grammar:
//!
//! ```text
//! %[index$][flags][width][.precision][t|T]conversion
//! ```
//!
//! - A non-positional placeholder consumes the next unused argument.
//! - `%N$` refers to argument `N` (1-based). An out-of-range `N` is logged
//!   and replaced by the next unused argument without consuming it.
//! - The `<` flag reuses the previous placeholder's argument.
//! - `%%` and `%n` produce `%` and a newline and consume nothing.

use std::sync::OnceLock;

use chatcolors_style::Arg;
use regex::{Captures, Regex};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::warn;

const CONVERSIONS: &str = "bBhHsScCdoxXeEfgGaA";

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"%(?:([0-9]+)\$)?([-#+ 0,(<]*)?([0-9]+)?(\.[0-9]+)?([tT])?([a-zA-Z%])")
            .expect("placeholder pattern compiles")
    })
}

/// Why a format string cannot be expanded against its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A `%` that does not begin a recognizable placeholder.
    #[error("malformed placeholder at byte {offset}")]
    Malformed { offset: usize },
    /// A placeholder with a conversion letter the formatter does not know.
    #[error("unknown conversion '{0}'")]
    UnknownConversion(char),
    /// A placeholder referring past the end of the arguments.
    #[error("no argument for placeholder #{}", index + 1)]
    MissingArgument { index: usize },
    /// `<` flag on the first placeholder.
    #[error("'<' flag without a previous argument")]
    NoPreviousArgument,
    /// The argument cannot be rendered with the requested conversion.
    #[error("argument #{} is not compatible with conversion '{conversion}'", index + 1)]
    IllegalConversion { conversion: char, index: usize },
}

/// A format string split around its placeholders.
///
/// `segments.len() == args.len() + 1` always holds: segment `i` precedes
/// argument `i`, and the last segment trails the final placeholder (it
/// is empty when the string ends on a placeholder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTemplate<'a> {
    pub segments: Vec<String>,
    pub args: SmallVec<[&'a Arg; 4]>,
}

impl ParsedTemplate<'_> {
    /// Whether the string had no argument placeholders at all.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.args.is_empty()
    }
}

/// Split `format` around placeholders and resolve each against `args`.
pub fn parse_template<'a>(
    format: &str,
    args: &'a [Arg],
) -> Result<ParsedTemplate<'a>, FormatError> {
    let mut segments = Vec::new();
    let mut resolved: SmallVec<[&'a Arg; 4]> = SmallVec::new();
    let mut pending = String::new();
    let mut next_unused = 0usize;
    let mut previous: Option<usize> = None;
    let mut previous_end = 0usize;

    for caps in placeholder_re().captures_iter(format) {
        let Some(whole) = caps.get(0) else { continue };
        push_plain(&mut pending, format, previous_end, whole.start())?;
        previous_end = whole.end();

        let conversion = caps
            .get(6)
            .and_then(|m| m.as_str().chars().next())
            .unwrap_or('%');
        match conversion {
            '%' => {
                pending.push('%');
                continue;
            }
            'n' => {
                pending.push('\n');
                continue;
            }
            _ => {}
        }

        let index = resolve_index(&caps, args.len(), &mut next_unused, previous)?;
        if caps.get(5).is_some() {
            // Date/time conversions need temporal arguments, which chat never carries.
            return Err(FormatError::IllegalConversion { conversion, index });
        }
        check_conversion(conversion, &args[index], index)?;

        previous = Some(index);
        segments.push(std::mem::take(&mut pending));
        resolved.push(&args[index]);
    }
    push_plain(&mut pending, format, previous_end, format.len())?;
    segments.push(pending);

    Ok(ParsedTemplate {
        segments,
        args: resolved,
    })
}

fn push_plain(
    pending: &mut String,
    format: &str,
    start: usize,
    end: usize,
) -> Result<(), FormatError> {
    let gap = &format[start..end];
    if let Some(pos) = gap.find('%') {
        return Err(FormatError::Malformed { offset: start + pos });
    }
    pending.push_str(gap);
    Ok(())
}

fn resolve_index(
    caps: &Captures<'_>,
    len: usize,
    next_unused: &mut usize,
    previous: Option<usize>,
) -> Result<usize, FormatError> {
    if let Some(position) = caps.get(1) {
        let requested = position.as_str().parse::<usize>().unwrap_or(0);
        if (1..=len).contains(&requested) {
            return Ok(requested - 1);
        }
        warn!(
            index = requested,
            len, "placeholder index out of range, using next unused argument"
        );
        let fallback = *next_unused;
        return if fallback < len {
            Ok(fallback)
        } else {
            Err(FormatError::MissingArgument { index: fallback })
        };
    }

    let flags = caps.get(2).map_or("", |m| m.as_str());
    if flags.contains('<') {
        return previous.ok_or(FormatError::NoPreviousArgument);
    }

    let index = *next_unused;
    *next_unused += 1;
    if index < len {
        Ok(index)
    } else {
        Err(FormatError::MissingArgument { index })
    }
}

fn check_conversion(conversion: char, arg: &Arg, index: usize) -> Result<(), FormatError> {
    if !CONVERSIONS.contains(conversion) {
        return Err(FormatError::UnknownConversion(conversion));
    }
    let compatible = match (conversion.to_ascii_lowercase(), arg) {
        ('b' | 'h' | 's', _) => true,
        (_, Arg::Node(_)) => false,
        ('c', Arg::Opaque(value)) => {
            value.chars().count() == 1
                || value.parse::<u32>().ok().and_then(char::from_u32).is_some()
        }
        ('d' | 'o' | 'x', Arg::Opaque(value)) => value.parse::<i128>().is_ok(),
        (_, Arg::Opaque(value)) => value.parse::<f64>().is_ok(),
    };
    if compatible {
        Ok(())
    } else {
        Err(FormatError::IllegalConversion { conversion, index })
    }
}
