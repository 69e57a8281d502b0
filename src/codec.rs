//! Single character encoding of points and the string forms built on it.
//!
//! Points 0 to 9 are written as `'0'` to `'9'` and points 10 to 35 as `'A'` to `'Z'`. A permutation
//! is either written in flat form, as the concatenated images of its domain, or in cycle notation,
//! as a sequence of parenthesized cycles like `(012)(34)`.
use std::fmt;

use crate::config::Config;
use crate::error::{EncodingError, ValidationError};
use crate::El;

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The character encoding a point.
pub fn get_char(value: El) -> Result<char, EncodingError> {
    ALPHABET
        .get(value as usize)
        .map(|&byte| byte as char)
        .ok_or(EncodingError::ValueOutOfRange(value))
}

/// The point encoded by a character.
pub fn parse_char(ch: char) -> Result<El, EncodingError> {
    match ch {
        '0'..='9' => Ok(ch as El - '0' as El),
        'A'..='Z' => Ok(ch as El - 'A' as El + 10),
        _ => Err(EncodingError::InvalidChar(ch)),
    }
}

/// Write points without any separators.
pub(crate) fn write_points<W, I>(w: &mut W, points: I) -> fmt::Result
where
    W: fmt::Write + ?Sized,
    I: IntoIterator<Item = El>,
{
    for point in points {
        w.write_char(get_char(point).map_err(|_| fmt::Error)?)?;
    }
    Ok(())
}

/// Write a single parenthesized cycle.
pub(crate) fn write_cycle<W, I>(w: &mut W, cycle: I) -> fmt::Result
where
    W: fmt::Write + ?Sized,
    I: IntoIterator<Item = El>,
{
    w.write_char('(')?;
    write_points(w, cycle)?;
    w.write_char(')')
}

/// Decode a string in flat form into the images of a permutation's domain.
///
/// The result covers the points up to the largest point mentioned. Characters past that point are
/// dropped and positions past the end of the string are filled with fixed points. The result is
/// not validated.
pub(crate) fn parse_flat(s: &str, config: Config) -> Result<Vec<El>, EncodingError> {
    let mut values = s.chars().map(parse_char).collect::<Result<Vec<El>, _>>()?;

    let max_char = match values.iter().max() {
        Some(&max_char) => max_char,
        None => return Ok(values),
    };

    let base = config.base();
    let len = (max_char + 1).saturating_sub(base) as usize;
    values.truncate(len);
    for offset in values.len()..len {
        values.push(base + offset as El);
    }

    Ok(values)
}

/// Split a string in cycle notation into its cycles.
///
/// Text outside of parentheses is ignored and groups with fewer than two points are dropped.
/// Whitespace inside a group is ignored as well.
pub(crate) fn parse_cycles(s: &str) -> Result<Vec<Vec<El>>, EncodingError> {
    let mut cycles = vec![];
    let mut open: Option<(usize, Vec<El>)> = None;

    for (pos, ch) in s.chars().enumerate() {
        if ch.is_whitespace() {
            continue;
        }
        match ch {
            '(' => {
                if open.is_some() {
                    return Err(EncodingError::NestedCycle { pos });
                }
                open = Some((pos, vec![]));
            }
            ')' => {
                if let Some((_, cycle)) = open.take() {
                    if cycle.len() >= 2 {
                        cycles.push(cycle);
                    }
                }
            }
            _ => {
                if let Some((_, cycle)) = &mut open {
                    let value = parse_char(ch)?;
                    if cycle.contains(&value) {
                        return Err(EncodingError::RepeatedInCycle { value });
                    }
                    cycle.push(value);
                }
            }
        }
    }

    if let Some((pos, _)) = open {
        return Err(EncodingError::UnterminatedCycle { pos });
    }

    Ok(cycles)
}

/// Image of a point under a single cycle.
fn cycle_image(cycle: &[El], point: El) -> El {
    match cycle.iter().position(|&p| p == point) {
        Some(i) => cycle[(i + 1) % cycle.len()],
        None => point,
    }
}

/// Evaluate a product of cycles on the points `base..=last`.
///
/// Cycles are applied from right to left, so the last cycle in `cycles` acts first. When `last`
/// is not given it is the largest point in any cycle. The result is not validated.
pub(crate) fn eval_cycles(
    cycles: &[Vec<El>],
    last: Option<El>,
    config: Config,
) -> Result<Vec<El>, EncodingError> {
    let last = match last.or_else(|| cycles.iter().flatten().max().copied()) {
        Some(last) => last,
        None => return Ok(vec![]),
    };

    // Avoid building huge arrays for an explicit `last` that cannot be valid anyway.
    if last > config.max_index() {
        debug_log!(last, "last point of cycle string out of range");
        return Err(ValidationError::OutOfRange {
            value: last,
            min: config.base(),
            max: config.max_index(),
        }
        .into());
    }

    Ok((config.base()..=last)
        .map(|point| {
            cycles
                .iter()
                .rev()
                .fold(point, |point, cycle| cycle_image(cycle, point))
        })
        .collect())
}
