//! OpenJD integer range expressions.
//!
//! An expression is a comma separated list of items. Each item is a single
//! integer (`7`), an inclusive span (`1-10`) or a span with a step
//! (`1-10:2`, `10-1:-3`). Items expand in the order written, so the result is
//! positional like any other task range.

use super::TemplateError;

/// Upper bound on the number of entries a single expression may expand to.
const MAX_RANGE_ENTRIES: usize = 1_000_000;

/// Expands an integer range expression into its string-encoded entries.
///
/// # Errors
///
/// Returns `TemplateError::InvalidRange` for malformed items, a zero step, a
/// step pointing away from the end of the span, or an expansion larger than
/// one million entries.
///
/// # Examples
///
/// ```rust
/// use jobkit_core::template::expand_int_range;
///
/// assert_eq!(expand_int_range("1-5:2").unwrap(), vec!["1", "3", "5"]);
/// assert_eq!(expand_int_range("3,1-2").unwrap(), vec!["3", "1", "2"]);
/// ```
pub fn expand_int_range(expression: &str) -> Result<Vec<String>, TemplateError> {
    let invalid = |reason: String| TemplateError::InvalidRange {
        expression: expression.to_string(),
        reason,
    };

    let mut entries = Vec::new();
    for item in expression.split(',') {
        let item = item.trim();
        if item.is_empty() {
            return Err(invalid("empty item".to_string()));
        }

        let (span, step) = match item.split_once(':') {
            Some((span, step)) => {
                let step = parse_int(step).ok_or_else(|| invalid(format!("bad step '{step}'")))?;
                (span.trim(), Some(step))
            }
            None => (item, None),
        };

        let (start, end) = split_span(span).ok_or_else(|| invalid(format!("bad item '{item}'")))?;
        let step = step.unwrap_or(if start <= end { 1 } else { -1 });
        if step == 0 {
            return Err(invalid("step must not be zero".to_string()));
        }
        // i64 bounds never overflow once widened
        let distance = i128::from(end) - i128::from(start);
        let stride = i128::from(step);
        if distance.signum() * stride.signum() < 0 {
            return Err(invalid(format!(
                "step {step} does not move from {start} towards {end}"
            )));
        }

        let count = distance / stride + 1;
        let limit = (MAX_RANGE_ENTRIES - entries.len()) as i128;
        if count > limit {
            return Err(invalid(format!(
                "expands to more than {MAX_RANGE_ENTRIES} entries"
            )));
        }
        let start = i128::from(start);
        entries.extend((0..count).map(|i| (start + i * stride).to_string()));
    }

    Ok(entries)
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

/// Splits `a-b` into its bounds, allowing negative numbers on either side.
/// A lone integer is a span of one.
fn split_span(span: &str) -> Option<(i64, i64)> {
    if let Some(value) = parse_int(span) {
        return Some((value, value));
    }
    // Skip the first character so a leading minus sign is not a separator.
    let separator = span
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '-')
        .map(|(i, _)| i)?;
    let start = parse_int(&span[..separator])?;
    let end = parse_int(&span[separator + 1..])?;
    Some((start, end))
}
