//! Assignment cookie codec
//!
//! The assignment cookie stores which variation each experiment assigned to
//! the visitor: a leading domain hash followed by `.`-separated fields of the
//! form `experimentId$tag:variationSpec`. The `variationSpec` may carry
//! `-`-delimited legacy multi-values; only the leading integer is
//! semantically significant.
//!
//! Scanning is deliberately lenient: a field that does not match the grammar
//! is skipped as a match candidate and never raises an error. Total absence
//! of any `.` separator is the "no prior cookie" signal, not a failure.

use super::hash::domain_hash;
use super::{EXPERIMENT_SEPARATOR, FIELD_SEPARATOR, VALUE_SEPARATOR};
use crate::domain::experiment::{ChosenVariation, ExperimentId};

/// One decoded field of the assignment cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentField {
    pub experiment_id: String,
    /// Opaque marker carried through verbatim across updates. Observed as
    /// the literal `"0"` in practice, but any value must survive.
    pub tag: String,
    pub variation: i32,
}

/// Parse one `experimentId$tag:variationSpec` field, `None` when malformed.
fn parse_field(field: &str) -> Option<AssignmentField> {
    let (experiment_id, rest) = field.split_once(EXPERIMENT_SEPARATOR)?;
    let (tag, spec) = rest.split_once(VALUE_SEPARATOR)?;

    if experiment_id.is_empty() {
        return None;
    }

    Some(AssignmentField {
        experiment_id: experiment_id.to_string(),
        tag: tag.to_string(),
        variation: leading_integer(spec)?,
    })
}

/// Parse the leading integer of a `variationSpec`.
///
/// An optional sign is accepted so persisted sentinels round-trip; an
/// interior `-` still terminates the leading segment, which is how legacy
/// multi-values such as `1-2` decode to their first entry.
fn leading_integer(spec: &str) -> Option<i32> {
    let bytes = spec.as_bytes();
    let start = usize::from(bytes.first() == Some(&b'-'));
    let end = start
        + bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();

    if end == start {
        return None;
    }

    spec[..end].parse().ok()
}

/// Decode the variation previously assigned for `experiment_id`.
///
/// Returns `None` when the cookie has fewer than two `.`-fields or when no
/// well-formed field matches the id. The leading domain hash is ignored on
/// decode. The first syntactic match wins.
pub fn decode(value: &str, experiment_id: &ExperimentId) -> Option<ChosenVariation> {
    let mut fields = value.split(FIELD_SEPARATOR);
    fields.next()?; // domain hash

    fields
        .filter_map(parse_field)
        .find(|field| field.experiment_id == experiment_id.as_str())
        .map(|field| ChosenVariation::variation(field.variation))
}

/// Produce the updated cookie value assigning `variation` to `experiment_id`.
///
/// The previous value's leading domain hash is reused when it has at least
/// two `.`-fields; otherwise a fresh hash of `domain_name` is computed. An
/// existing field for the target id keeps its tag and only has its variation
/// replaced; duplicates beyond the first are dropped. Fields that do not
/// parse pass through verbatim. Pure function of its inputs.
pub fn update(
    previous: &str,
    experiment_id: &ExperimentId,
    variation: ChosenVariation,
    domain_name: &str,
) -> String {
    let parts: Vec<&str> = previous.split(FIELD_SEPARATOR).collect();
    let has_prior = parts.len() >= 2;
    let hash = if has_prior {
        parts[0].to_string()
    } else {
        domain_hash(domain_name).to_string()
    };
    let prior_fields: &[&str] = if has_prior { &parts[1..] } else { &[] };

    let mut fields: Vec<String> = Vec::with_capacity(prior_fields.len() + 1);
    let mut replaced = false;

    for &field in prior_fields {
        match parse_field(field) {
            Some(parsed) if parsed.experiment_id == experiment_id.as_str() => {
                if !replaced {
                    fields.push(format!(
                        "{}{EXPERIMENT_SEPARATOR}{}{VALUE_SEPARATOR}{}",
                        parsed.experiment_id,
                        parsed.tag,
                        variation.value()
                    ));
                    replaced = true;
                }
                // duplicate fields for the target id are dropped
            }
            _ => fields.push(field.to_string()),
        }
    }

    if !replaced {
        fields.push(format!(
            "{}{EXPERIMENT_SEPARATOR}0{VALUE_SEPARATOR}{}",
            experiment_id.as_str(),
            variation.value()
        ));
    }

    let mut value = hash;
    for field in fields {
        value.push(FIELD_SEPARATOR);
        value.push_str(&field);
    }
    value
}
