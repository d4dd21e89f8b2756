//! Timestamp cookie codec
//!
//! The timestamp cookie records when each experiment assignment was made: a
//! leading domain hash followed by `.`-separated fields of the form
//! `experimentId$tag:timestamp:ttl[:trailing]`. The optional trailing
//! segment is opaque: passed through unchanged when present, never
//! generated from scratch.
//!
//! Field scanning follows the same leniency rule as the assignment codec:
//! malformed fields never raise an error.

use super::hash::domain_hash;
use super::{EXPERIMENT_SEPARATOR, FIELD_SEPARATOR, TIMESTAMP_COOKIE_TTL_SECS, VALUE_SEPARATOR};
use crate::domain::experiment::ExperimentId;

/// One decoded field of the timestamp cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampField {
    pub experiment_id: String,
    /// Opaque marker carried through verbatim across updates.
    pub tag: String,
    /// Seconds since epoch at which the assignment was recorded.
    pub timestamp: u64,
    /// Lifetime in seconds, as written by whichever client created the field.
    pub ttl_seconds: u64,
    /// Optional opaque remainder, preserved byte for byte.
    pub trailing: Option<String>,
}

/// Parse one `experimentId$tag:timestamp:ttl[:trailing]` field.
fn parse_field(field: &str) -> Option<TimestampField> {
    let (experiment_id, rest) = field.split_once(EXPERIMENT_SEPARATOR)?;
    let (tag, values) = rest.split_once(VALUE_SEPARATOR)?;

    if experiment_id.is_empty() {
        return None;
    }

    let mut segments = values.splitn(3, VALUE_SEPARATOR);
    let timestamp = segments.next()?.parse().ok()?;
    let ttl_seconds = segments.next()?.parse().ok()?;
    let trailing = segments.next().map(str::to_string);

    Some(TimestampField {
        experiment_id: experiment_id.to_string(),
        tag: tag.to_string(),
        timestamp,
        ttl_seconds,
        trailing,
    })
}

fn format_field(field: &TimestampField) -> String {
    let mut formatted = format!(
        "{}{EXPERIMENT_SEPARATOR}{}{VALUE_SEPARATOR}{}{VALUE_SEPARATOR}{}",
        field.experiment_id, field.tag, field.timestamp, field.ttl_seconds
    );

    if let Some(trailing) = &field.trailing {
        formatted.push(VALUE_SEPARATOR);
        formatted.push_str(trailing);
    }

    formatted
}

/// Decode the timestamp field previously recorded for `experiment_id`.
pub fn decode(value: &str, experiment_id: &ExperimentId) -> Option<TimestampField> {
    let mut fields = value.split(FIELD_SEPARATOR);
    fields.next()?; // domain hash

    fields
        .filter_map(parse_field)
        .find(|field| field.experiment_id == experiment_id.as_str())
}

/// Produce the updated cookie value stamping `experiment_id` at `now`.
///
/// Domain-hash reuse follows the assignment codec's rule. An existing field
/// for the target id has only its timestamp replaced; tag, ttl and trailing
/// are kept verbatim. A new field is appended as
/// `experimentId$0:now:8035200`; the TTL literal mirrors the external
/// client and is deliberately not parameterized. Pure function of its inputs.
pub fn update(previous: &str, experiment_id: &ExperimentId, now: u64, domain_name: &str) -> String {
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
            Some(mut parsed) if parsed.experiment_id == experiment_id.as_str() => {
                if !replaced {
                    parsed.timestamp = now;
                    fields.push(format_field(&parsed));
                    replaced = true;
                }
                // duplicate fields for the target id are dropped
            }
            _ => fields.push(field.to_string()),
        }
    }

    if !replaced {
        fields.push(format!(
            "{}{EXPERIMENT_SEPARATOR}0{VALUE_SEPARATOR}{}{VALUE_SEPARATOR}{}",
            experiment_id.as_str(),
            now,
            TIMESTAMP_COOKIE_TTL_SECS
        ));
    }

    let mut value = hash;
    for field in fields {
        value.push(FIELD_SEPARATOR);
        value.push_str(&field);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> ExperimentId {
        ExperimentId::new(raw).unwrap()
    }

    mod decode_tests {
        use super::*;

        #[test]
        fn finds_the_matching_field() {
            let cookie = "159991919.myExp$0:1000:8035200";
            let field = decode(cookie, &id("myExp")).unwrap();

            assert_eq!(field.tag, "0");
            assert_eq!(field.timestamp, 1000);
            assert_eq!(field.ttl_seconds, 8_035_200);
            assert_eq!(field.trailing, None);
        }

        #[test]
        fn trailing_segment_is_captured_verbatim() {
            let cookie = "159991919.myExp$0:1000:8035200:extra:stuff";
            let field = decode(cookie, &id("myExp")).unwrap();

            assert_eq!(field.trailing.as_deref(), Some("extra:stuff"));
        }

        #[test]
        fn missing_ttl_is_malformed() {
            let cookie = "159991919.myExp$0:1000";
            assert_eq!(decode(cookie, &id("myExp")), None);
        }

        #[test]
        fn fewer_than_two_fields_is_absent() {
            assert_eq!(decode("", &id("myExp")), None);
            assert_eq!(decode("159991919", &id("myExp")), None);
        }
    }

    mod update_tests {
        use super::*;

        #[test]
        fn empty_prior_appends_with_fixed_ttl() {
            // Concrete scenario: empty prior, now=1000, domain "example.com".
            let value = update("", &id("myExp"), 1000, "example.com");
            assert_eq!(
                value,
                format!("{}.myExp$0:1000:8035200", domain_hash("example.com"))
            );
        }

        #[test]
        fn existing_field_gets_a_new_timestamp_only() {
            let prior = "159991919.myExp$3:1000:12345:opaque";
            let value = update(prior, &id("myExp"), 2000, "example.com");
            assert_eq!(value, "159991919.myExp$3:2000:12345:opaque");
        }

        #[test]
        fn other_experiments_are_untouched() {
            let prior = "159991919.other$0:500:8035200";
            let value = update(prior, &id("myExp"), 1000, "example.com");
            assert_eq!(value, "159991919.other$0:500:8035200.myExp$0:1000:8035200");
        }

        #[test]
        fn existing_hash_is_reused() {
            let prior = "42.other$0:500:8035200";
            let value = update(prior, &id("myExp"), 1000, "example.com");
            assert!(value.starts_with("42."));
        }

        #[test]
        fn malformed_fields_pass_through_verbatim() {
            let prior = "159991919.not-a-field";
            let value = update(prior, &id("myExp"), 1000, "example.com");
            assert_eq!(value, "159991919.not-a-field.myExp$0:1000:8035200");
        }

        #[test]
        fn double_update_keeps_one_field_per_experiment() {
            let first = update("", &id("myExp"), 1000, "example.com");
            let second = update(&first, &id("myExp"), 2000, "example.com");

            assert_eq!(second.matches("myExp").count(), 1);
            assert_eq!(decode(&second, &id("myExp")).unwrap().timestamp, 2000);
        }

        #[test]
        fn trailing_survives_a_timestamp_refresh() {
            let first = "159991919.myExp$0:1000:8035200:session=abc";
            let second = update(first, &id("myExp"), 5000, "example.com");
            let field = decode(&second, &id("myExp")).unwrap();

            assert_eq!(field.timestamp, 5000);
            assert_eq!(field.trailing.as_deref(), Some("session=abc"));
        }
    }
}
