//! Cookie state protocol
//!
//! Two textual, `.`-delimited cookie formats shared with the tracking
//! system's client-side code. The assignment cookie records which variation
//! each experiment assigned; the timestamp cookie records when. Both start
//! with a fingerprint of the site's domain name.
//!
//! The wire constants below must match the external client byte for byte.

pub mod assignment;
pub mod hash;
pub mod timestamp;

pub use assignment::AssignmentField;
pub use hash::domain_hash;
pub use timestamp::TimestampField;

/// Separator between the domain hash and per-experiment fields.
pub const FIELD_SEPARATOR: char = '.';

/// Separator between an experiment id and its tag.
pub const EXPERIMENT_SEPARATOR: char = '$';

/// Separator between the tag and the per-field values.
pub const VALUE_SEPARATOR: char = ':';

/// Name of the assignment cookie as set by the tracking client.
pub const ASSIGNMENT_COOKIE_NAME: &str = "__utmx";

/// Name of the timestamp cookie as set by the tracking client.
pub const TIMESTAMP_COOKIE_NAME: &str = "__utmxx";

/// Lifetime written into newly appended timestamp fields. The literal
/// mirrors the external client's hardcoded value; it is part of the wire
/// format, not a tunable.
pub const TIMESTAMP_COOKIE_TTL_SECS: u64 = 8_035_200;
