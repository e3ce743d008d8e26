//! Version stamping
//!
//! A [`ReplacementRule`] describes where a version literal lives in a file and
//! what it should look like after a release. The [`VersionStamper`] applies a
//! rule to one file, and [`stamp_all`] applies a list of rules with
//! all-or-nothing semantics across every file they touch.

mod plan;
mod rule;
mod stamper;

pub use plan::stamp_all;
pub use rule::{ExpectedOutcome, MatchPattern, ReplacementRule, VERSION_PLACEHOLDER};
pub use stamper::VersionStamper;
