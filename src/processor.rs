//! Validation and reshaping of user-data records into normalized profiles.
//!
//! `UserDataProcessor::process` has three outcomes:
//!
//! - `None`: no record was supplied. A `Diagnostic::NoInput` is reported.
//! - `Some(ProcessResult::Invalid { .. })`: one or more rules failed. Every
//!   failure is listed in rule order and reported as one diagnostic.
//! - `Some(ProcessResult::Valid { .. })`: the normalized profile. Nothing is reported.
//!
//! Time and diagnostics are injected, so tests can pin the clock and capture
//! reports without touching global state:
//!
//! ```rust
//! use userdata_processor::{FixedClock, MemorySink, ProcessResult, UserDataProcessor, UserInput};
//!
//! let sink = MemorySink::new();
//! let processor = UserDataProcessor::new()
//!     .with_clock(FixedClock::from_millis(1_700_000_000_000))
//!     .with_sink(sink.clone());
//!
//! let input = UserInput {
//!     name: Some("Ann".into()),
//!     email: Some("ann@example.com".into()),
//!     age: Some("25".into()),
//!     ..Default::default()
//! };
//!
//! match processor.process(Some(&input)) {
//!     Some(ProcessResult::Valid { data }) => assert_eq!(data.id, "user_ann_1700000000000"),
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! assert!(sink.is_empty());
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::ProcessorConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::record::{ActivityStats, AgeGroup, AgeValue, ContactInfo, ProcessedProfile, UserInput};
use crate::validation::validate;

/// Returned for any non-empty interest list
pub const PLACEHOLDER_RECOMMENDATIONS: [&str; 3] =
    ["recommendation1", "recommendation2", "recommendation3"];

static NON_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]").expect("static pattern compiles"));

/// Outcome of processing a supplied record
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessResult {
    Invalid { errors: Vec<String> },
    Valid { data: ProcessedProfile },
}

impl ProcessResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ProcessResult::Valid { .. })
    }

    pub fn errors(&self) -> &[String] {
        match self {
            ProcessResult::Invalid { errors } => errors,
            ProcessResult::Valid { .. } => &[],
        }
    }

    pub fn profile(&self) -> Option<&ProcessedProfile> {
        match self {
            ProcessResult::Valid { data } => Some(data),
            ProcessResult::Invalid { .. } => None,
        }
    }
}

/// Wire shape of a `ProcessResult`: `{"success": bool, "errors"|"data": ...}`
#[derive(Debug, Serialize)]
pub struct ProcessResponse<'a> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<&'a ProcessedProfile>,
}

impl<'a> From<&'a ProcessResult> for ProcessResponse<'a> {
    fn from(result: &'a ProcessResult) -> Self {
        match result {
            ProcessResult::Invalid { errors } => Self {
                success: false,
                errors: Some(errors),
                data: None,
            },
            ProcessResult::Valid { data } => Self {
                success: true,
                errors: None,
                data: Some(data),
            },
        }
    }
}

impl Serialize for ProcessResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ProcessResponse::from(self).serialize(serializer)
    }
}

#[derive(Debug, Clone)]
pub struct UserDataProcessor<C = SystemClock, S = TracingSink> {
    clock: C,
    sink: S,
    config: ProcessorConfig,
}

impl UserDataProcessor {
    pub fn new() -> Self {
        Self {
            clock: SystemClock,
            sink: TracingSink,
            config: ProcessorConfig::default(),
        }
    }
}

impl Default for UserDataProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, S: DiagnosticSink> UserDataProcessor<C, S> {
    pub fn with_clock<C2: Clock>(self, clock: C2) -> UserDataProcessor<C2, S> {
        UserDataProcessor {
            clock,
            sink: self.sink,
            config: self.config,
        }
    }

    pub fn with_sink<S2: DiagnosticSink>(self, sink: S2) -> UserDataProcessor<C, S2> {
        UserDataProcessor {
            clock: self.clock,
            sink,
            config: self.config,
        }
    }

    pub fn with_config(mut self, config: ProcessorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn process(&self, input: Option<&UserInput>) -> Option<ProcessResult> {
        let Some(input) = input else {
            self.sink.report(Diagnostic::NoInput);
            return None;
        };

        let errors: Vec<String> = validate(input).iter().map(ToString::to_string).collect();
        if !errors.is_empty() {
            self.sink.report(Diagnostic::ValidationFailed(errors.clone()));
            return Some(ProcessResult::Invalid { errors });
        }

        let data = self.build_profile(input);
        debug!("Processed profile {}", data.id);
        Some(ProcessResult::Valid { data })
    }

    /// Assumes `input` passed validation
    fn build_profile(&self, input: &UserInput) -> ProcessedProfile {
        let name = input.name.as_deref().unwrap_or_default();
        let email = input.email.as_deref().unwrap_or_default();
        let age = input
            .age
            .as_ref()
            .and_then(AgeValue::as_integer)
            .unwrap_or_default();

        ProcessedProfile {
            id: self.generate_id(name),
            display_name: display_name(name, input.last_name.as_deref()),
            contact_info: ContactInfo {
                email: email.to_lowercase(),
                phone: normalize_phone(input.phone.as_deref()),
            },
            age,
            age_group: AgeGroup::for_age(age),
            registration_date: self.clock.now(),
            last_updated: self.clock.now(),
            activity_stats: input
                .activities
                .as_deref()
                .map(ActivityStats::from_activities),
            recommendations: input
                .interests
                .as_deref()
                .filter(|interests| !interests.is_empty())
                .map(recommendations_for),
        }
    }

    /// Prefix, lowercased leading name characters, epoch millis. Two calls in
    /// the same millisecond for the same name prefix collide.
    fn generate_id(&self, name: &str) -> String {
        let short: String = name
            .chars()
            .take(self.config.name_prefix_len)
            .collect::<String>()
            .to_lowercase();
        format!(
            "{}{}_{}",
            self.config.id_prefix,
            short,
            self.clock.now().timestamp_millis()
        )
    }
}

fn display_name(name: &str, last_name: Option<&str>) -> String {
    format!("{} {}", name, last_name.unwrap_or_default())
        .trim()
        .to_string()
}

/// Keep ASCII digits only; no phone formatting is attempted
pub fn normalize_phone(phone: Option<&str>) -> String {
    match phone {
        Some(phone) => NON_DIGIT.replace_all(phone, "").into_owned(),
        None => String::new(),
    }
}

/// Placeholder: the same three entries whatever the interests are
pub fn recommendations_for(_interests: &[String]) -> Vec<String> {
    PLACEHOLDER_RECOMMENDATIONS
        .iter()
        .map(|r| r.to_string())
        .collect()
}
