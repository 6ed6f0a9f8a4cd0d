//! Input and output records for the user-data processor.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Untrusted user-data record as supplied by a caller
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub age: Option<AgeValue>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub activities: Option<Vec<Activity>>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
}

/// Age as supplied: either a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AgeValue {
    Number(f64),
    Text(String),
}

impl AgeValue {
    /// Values that count as "not supplied": zero, NaN and the empty string
    pub fn is_blank(&self) -> bool {
        match self {
            AgeValue::Number(n) => *n == 0.0 || n.is_nan(),
            AgeValue::Text(s) => s.is_empty(),
        }
    }

    /// Numeric value, if there is a finite one. Surrounding whitespace is ignored,
    /// a whitespace-only string reads as zero, and unsigned `0x`/`0o`/`0b`
    /// literals are read in their radix.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            AgeValue::Number(n) => *n,
            AgeValue::Text(s) => parse_numeric_text(s.trim())?,
        };
        value.is_finite().then_some(value)
    }

    /// Whole-year age. Numbers are truncated toward zero; strings are scanned
    /// for a leading integer (optional sign, then decimal digits or a `0x`
    /// hex literal) and the rest ignored, so `"12.9"` is 12 and `"1e3"` is 1.
    /// `None` when there is no leading integer, it is negative, or it does not
    /// fit in a `u64`.
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            AgeValue::Number(n) => whole_number(*n),
            AgeValue::Text(s) => scan_leading_integer(s),
        }
    }
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    if text.is_empty() {
        return Some(0.0);
    }
    let radix = match text.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => return text.parse::<f64>().ok(),
    };
    let digits = &text[2..];
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(|n| n as f64)
}

/// 2^64, the first value a `u64` cannot hold
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

fn whole_number(n: f64) -> Option<u64> {
    let whole = n.trunc();
    // the range check makes the cast exact
    (whole.is_finite() && whole >= 0.0 && whole < U64_LIMIT).then(|| whole as u64)
}

fn scan_leading_integer(text: &str) -> Option<u64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    let value = u64::from_str_radix(&digits[..end], radix).ok()?;
    (!negative || value == 0).then_some(value)
}

impl From<&str> for AgeValue {
    fn from(age: &str) -> Self {
        AgeValue::Text(age.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: String,
}

impl Activity {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

/// Normalized profile built from a valid record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedProfile {
    pub id: String,
    pub display_name: String,
    pub contact_info: ContactInfo,
    pub age: u64,
    pub age_group: AgeGroup,
    pub registration_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_stats: Option<ActivityStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgeGroup {
    #[serde(rename = "under18")]
    Under18,
    #[serde(rename = "18-29")]
    From18To29,
    #[serde(rename = "30-49")]
    From30To49,
    #[serde(rename = "50-64")]
    From50To64,
    #[serde(rename = "65plus")]
    SixtyFivePlus,
}

impl AgeGroup {
    pub fn for_age(age: u64) -> Self {
        match age {
            0..=17 => AgeGroup::Under18,
            18..=29 => AgeGroup::From18To29,
            30..=49 => AgeGroup::From30To49,
            50..=64 => AgeGroup::From50To64,
            _ => AgeGroup::SixtyFivePlus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Under18 => "under18",
            AgeGroup::From18To29 => "18-29",
            AgeGroup::From30To49 => "30-49",
            AgeGroup::From50To64 => "50-64",
            AgeGroup::SixtyFivePlus => "65plus",
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityStats {
    pub total: usize,
    pub categories: CategoryCounts,
}

impl ActivityStats {
    pub fn from_activities(activities: &[Activity]) -> Self {
        let mut categories = CategoryCounts::default();
        for activity in activities {
            categories.increment(&activity.kind);
        }
        Self {
            total: activities.len(),
            categories,
        }
    }
}

/// Per-type activity counts, kept in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCounts(Vec<(String, usize)>);

impl CategoryCounts {
    pub fn increment(&mut self, kind: &str) {
        match self.0.iter_mut().find(|(name, _)| name == kind) {
            Some((_, count)) => *count += 1,
            None => self.0.push((kind.to_string(), 1)),
        }
    }

    pub fn get(&self, kind: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|(name, _)| name == kind)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_deserialize_camel_case() {
        let input: UserInput = serde_json::from_str(
            r#"{"name":"Ann","lastName":"Lee","email":"a@b.com","age":"25",
                "activities":[{"type":"run"}],"interests":["music"]}"#,
        )
        .unwrap();

        assert_eq!(input.last_name.as_deref(), Some("Lee"));
        assert_eq!(input.age, Some(AgeValue::Text("25".into())));
        assert_eq!(input.activities, Some(vec![Activity::new("run")]));
        assert_eq!(input.phone, None);
    }

    #[test]
    fn test_deserialize_numeric_age_and_null() {
        let input: UserInput = serde_json::from_str(r#"{"age":42,"phone":null}"#).unwrap();
        assert_eq!(input.age, Some(AgeValue::Number(42.0)));
        assert_eq!(input.phone, None);
    }

    #[test]
    fn test_non_array_activities_rejected() {
        let result = serde_json::from_str::<UserInput>(r#"{"activities":"running"}"#);
        assert!(result.is_err());
    }

    #[rstest]
    #[case(AgeValue::Number(0.0), true)]
    #[case(AgeValue::Number(f64::NAN), true)]
    #[case(AgeValue::Text(String::new()), true)]
    #[case(AgeValue::Text("0".into()), false)]
    #[case(AgeValue::Number(-1.0), false)]
    #[case(AgeValue::Text(" ".into()), false)]
    fn blank_ages(#[case] age: AgeValue, #[case] expected: bool) {
        assert_eq!(age.is_blank(), expected);
    }

    #[rstest]
    #[case(AgeValue::Number(25.0), Some(25.0))]
    #[case(AgeValue::Text(" 31 ".into()), Some(31.0))]
    #[case(AgeValue::Text("12.5".into()), Some(12.5))]
    #[case(AgeValue::Text("  ".into()), Some(0.0))]
    #[case(AgeValue::Text("abc".into()), None)]
    #[case(AgeValue::Text("inf".into()), None)]
    #[case(AgeValue::Number(f64::INFINITY), None)]
    #[case(AgeValue::Text("1e3".into()), Some(1000.0))]
    #[case(AgeValue::Text("0x1A".into()), Some(26.0))]
    #[case(AgeValue::Text("0b101".into()), Some(5.0))]
    #[case(AgeValue::Text("0x+1A".into()), None)]
    #[case(AgeValue::Text("-0x1A".into()), None)]
    fn numeric_ages(#[case] age: AgeValue, #[case] expected: Option<f64>) {
        assert_eq!(age.as_number(), expected);
    }

    #[rstest]
    #[case(AgeValue::Text("1e3".into()), Some(1))]
    #[case(AgeValue::Text("0x1A".into()), Some(26))]
    #[case(AgeValue::Text("0X1a".into()), Some(26))]
    #[case(AgeValue::Text("12.9".into()), Some(12))]
    #[case(AgeValue::Text(" 42 years".into()), Some(42))]
    #[case(AgeValue::Text("+7".into()), Some(7))]
    #[case(AgeValue::Text("-0".into()), Some(0))]
    #[case(AgeValue::Text("0b101".into()), Some(0))]
    #[case(AgeValue::Text("-3".into()), None)]
    #[case(AgeValue::Text(".5".into()), None)]
    #[case(AgeValue::Text("99999999999999999999999".into()), None)]
    #[case(AgeValue::Number(12.9), Some(12))]
    #[case(AgeValue::Number(5e9), Some(5_000_000_000))]
    #[case(AgeValue::Number(1e20), None)]
    #[case(AgeValue::Number(-1.0), None)]
    fn integer_ages(#[case] age: AgeValue, #[case] expected: Option<u64>) {
        assert_eq!(age.as_integer(), expected);
    }

    #[rstest]
    #[case(0, AgeGroup::Under18)]
    #[case(17, AgeGroup::Under18)]
    #[case(18, AgeGroup::From18To29)]
    #[case(29, AgeGroup::From18To29)]
    #[case(30, AgeGroup::From30To49)]
    #[case(49, AgeGroup::From30To49)]
    #[case(50, AgeGroup::From50To64)]
    #[case(64, AgeGroup::From50To64)]
    #[case(65, AgeGroup::SixtyFivePlus)]
    #[case(120, AgeGroup::SixtyFivePlus)]
    fn age_group_boundaries(#[case] age: u64, #[case] expected: AgeGroup) {
        assert_eq!(AgeGroup::for_age(age), expected);
    }

    #[test]
    fn test_age_group_labels_match_serialization() {
        for group in [
            AgeGroup::Under18,
            AgeGroup::From18To29,
            AgeGroup::From30To49,
            AgeGroup::From50To64,
            AgeGroup::SixtyFivePlus,
        ] {
            assert_eq!(
                serde_json::to_value(group).unwrap(),
                serde_json::Value::String(group.to_string())
            );
        }
    }

    #[test]
    fn test_activity_stats_keep_first_seen_order() {
        let stats = ActivityStats::from_activities(&[
            Activity::new("swim"),
            Activity::new("run"),
            Activity::new("swim"),
        ]);

        assert_eq!(stats.total, 3);
        let order: Vec<_> = stats.categories.iter().collect();
        assert_eq!(order, vec![("swim", 2), ("run", 1)]);
        assert_eq!(
            serde_json::to_string(&stats.categories).unwrap(),
            r#"{"swim":2,"run":1}"#
        );
    }

    #[test]
    fn test_empty_activity_stats() {
        let stats = ActivityStats::from_activities(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.categories.is_empty());
        assert_eq!(
            serde_json::to_value(&stats).unwrap(),
            serde_json::json!({"total": 0, "categories": {}})
        );
    }
}
