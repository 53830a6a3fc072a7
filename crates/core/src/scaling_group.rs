use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw provider records
// ---------------------------------------------------------------------------

/// Response of a "describe Auto Scaling groups by name" call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescribeScalingGroupsOutput {
    /// Zero or more groups matching the requested names.
    #[serde(default)]
    pub auto_scaling_groups: Vec<RawScalingGroup>,
}

impl DescribeScalingGroupsOutput {
    /// Build an output from a list of records.
    pub fn new(auto_scaling_groups: Vec<RawScalingGroup>) -> Self {
        Self {
            auto_scaling_groups,
        }
    }

    /// An output with no matching groups.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A numeric count as the provider reports it.
///
/// The SDK hands back integers, but fixtures and other transports may carry
/// string-encoded or floating point numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawCount {
    /// Coerce to an integer.
    ///
    /// Text is read as leading whitespace, an optional sign and the leading
    /// run of digits (underscores allowed between digits). Anything after
    /// that is ignored, and text without leading digits yields `0`. Floats
    /// truncate toward zero.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_i64(&self) -> i64 {
        match self {
            Self::Integer(n) => *n,
            Self::Float(f) => f.trunc() as i64,
            Self::Text(s) => parse_leading_integer(s),
        }
    }
}

impl From<i64> for RawCount {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for RawCount {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<&str> for RawCount {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

fn parse_leading_integer(s: &str) -> i64 {
    let mut chars = s.trim_start().chars().peekable();
    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    while let Some(&c) = chars.peek() {
        if let Some(d) = c.to_digit(10) {
            value = value.saturating_mul(10).saturating_add(i64::from(d));
            seen_digit = true;
            chars.next();
        } else if c == '_' && seen_digit {
            chars.next();
            // A separator only counts when another digit follows it.
            if !chars.peek().is_some_and(char::is_ascii_digit) {
                break;
            }
        } else {
            break;
        }
    }

    if negative { -value } else { value }
}

/// A tag record attached to an Auto Scaling group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTag {
    pub resource_id: Option<String>,
    pub resource_type: Option<String>,
    pub key: Option<String>,
    pub value: Option<String>,
    pub propagate_at_launch: Option<bool>,
}

/// One Auto Scaling group as returned by the provider, fields untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawScalingGroup {
    pub auto_scaling_group_name: Option<String>,
    pub min_size: Option<RawCount>,
    pub max_size: Option<RawCount>,
    pub desired_capacity: Option<RawCount>,
    pub health_check_type: Option<String>,
    /// Comma-joined subnet identifiers.
    pub vpc_zone_identifier: Option<String>,
    pub launch_configuration_name: Option<String>,
    pub tags: Vec<RawTag>,
}

// ---------------------------------------------------------------------------
// Normalized model
// ---------------------------------------------------------------------------

/// Normalized tag: one entry per provider tag record, fields carried over
/// one-to-one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingGroupTag {
    pub resource_id: String,
    pub resource_type: String,
    pub key: String,
    pub value: String,
    pub propagate_at_launch: bool,
}

impl From<&RawTag> for ScalingGroupTag {
    fn from(raw: &RawTag) -> Self {
        Self {
            resource_id: raw.resource_id.clone().unwrap_or_default(),
            resource_type: raw.resource_type.clone().unwrap_or_default(),
            key: raw.key.clone().unwrap_or_default(),
            value: raw.value.clone().unwrap_or_default(),
            propagate_at_launch: raw.propagate_at_launch.unwrap_or(false),
        }
    }
}

/// Read-only snapshot of one Auto Scaling group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingGroupState {
    /// Group name as echoed by the provider; unset when the record carries
    /// none.
    pub name: Option<String>,
    pub min_size: i64,
    pub max_size: i64,
    pub desired_capacity: i64,
    /// `EC2` or `ELB`.
    pub health_check_type: Option<String>,
    /// Subnet identifiers in provider order.
    pub vpc_zone_identifier: Vec<String>,
    /// Absent when the group launches from a launch template.
    pub launch_configuration_name: Option<String>,
    pub tags: Vec<ScalingGroupTag>,
}

impl ScalingGroupState {
    /// Normalize a raw provider record.
    pub fn from_raw(raw: &RawScalingGroup) -> Self {
        Self {
            name: raw.auto_scaling_group_name.clone(),
            min_size: coerce_count(raw.min_size.as_ref()),
            max_size: coerce_count(raw.max_size.as_ref()),
            desired_capacity: coerce_count(raw.desired_capacity.as_ref()),
            health_check_type: raw.health_check_type.clone(),
            vpc_zone_identifier: split_zone_identifier(raw.vpc_zone_identifier.as_deref()),
            launch_configuration_name: raw.launch_configuration_name.clone(),
            tags: raw.tags.iter().map(ScalingGroupTag::from).collect(),
        }
    }

    /// Look up the value of the first tag with the given key.
    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.key == key)
            .map(|t| t.value.as_str())
    }
}

impl From<&RawScalingGroup> for ScalingGroupState {
    fn from(raw: &RawScalingGroup) -> Self {
        Self::from_raw(raw)
    }
}

/// An absent count is zero.
pub fn coerce_count(raw: Option<&RawCount>) -> i64 {
    raw.map_or(0, RawCount::to_i64)
}

/// Split a comma-joined zone identifier, keeping order.
///
/// Trailing empty segments are dropped; interior ones are kept.
pub fn split_zone_identifier(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let mut parts: Vec<String> = raw.split(',').map(str::to_owned).collect();
    while parts.last().is_some_and(String::is_empty) {
        parts.pop();
    }
    parts
}
