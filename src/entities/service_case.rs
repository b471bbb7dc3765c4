//! Service case entity - one service-after-sale support ticket

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Status assigned to every freshly created case
pub const DEFAULT_STATUS: &str = "open";

/// Customer-supplied details required to open a case
///
/// None of these fields are validated; empty strings and malformed
/// addresses are stored as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCase {
    pub customer_name: String,
    pub contact_email: String,
    pub product_model: String,
    pub serial_number: String,
    pub issue_description: String,
}

/// A single service-after-sale case
///
/// Everything except `status`, `updated_at` and `resolution_notes` is fixed
/// once the case exists, so fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceCase {
    case_id: u64,
    customer_name: String,
    contact_email: String,
    product_model: String,
    serial_number: String,
    issue_description: String,
    status: String,
    #[serde(with = "timestamp")]
    created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    updated_at: DateTime<Utc>,
    resolution_notes: String,
}

impl ServiceCase {
    /// Create a new case with the default status and fresh timestamps
    pub fn new(case_id: u64, details: NewCase) -> Self {
        let now = timestamp::now();
        Self {
            case_id,
            customer_name: details.customer_name,
            contact_email: details.contact_email,
            product_model: details.product_model,
            serial_number: details.serial_number,
            issue_description: details.issue_description,
            status: DEFAULT_STATUS.to_string(),
            created_at: now,
            updated_at: now,
            resolution_notes: String::new(),
        }
    }

    /// Set a new status, optionally replacing the resolution notes
    ///
    /// Any status string is accepted. `updated_at` always moves forward,
    /// even when neither status nor notes change value.
    pub fn update_status(&mut self, new_status: impl Into<String>, notes: Option<String>) {
        self.status = new_status.into();
        if let Some(notes) = notes {
            self.resolution_notes = notes;
        }

        let now = timestamp::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + TimeDelta::microseconds(1)
        };
    }

    /// Decode a case from its key-value record form
    pub fn from_record(record: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(record)
    }

    /// Encode the case as a key-value record with one key per field
    pub fn to_record(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    pub fn case_id(&self) -> u64 {
        self.case_id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn contact_email(&self) -> &str {
        &self.contact_email
    }

    pub fn product_model(&self) -> &str {
        &self.product_model
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn issue_description(&self) -> &str {
        &self.issue_description
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn resolution_notes(&self) -> &str {
        &self.resolution_notes
    }
}

/// ISO-8601 timestamp codec for case records
///
/// Writes RFC 3339 with microsecond precision and a `Z` suffix. Reads
/// RFC 3339 as well as naive timestamps without an offset, which are taken
/// to be UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Current UTC time at the precision that survives a save/load cycle
    pub fn now() -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }

    pub fn format(dt: &DateTime<Utc>) -> String {
        dt.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc())
            })
    }

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(dt))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
    }
}
