use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Kind of form a submission came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, EnumString, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SubmissionKind {
    Contact,
    ServiceRequest,
    InternshipApplication,
}

impl SubmissionKind {
    /// Prefix of generated submission IDs
    pub fn id_prefix(&self) -> &'static str {
        match self {
            SubmissionKind::Contact => "contact",
            SubmissionKind::ServiceRequest => "service",
            SubmissionKind::InternshipApplication => "internship",
        }
    }

    /// Name of the top-level array holding this kind in the store document
    pub fn collection(&self) -> &'static str {
        match self {
            SubmissionKind::Contact => "contacts",
            SubmissionKind::ServiceRequest => "services",
            SubmissionKind::InternshipApplication => "internships",
        }
    }
}

/// A stored form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission<T> {
    /// `<prefix>_<YYYYmmdd>_<HHMMSS>`, suffixed `_2`, `_3`, ... on collision
    pub id: String,

    #[serde(rename = "type")]
    pub kind: SubmissionKind,

    #[serde(with = "flexible_timestamp")]
    pub timestamp: DateTime<Utc>,

    pub data: T,
}

impl<T> Submission<T> {
    pub fn new(kind: SubmissionKind, data: T, at: DateTime<Utc>) -> Self {
        Self {
            id: base_id(kind, at),
            kind,
            timestamp: at,
            data,
        }
    }

    /// True when the submission was received on `day` (UTC)
    pub fn received_on(&self, day: chrono::NaiveDate) -> bool {
        self.timestamp.date_naive() == day
    }
}

/// Timestamp-derived ID before collision handling
pub fn base_id(kind: SubmissionKind, at: DateTime<Utc>) -> String {
    format!("{}_{}", kind.id_prefix(), at.format("%Y%m%d_%H%M%S"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub budget: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequestDetails {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: String,
    pub service: String,
    pub project_details: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub timeline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InternshipApplicationDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub year: String,
    pub area: String,
    pub skills: String,
    pub duration: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub availability: String,
    pub motivation: String,
}

pub type ContactSubmission = Submission<ContactDetails>;
pub type ServiceSubmission = Submission<ServiceRequestDetails>;
pub type InternshipSubmission = Submission<InternshipApplicationDetails>;

/// A submission of any kind, as handed to the store
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SubmissionRecord {
    Contact(ContactSubmission),
    Service(ServiceSubmission),
    Internship(InternshipSubmission),
}

impl SubmissionRecord {
    pub fn id(&self) -> &str {
        match self {
            SubmissionRecord::Contact(s) => &s.id,
            SubmissionRecord::Service(s) => &s.id,
            SubmissionRecord::Internship(s) => &s.id,
        }
    }

    fn set_id(&mut self, id: String) {
        match self {
            SubmissionRecord::Contact(s) => s.id = id,
            SubmissionRecord::Service(s) => s.id = id,
            SubmissionRecord::Internship(s) => s.id = id,
        }
    }

    pub fn kind(&self) -> SubmissionKind {
        match self {
            SubmissionRecord::Contact(s) => s.kind,
            SubmissionRecord::Service(s) => s.kind,
            SubmissionRecord::Internship(s) => s.kind,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            SubmissionRecord::Contact(s) => s.timestamp,
            SubmissionRecord::Service(s) => s.timestamp,
            SubmissionRecord::Internship(s) => s.timestamp,
        }
    }
}

/// The whole submissions document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionData {
    #[serde(default)]
    pub contacts: Vec<ContactSubmission>,

    #[serde(default)]
    pub services: Vec<ServiceSubmission>,

    #[serde(default)]
    pub internships: Vec<InternshipSubmission>,
}

impl SubmissionData {
    pub fn contains_id(&self, id: &str) -> bool {
        self.contacts.iter().any(|s| s.id == id)
            || self.services.iter().any(|s| s.id == id)
            || self.internships.iter().any(|s| s.id == id)
    }

    /// `base` if unused, otherwise the first free `base_N` for N >= 2
    pub fn unique_id(&self, base: &str) -> String {
        if !self.contains_id(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| !self.contains_id(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    /// Append `record` under a collision-free ID and return what was stored
    pub fn insert(&mut self, mut record: SubmissionRecord) -> SubmissionRecord {
        let id = self.unique_id(record.id());
        record.set_id(id);

        match record.clone() {
            SubmissionRecord::Contact(s) => self.contacts.push(s),
            SubmissionRecord::Service(s) => self.services.push(s),
            SubmissionRecord::Internship(s) => self.internships.push(s),
        }
        record
    }

    pub fn total(&self) -> usize {
        self.contacts.len() + self.services.len() + self.internships.len()
    }
}

/// Accepts RFC 3339 timestamps, or naive ISO 8601 ones (read as UTC) as
/// written by earlier deployments.
mod flexible_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
