use super::submission::SubmissionData;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Submission counts per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionCounts {
    pub contacts: usize,
    pub services: usize,
    pub internships: usize,
}

/// Totals across the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_contacts: usize,
    pub total_services: usize,
    pub total_internships: usize,
    pub total_submissions: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStats {
    pub total_requests: usize,
    pub service_distribution: BTreeMap<String, usize>,
    /// Requests that named no budget are not counted
    pub budget_distribution: BTreeMap<String, usize>,
    pub recent_requests: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternshipStats {
    pub total_applications: usize,
    pub area_distribution: BTreeMap<String, usize>,
    pub duration_distribution: BTreeMap<String, usize>,
    /// Applications that named no year are not counted
    pub year_distribution: BTreeMap<String, usize>,
    pub recent_applications: usize,
}

fn tally<'a>(values: impl Iterator<Item = &'a str>) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}

impl SubmissionData {
    pub fn counts(&self) -> SubmissionCounts {
        SubmissionCounts {
            contacts: self.contacts.len(),
            services: self.services.len(),
            internships: self.internships.len(),
        }
    }

    pub fn store_stats(&self) -> StoreStats {
        StoreStats {
            total_contacts: self.contacts.len(),
            total_services: self.services.len(),
            total_internships: self.internships.len(),
            total_submissions: self.total(),
        }
    }

    /// Service request statistics; "recent" means received on `today`
    pub fn service_stats(&self, today: NaiveDate) -> ServiceStats {
        ServiceStats {
            total_requests: self.services.len(),
            service_distribution: tally(self.services.iter().map(|s| s.data.service.as_str())),
            budget_distribution: tally(
                self.services
                    .iter()
                    .map(|s| s.data.budget.as_str())
                    .filter(|budget| !budget.is_empty()),
            ),
            recent_requests: self.services.iter().filter(|s| s.received_on(today)).count(),
        }
    }

    /// Internship application statistics; "recent" means received on `today`
    pub fn internship_stats(&self, today: NaiveDate) -> InternshipStats {
        InternshipStats {
            total_applications: self.internships.len(),
            area_distribution: tally(self.internships.iter().map(|s| s.data.area.as_str())),
            duration_distribution: tally(
                self.internships.iter().map(|s| s.data.duration.as_str()),
            ),
            year_distribution: tally(
                self.internships
                    .iter()
                    .map(|s| s.data.year.as_str())
                    .filter(|year| !year.is_empty()),
            ),
            recent_applications: self
                .internships
                .iter()
                .filter(|s| s.received_on(today))
                .count(),
        }
    }
}
