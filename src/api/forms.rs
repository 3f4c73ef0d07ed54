//! Contact, service request and internship application endpoints

use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::metrics::SUBMISSIONS_TOTAL;
use crate::models::*;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Internship areas offered on the application form
pub const INTERNSHIP_AREAS: [&str; 7] = [
    "frontend",
    "backend",
    "mobile",
    "ui-ux",
    "devops",
    "data-science",
    "other",
];

/// Unwrap a JSON body, reporting malformed payloads as validation errors
pub(crate) fn json_body<T: DeserializeOwned>(
    payload: std::result::Result<Json<T>, JsonRejection>,
) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

/// Validate `form`, naming the first offending field.
///
/// `fields` lists `(struct field, wire name)` in report order. A required
/// field that is absent or empty is "missing"; any other failure is an
/// invalid value.
pub(crate) fn validate_fields<T: Validate>(form: &T, fields: &[(&str, &str)]) -> Result<()> {
    match form.validate() {
        Ok(()) => Ok(()),
        Err(errors) => Err(describe_validation(&errors, fields)),
    }
}

fn describe_validation(errors: &ValidationErrors, fields: &[(&str, &str)]) -> AppError {
    let by_field = errors.field_errors();

    for (field, wire_name) in fields {
        let Some(field_errors) = by_field.get(*field).or_else(|| by_field.get(*wire_name)) else {
            continue;
        };

        let missing = field_errors
            .iter()
            .any(|e| e.code == "required" || e.code == "length");
        return if missing {
            AppError::Validation(format!("Missing required field: {}", wire_name))
        } else {
            AppError::Validation(format!("Invalid value for field: {}", wire_name))
        };
    }

    AppError::Validation(errors.to_string())
}

#[derive(Debug, Serialize)]
pub struct SubmissionAck {
    pub success: bool,
    pub message: String,
    pub submission_id: String,
    pub timestamp: DateTime<Utc>,
}

impl SubmissionAck {
    fn new(stored: &SubmissionRecord, message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            submission_id: stored.id().to_string(),
            timestamp: stored.timestamp(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmissionListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub count: usize,
}

impl<T> SubmissionListResponse<T> {
    fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse<T> {
    pub success: bool,
    pub data: T,
}

fn find_submission<T: Clone>(
    items: &[Submission<T>],
    id: &str,
    not_found: &str,
) -> Result<Json<SubmissionResponse<Submission<T>>>> {
    items
        .iter()
        .find(|s| s.id == id)
        .cloned()
        .map(|data| Json(SubmissionResponse { success: true, data }))
        .ok_or_else(|| AppError::NotFound(not_found.to_string()))
}

async fn persist(state: &AppState, record: SubmissionRecord) -> Result<SubmissionRecord> {
    let kind = record.kind();
    let stored = state.store.append(record).await?;
    SUBMISSIONS_TOTAL
        .with_label_values(&[&kind.to_string()])
        .inc();
    Ok(stored)
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1), email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(required, length(min = 1))]
    pub subject: Option<String>,
    #[validate(required, length(min = 1))]
    pub message: Option<String>,
    pub urgency: Option<String>,
    pub budget: Option<String>,
}

const CONTACT_FIELDS: &[(&str, &str)] = &[
    ("name", "name"),
    ("email", "email"),
    ("subject", "subject"),
    ("message", "message"),
];

impl From<ContactForm> for ContactDetails {
    fn from(form: ContactForm) -> Self {
        Self {
            name: form.name.unwrap_or_default(),
            email: form.email.unwrap_or_default(),
            phone: form.phone.unwrap_or_default(),
            subject: form.subject.unwrap_or_default(),
            message: form.message.unwrap_or_default(),
            urgency: form.urgency.unwrap_or_default(),
            budget: form.budget.unwrap_or_default(),
        }
    }
}

/// Submit the contact form
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ContactForm>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmissionAck>)> {
    let form = json_body(payload)?;
    validate_fields(&form, CONTACT_FIELDS)?;

    let details = ContactDetails::from(form);
    let record = SubmissionRecord::Contact(Submission::new(
        SubmissionKind::Contact,
        details,
        Utc::now(),
    ));
    let stored = persist(&state, record).await?;

    if let SubmissionRecord::Contact(ref s) = stored {
        tracing::info!(
            submission_id = %s.id,
            subject = %s.data.subject,
            urgency = %s.data.urgency,
            "New contact submission"
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(SubmissionAck::new(&stored, "Contact form submitted successfully!")),
    ))
}

pub async fn list_contacts(
    State(state): State<AppState>,
) -> Result<Json<SubmissionListResponse<ContactSubmission>>> {
    let data = state.store.snapshot().await?;
    Ok(Json(SubmissionListResponse::new(data.contacts)))
}

pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SubmissionResponse<ContactSubmission>>> {
    let data = state.store.snapshot().await?;
    find_submission(&data.contacts, &id, "Contact submission not found")
}

// ---------------------------------------------------------------------------
// Service requests
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct ServiceRequestForm {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1), email)]
    pub email: Option<String>,
    pub company: Option<String>,
    #[validate(required, length(min = 1))]
    pub service: Option<String>,
    #[serde(rename = "project-details")]
    #[validate(required, length(min = 1))]
    pub project_details: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
}

const SERVICE_FIELDS: &[(&str, &str)] = &[
    ("name", "name"),
    ("email", "email"),
    ("service", "service"),
    ("project_details", "project-details"),
];

impl From<ServiceRequestForm> for ServiceRequestDetails {
    fn from(form: ServiceRequestForm) -> Self {
        Self {
            name: form.name.unwrap_or_default(),
            email: form.email.unwrap_or_default(),
            company: form.company.unwrap_or_default(),
            service: form.service.unwrap_or_default(),
            project_details: form.project_details.unwrap_or_default(),
            budget: form.budget.unwrap_or_default(),
            timeline: form.timeline.unwrap_or_default(),
        }
    }
}

/// Submit a service request
pub async fn submit_service_request(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ServiceRequestForm>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmissionAck>)> {
    let form = json_body(payload)?;
    validate_fields(&form, SERVICE_FIELDS)?;

    let record = SubmissionRecord::Service(Submission::new(
        SubmissionKind::ServiceRequest,
        ServiceRequestDetails::from(form),
        Utc::now(),
    ));
    let stored = persist(&state, record).await?;

    if let SubmissionRecord::Service(ref s) = stored {
        tracing::info!(
            submission_id = %s.id,
            service = %s.data.service,
            budget = %s.data.budget,
            "New service request"
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(SubmissionAck::new(&stored, "Service request submitted successfully!")),
    ))
}

pub async fn list_service_requests(
    State(state): State<AppState>,
) -> Result<Json<SubmissionListResponse<ServiceSubmission>>> {
    let data = state.store.snapshot().await?;
    Ok(Json(SubmissionListResponse::new(data.services)))
}

pub async fn get_service_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SubmissionResponse<ServiceSubmission>>> {
    let data = state.store.snapshot().await?;
    find_submission(&data.services, &id, "Service submission not found")
}

#[derive(Debug, Serialize)]
pub struct StatsResponse<T> {
    pub success: bool,
    pub stats: T,
}

pub async fn service_stats(
    State(state): State<AppState>,
) -> Result<Json<StatsResponse<ServiceStats>>> {
    let data = state.store.snapshot().await?;
    Ok(Json(StatsResponse {
        success: true,
        stats: data.service_stats(Utc::now().date_naive()),
    }))
}

// ---------------------------------------------------------------------------
// Internship applications
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct InternshipApplicationForm {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1), email)]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub phone: Option<String>,
    pub college: Option<String>,
    pub course: Option<String>,
    pub year: Option<String>,
    #[validate(required, length(min = 1))]
    pub area: Option<String>,
    #[validate(required, length(min = 1))]
    pub skills: Option<String>,
    #[validate(required, length(min = 1))]
    pub duration: Option<String>,
    #[serde(rename = "start-date")]
    pub start_date: Option<String>,
    pub availability: Option<String>,
    #[validate(required, length(min = 1))]
    pub motivation: Option<String>,
}

const INTERNSHIP_FIELDS: &[(&str, &str)] = &[
    ("name", "name"),
    ("email", "email"),
    ("phone", "phone"),
    ("area", "area"),
    ("skills", "skills"),
    ("duration", "duration"),
    ("motivation", "motivation"),
];

impl From<InternshipApplicationForm> for InternshipApplicationDetails {
    fn from(form: InternshipApplicationForm) -> Self {
        Self {
            name: form.name.unwrap_or_default(),
            email: form.email.unwrap_or_default(),
            phone: form.phone.unwrap_or_default(),
            college: form.college.unwrap_or_default(),
            course: form.course.unwrap_or_default(),
            year: form.year.unwrap_or_default(),
            area: form.area.unwrap_or_default(),
            skills: form.skills.unwrap_or_default(),
            duration: form.duration.unwrap_or_default(),
            start_date: form.start_date.unwrap_or_default(),
            availability: form.availability.unwrap_or_default(),
            motivation: form.motivation.unwrap_or_default(),
        }
    }
}

/// Submit an internship application
pub async fn submit_internship_application(
    State(state): State<AppState>,
    payload: std::result::Result<Json<InternshipApplicationForm>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmissionAck>)> {
    let form = json_body(payload)?;
    validate_fields(&form, INTERNSHIP_FIELDS)?;

    let record = SubmissionRecord::Internship(Submission::new(
        SubmissionKind::InternshipApplication,
        InternshipApplicationDetails::from(form),
        Utc::now(),
    ));
    let stored = persist(&state, record).await?;

    if let SubmissionRecord::Internship(ref s) = stored {
        tracing::info!(
            submission_id = %s.id,
            area = %s.data.area,
            duration = %s.data.duration,
            "New internship application"
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(SubmissionAck::new(
            &stored,
            "Internship application submitted successfully!",
        )),
    ))
}

pub async fn list_internship_applications(
    State(state): State<AppState>,
) -> Result<Json<SubmissionListResponse<InternshipSubmission>>> {
    let data = state.store.snapshot().await?;
    Ok(Json(SubmissionListResponse::new(data.internships)))
}

pub async fn get_internship_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SubmissionResponse<InternshipSubmission>>> {
    let data = state.store.snapshot().await?;
    find_submission(&data.internships, &id, "Internship submission not found")
}

pub async fn internship_stats(
    State(state): State<AppState>,
) -> Result<Json<StatsResponse<InternshipStats>>> {
    let data = state.store.snapshot().await?;
    Ok(Json(StatsResponse {
        success: true,
        stats: data.internship_stats(Utc::now().date_naive()),
    }))
}

#[derive(Debug, Serialize)]
pub struct AreasResponse {
    pub success: bool,
    pub areas: Vec<&'static str>,
}

pub async fn internship_areas() -> Json<AreasResponse> {
    Json(AreasResponse {
        success: true,
        areas: INTERNSHIP_AREAS.to_vec(),
    })
}
