//! Resource payloads exchanged with the backend
//!
//! The backend serializes SQL rows directly, so decimals may arrive as strings and
//! booleans as `0`/`1`. The field helpers at the bottom accept both.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Job contract type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    #[display("Full-time")]
    FullTime,
    #[display("Part-time")]
    PartTime,
    #[display("Contract")]
    Contract,
    #[default]
    #[display("Freelance")]
    Freelance,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Freelance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Freelance => "freelance",
        }
    }
}

impl std::str::FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Invalid job type: {}", s))
    }
}

/// Seniority asked for by a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[display("Junior")]
    Junior,
    #[display("Mid-level")]
    Mid,
    #[display("Senior")]
    Senior,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [
        ExperienceLevel::Junior,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
        }
    }
}

impl std::str::FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| format!("Invalid experience level: {}", s))
    }
}

/// Application review state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[display("Applied")]
    Applied,
    #[display("Reviewed")]
    Reviewed,
    #[display("Shortlisted")]
    Shortlisted,
    #[display("Accepted")]
    Accepted,
    #[display("Rejected")]
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Reviewed,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ];

    /// Statuses a recruiter may move an application to
    pub const REVIEW_OUTCOMES: [ApplicationStatus; 4] = [
        ApplicationStatus::Reviewed,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ApplicationStatus::Applied)
    }

    /// Whether a recruiter may set this status
    pub fn is_review_outcome(&self) -> bool {
        Self::REVIEW_OUTCOMES.contains(self)
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Invalid application status: {}", s))
    }
}

/// Notification category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[display("Application")]
    Application,
    #[display("Job")]
    Job,
    #[display("Profile")]
    Profile,
    #[default]
    #[display("System")]
    System,
}

/// A job posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub pay_per_hour: f64,
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub job_type: JobType,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_remote: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_active: bool,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub responsibilities: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub application_deadline: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub recruiter_name: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub total_applications: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Job {
    /// "$45.00/hr"
    pub fn pay_label(&self) -> String {
        format!("${:.2}/hr", self.pay_per_hour)
    }
}

/// A freelancer's application to a job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub job_id: i64,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub proposed_rate: Option<f64>,
    #[serde(default)]
    pub availability_date: Option<String>,
    #[serde(default)]
    pub recruiter_notes: Option<String>,
    #[serde(default)]
    pub applied_at: Option<String>,
    /// Job title, present on the freelancer's listing
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    /// Applicant details, present on the recruiter's listing
    #[serde(default)]
    pub freelancer_name: Option<String>,
    #[serde(default)]
    pub freelancer_email: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// A notification addressed to the current user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "notification_type")]
    pub kind: NotificationKind,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_read: bool,
    #[serde(default)]
    pub related_job_id: Option<i64>,
    #[serde(default)]
    pub related_application_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Named skill with an optional proficiency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency_level: Option<String>,
}

/// Freelancer profile as stored by the backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FreelancerProfile {
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_decimal")]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_available: bool,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

/// Recruiter profile as stored by the backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecruiterProfile {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_website: Option<String>,
    #[serde(default)]
    pub company_size: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub company_description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FreelancerStats {
    #[serde(default)]
    pub total_applications: u32,
    #[serde(default)]
    pub pending_applications: u32,
    #[serde(default)]
    pub accepted_applications: u32,
    #[serde(default)]
    pub rejected_applications: u32,
    /// Percentage, 0 to 100
    #[serde(default)]
    pub profile_completion: u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FreelancerDashboard {
    #[serde(default)]
    pub profile: Option<FreelancerProfile>,
    #[serde(default)]
    pub recent_applications: Vec<Application>,
    #[serde(default)]
    pub recommended_jobs: Vec<Job>,
    #[serde(default)]
    pub stats: FreelancerStats,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RecruiterStats {
    #[serde(default)]
    pub total_jobs: u32,
    #[serde(default)]
    pub active_jobs: u32,
    #[serde(default)]
    pub total_applications: u32,
    #[serde(default)]
    pub pending_applications: u32,
    #[serde(default)]
    pub shortlisted_applications: u32,
    #[serde(default)]
    pub accepted_applications: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecruiterDashboard {
    #[serde(default)]
    pub profile: Option<RecruiterProfile>,
    #[serde(default)]
    pub recent_jobs: Vec<Job>,
    #[serde(default)]
    pub recent_applications: Vec<Application>,
    #[serde(default)]
    pub stats: RecruiterStats,
}

/// Job search query. Unset fields are left out of the query string.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct JobSearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_pay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_remote: bool,
}

/// New job posting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub pay_per_hour: f64,
    pub experience_level: ExperienceLevel,
    pub job_type: JobType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub is_remote: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<String>,
    pub required_skills: Vec<String>,
}

/// Application submitted by a freelancer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationDraft {
    pub cover_letter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposed_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_date: Option<String>,
}

mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Number(f64),
        Text(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    fn parse_decimal<E: serde::de::Error>(raw: Decimal) -> Result<f64, E> {
        match raw {
            Decimal::Number(n) => Ok(n),
            Decimal::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid decimal: {}", s))),
        }
    }

    /// Number or numeric string; null reads as zero
    pub fn decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Option::<Decimal>::deserialize(deserializer)? {
            Some(raw) => parse_decimal(raw),
            None => Ok(0.0),
        }
    }

    pub fn optional_decimal<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        Option::<Decimal>::deserialize(deserializer)?
            .map(parse_decimal)
            .transpose()
    }

    /// Boolean or 0/1; null reads as false
    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Option::<Flag>::deserialize(deserializer)? {
            Some(Flag::Bool(b)) => b,
            Some(Flag::Int(i)) => i != 0,
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_from_search_row() {
        let job: Job = serde_json::from_value(json!({
            "id": 3,
            "title": "Rust developer",
            "description": "Build services",
            "pay_per_hour": "45.50",
            "experience_level": "senior",
            "job_type": "full-time",
            "is_remote": 1,
            "is_active": true,
            "company_name": "Acme",
            "required_skills": ["Rust", "SQL"],
            "tech_stack": []
        }))
        .unwrap();

        assert_eq!(job.pay_per_hour, 45.5);
        assert_eq!(job.pay_label(), "$45.50/hr");
        assert_eq!(job.job_type, JobType::FullTime);
        assert!(job.is_remote);
        assert_eq!(job.required_skills, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_job_defaults_missing_fields() {
        let job: Job = serde_json::from_value(json!({
            "id": 1,
            "title": "Tester",
            "pay_per_hour": 20,
            "experience_level": "junior",
            "is_remote": null
        }))
        .unwrap();

        assert_eq!(job.job_type, JobType::Freelance);
        assert!(!job.is_remote);
        assert!(job.required_skills.is_empty());
    }

    #[test]
    fn test_bad_decimal_is_rejected() {
        let result: Result<Job, _> = serde_json::from_value(json!({
            "id": 1,
            "title": "Tester",
            "pay_per_hour": "lots",
            "experience_level": "junior"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_notification_read_flag() {
        let notification: Notification = serde_json::from_value(json!({
            "id": 8,
            "title": "Application Accepted",
            "message": "Your application for Rust developer has been accepted",
            "notification_type": "application",
            "is_read": 0,
            "related_job_id": 3
        }))
        .unwrap();

        assert!(!notification.is_read);
        assert_eq!(notification.kind, NotificationKind::Application);
    }

    #[test]
    fn test_application_status_helpers() {
        assert_eq!("shortlisted".parse::<ApplicationStatus>(), Ok(ApplicationStatus::Shortlisted));
        assert!("hired".parse::<ApplicationStatus>().is_err());
        assert!(ApplicationStatus::Applied.is_pending());
        assert!(!ApplicationStatus::Applied.is_review_outcome());
        assert!(ApplicationStatus::Rejected.is_review_outcome());
        assert_eq!(ApplicationStatus::Accepted.to_string(), "Accepted");
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_value(JobType::PartTime).unwrap(), json!("part-time"));
        assert_eq!("contract".parse::<JobType>(), Ok(JobType::Contract));
        assert_eq!(serde_json::to_value(ExperienceLevel::Mid).unwrap(), json!("mid"));
        assert!("principal".parse::<ExperienceLevel>().is_err());
    }

    #[test]
    fn test_freelancer_dashboard_payload() {
        let dashboard: FreelancerDashboard = serde_json::from_value(json!({
            "success": true,
            "profile": {"bio": "Backend dev", "hourly_rate": "60.00", "skills": [{"name": "Rust", "proficiency_level": "expert"}]},
            "recent_applications": [{"id": 4, "job_id": 3, "status": "applied", "title": "Rust developer"}],
            "recommended_jobs": [],
            "stats": {"total_applications": 1, "pending_applications": 1, "accepted_applications": 0, "rejected_applications": 0, "profile_completion": 33}
        }))
        .unwrap();

        assert_eq!(dashboard.profile.and_then(|p| p.hourly_rate), Some(60.0));
        assert_eq!(dashboard.stats.profile_completion, 33);
        assert_eq!(dashboard.recent_applications[0].status, ApplicationStatus::Applied);
    }

    #[test]
    fn test_search_filters_skip_unset_fields() {
        let filters = JobSearchFilters {
            search: Some("rust".to_string()),
            job_type: Some(JobType::Contract),
            ..Default::default()
        };

        assert_eq!(
            serde_urlencoded::to_string(&filters).unwrap(),
            "search=rust&job_type=contract"
        );

        let remote = JobSearchFilters {
            is_remote: true,
            min_pay: Some(30.0),
            ..Default::default()
        };
        assert_eq!(serde_urlencoded::to_string(&remote).unwrap(), "min_pay=30.0&is_remote=true");
        assert_eq!(serde_urlencoded::to_string(JobSearchFilters::default()).unwrap(), "");
    }
}
