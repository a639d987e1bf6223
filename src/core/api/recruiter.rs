//! Recruiter endpoints

use serde::{Deserialize, Serialize};

use crate::core::http::{ApiClient, ApiError, Transport};
use crate::core::models::{
    Application, ApplicationStatus, Job, JobDraft, RecruiterDashboard, RecruiterProfile,
};

#[derive(Deserialize)]
struct ProfileBody {
    profile: RecruiterProfile,
}

#[derive(Deserialize)]
struct JobBody {
    job: Job,
}

#[derive(Deserialize)]
struct JobsBody {
    #[serde(default)]
    jobs: Vec<Job>,
}

#[derive(Deserialize)]
struct ApplicationsBody {
    #[serde(default)]
    applications: Vec<Application>,
}

#[derive(Deserialize)]
struct ApplicationBody {
    application: Application,
}

#[derive(Serialize)]
struct StatusUpdate<'a> {
    status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    recruiter_notes: Option<&'a str>,
}

pub struct RecruiterApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> RecruiterApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn dashboard(&self) -> Result<RecruiterDashboard, ApiError> {
        self.client.get_json("/recruiter/dashboard").await
    }

    pub async fn profile(&self) -> Result<RecruiterProfile, ApiError> {
        let body: ProfileBody = self.client.get_json("/recruiter/profile").await?;
        Ok(body.profile)
    }

    pub async fn update_profile(
        &self,
        profile: &RecruiterProfile,
    ) -> Result<RecruiterProfile, ApiError> {
        let body: ProfileBody = self.client.put_json("/recruiter/profile", profile).await?;
        Ok(body.profile)
    }

    /// Post a job and return it as stored
    pub async fn create_job(&self, draft: &JobDraft) -> Result<Job, ApiError> {
        let body: JobBody = self.client.post_json("/recruiter/jobs", draft).await?;
        Ok(body.job)
    }

    pub async fn my_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let body: JobsBody = self.client.get_json("/recruiter/jobs").await?;
        Ok(body.jobs)
    }

    pub async fn job_applications(&self, job_id: i64) -> Result<Vec<Application>, ApiError> {
        let body: ApplicationsBody = self
            .client
            .get_json(&format!("/recruiter/jobs/{}/applications", job_id))
            .await?;
        Ok(body.applications)
    }

    /// Move an application to a review outcome
    pub async fn update_application_status(
        &self,
        application_id: i64,
        status: ApplicationStatus,
        notes: Option<&str>,
    ) -> Result<Application, ApiError> {
        if !status.is_review_outcome() {
            return Err(ApiError::Encode(format!(
                "status '{}' cannot be set by a recruiter",
                status.as_str()
            )));
        }

        let update = StatusUpdate {
            status,
            recruiter_notes: notes.map(str::trim).filter(|n| !n.is_empty()),
        };
        let body: ApplicationBody = self
            .client
            .put_json(&format!("/recruiter/applications/{}/status", application_id), &update)
            .await?;
        Ok(body.application)
    }
}
