//! Freelancer endpoints

use serde::Deserialize;

use crate::core::http::{ApiClient, ApiError, ApiRequest, Transport};
use crate::core::models::{
    Application, ApplicationDraft, FreelancerDashboard, FreelancerProfile, Job, JobSearchFilters,
};

#[derive(Deserialize)]
struct ProfileBody {
    profile: FreelancerProfile,
}

#[derive(Deserialize)]
struct JobsBody {
    #[serde(default)]
    jobs: Vec<Job>,
}

#[derive(Deserialize)]
struct ApplyBody {
    application_id: i64,
}

#[derive(Deserialize)]
struct ApplicationsBody {
    #[serde(default)]
    applications: Vec<Application>,
}

pub struct FreelancerApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> FreelancerApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn dashboard(&self) -> Result<FreelancerDashboard, ApiError> {
        self.client.get_json("/freelancer/dashboard").await
    }

    pub async fn profile(&self) -> Result<FreelancerProfile, ApiError> {
        let body: ProfileBody = self.client.get_json("/freelancer/profile").await?;
        Ok(body.profile)
    }

    pub async fn update_profile(
        &self,
        profile: &FreelancerProfile,
    ) -> Result<FreelancerProfile, ApiError> {
        let body: ProfileBody = self.client.put_json("/freelancer/profile", profile).await?;
        Ok(body.profile)
    }

    /// Active jobs matching the filters, newest first
    pub async fn search_jobs(&self, filters: &JobSearchFilters) -> Result<Vec<Job>, ApiError> {
        let request = ApiRequest::get("/freelancer/jobs/search").query(filters)?;
        let body: JobsBody = self.client.request_json(request).await?;
        Ok(body.jobs)
    }

    /// Apply to a job, returning the new application id
    pub async fn apply(&self, job_id: i64, draft: &ApplicationDraft) -> Result<i64, ApiError> {
        let body: ApplyBody = self
            .client
            .post_json(&format!("/freelancer/jobs/{}/apply", job_id), draft)
            .await?;
        Ok(body.application_id)
    }

    pub async fn applications(&self) -> Result<Vec<Application>, ApiError> {
        let body: ApplicationsBody = self.client.get_json("/freelancer/applications").await?;
        Ok(body.applications)
    }
}
