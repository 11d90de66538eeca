use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use super::{acknowledged, de::falsy, CallKw, OdooClient};
use crate::Result;

pub const JOB_MODEL: &str = "hr.job";

pub const DEFAULT_UNTITLED_JOB: &str = "Untitled Job";
pub const DEFAULT_NUMBER: i64 = 0;

pub const JOB_FIELDS: &[&str] = &[
    "id",
    "name",
    "state",
    "is_favorite",
    "no_of_recruitment",
    "new_application_count",
    "application_count",
    "website_url",
    "website_published",
];

/// Job position as Odoo returns it
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct JobRecord {
    #[serde(default, deserialize_with = "falsy")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "falsy")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "falsy")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "falsy")]
    pub is_favorite: Option<bool>,
    #[serde(default, deserialize_with = "falsy")]
    pub no_of_recruitment: Option<i64>,
    #[serde(default, deserialize_with = "falsy")]
    pub new_application_count: Option<i64>,
    #[serde(default, deserialize_with = "falsy")]
    pub application_count: Option<i64>,
    #[serde(default, deserialize_with = "falsy")]
    pub website_url: Option<String>,
    #[serde(default, deserialize_with = "falsy")]
    pub website_published: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecruitmentJobState {
    RecruitStart,
    RecruitDone,
}

/// Job position with every optional field resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecruitmentJob {
    pub id: i64,
    pub name: String,
    pub state: RecruitmentJobState,
    pub is_favorite: bool,
    pub number_to_recruit: i64,
    pub number_of_new_application: i64,
    pub number_of_application: i64,
    pub url: String,
    pub is_published: bool,
}

impl RecruitmentJob {
    /// Resolves a record; records without an id are dropped
    pub fn from_record(record: JobRecord, portal_url: &str) -> Option<Self> {
        let id = record.id?;
        let state = match record.state.as_deref() {
            // "open" is Odoo's not-recruiting state
            Some("open") => RecruitmentJobState::RecruitDone,
            _ => RecruitmentJobState::RecruitStart,
        };
        let path = record.website_url.as_deref().unwrap_or_default();

        Some(Self {
            id,
            name: record
                .name
                .unwrap_or_else(|| DEFAULT_UNTITLED_JOB.to_string()),
            state,
            is_favorite: record.is_favorite.unwrap_or(false),
            number_to_recruit: record.no_of_recruitment.unwrap_or(DEFAULT_NUMBER),
            number_of_new_application: record.new_application_count.unwrap_or(DEFAULT_NUMBER),
            number_of_application: record.application_count.unwrap_or(DEFAULT_NUMBER),
            url: format!("{}{}", portal_url, path.strip_prefix('/').unwrap_or(path)),
            is_published: record.website_published.unwrap_or(false),
        })
    }
}

/// Resolves records and puts favourites first, keeping server order otherwise
pub fn to_recruitment_jobs(records: Vec<JobRecord>, portal_url: &str) -> Vec<RecruitmentJob> {
    let mut jobs: Vec<_> = records
        .into_iter()
        .filter_map(|record| RecruitmentJob::from_record(record, portal_url))
        .collect();
    jobs.sort_by_key(|job| !job.is_favorite);
    jobs
}

/// Recruitment operations
#[async_trait]
pub trait RecruitmentRepository: Send + Sync {
    async fn get_recruitment_jobs(&self) -> Result<Vec<RecruitmentJob>>;

    /// Publishes the job on the website, or hides it
    async fn set_job_publication(&self, job_id: i64, publish: bool) -> Result<bool>;

    async fn set_job_favorite(&self, job_id: i64, is_favorite: bool) -> Result<bool>;

    /// Stops recruiting when `is_recruiting_done`, starts it again otherwise
    async fn set_job_recruit(&self, job_id: i64, is_recruiting_done: bool) -> Result<bool>;
}

pub struct OdooRecruitmentRepository {
    client: OdooClient,
    portal_url: String,
}

impl OdooRecruitmentRepository {
    /// `portal_url` prefixes the website path of each job
    pub fn new(client: OdooClient, portal_url: impl Into<String>) -> Self {
        Self {
            client,
            portal_url: portal_url.into(),
        }
    }

    async fn write(&self, job_id: i64, field: &str, value: bool) -> Result<bool> {
        let call = CallKw::new(JOB_MODEL, "write")
            .arg([job_id])?
            .arg(json!({ field: value }))?;
        let written: Option<bool> = self.client.call_kw(call).await.map_err(|e| {
            error!(job_id, field, error = %e, "job update failed");
            e
        })?;
        Ok(acknowledged(written))
    }
}

#[async_trait]
impl RecruitmentRepository for OdooRecruitmentRepository {
    async fn get_recruitment_jobs(&self) -> Result<Vec<RecruitmentJob>> {
        debug!("get_recruitment_jobs()");

        let call = CallKw::new(JOB_MODEL, "search_read")
            .arg(json!([]))?
            .kwarg("fields", JOB_FIELDS)?;
        let records: Vec<JobRecord> = self.client.call_kw(call).await.map_err(|e| {
            error!(error = %e, "get_recruitment_jobs() failed");
            e
        })?;

        debug!(count = records.len(), "get_recruitment_jobs(): got response");
        Ok(to_recruitment_jobs(records, &self.portal_url))
    }

    async fn set_job_publication(&self, job_id: i64, publish: bool) -> Result<bool> {
        debug!(job_id, publish, "set_job_publication()");
        self.write(job_id, "website_published", publish).await
    }

    async fn set_job_favorite(&self, job_id: i64, is_favorite: bool) -> Result<bool> {
        debug!(job_id, is_favorite, "set_job_favorite()");
        self.write(job_id, "is_favorite", is_favorite).await
    }

    async fn set_job_recruit(&self, job_id: i64, is_recruiting_done: bool) -> Result<bool> {
        debug!(job_id, is_recruiting_done, "set_job_recruit()");

        let method = if is_recruiting_done {
            "set_open"
        } else {
            "set_recruit"
        };
        let call = CallKw::new(JOB_MODEL, method).arg([job_id])?;
        let done: Option<bool> = self.client.call_kw(call).await?;
        Ok(acknowledged(done))
    }
}
