use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::{
    de::{falsy, Many2One},
    CallKw, OdooClient,
};
use crate::Result;

pub const EMPLOYEE_MODEL: &str = "hr.employee";

/// Fields shown in the employee directory
pub const EMPLOYEE_LIST_FIELDS: &[&str] = &["id", "name", "job_title", "work_email", "department_id"];

/// Fields shown on an employee card
pub const EMPLOYEE_DETAIL_FIELDS: &[&str] = &[
    "id",
    "name",
    "job_title",
    "mobile_phone",
    "work_phone",
    "work_email",
    "department_id",
    "studygroup_id",
    "company_id",
    "address_id",
    "work_location_id",
    "resource_calendar_id",
    "cv",
    "coach_id",
    "parent_id",
    "employee_type",
];

/// Directory entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub id: i64,
    #[serde(default, deserialize_with = "falsy")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "falsy")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "falsy")]
    pub work_email: Option<String>,
    #[serde(default, deserialize_with = "falsy", rename = "department_id")]
    pub department: Option<Many2One>,
}

/// Full employee card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDetails {
    pub id: i64,
    #[serde(default, deserialize_with = "falsy")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "falsy")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "falsy")]
    pub mobile_phone: Option<String>,
    #[serde(default, deserialize_with = "falsy")]
    pub work_phone: Option<String>,
    #[serde(default, deserialize_with = "falsy")]
    pub work_email: Option<String>,
    #[serde(default, deserialize_with = "falsy", rename = "department_id")]
    pub department: Option<Many2One>,
    #[serde(default, deserialize_with = "falsy", rename = "studygroup_id")]
    pub study_group: Option<Many2One>,
    #[serde(default, deserialize_with = "falsy", rename = "company_id")]
    pub company: Option<Many2One>,
    #[serde(default, deserialize_with = "falsy", rename = "address_id")]
    pub address: Option<Many2One>,
    #[serde(default, deserialize_with = "falsy", rename = "work_location_id")]
    pub work_location: Option<Many2One>,
    #[serde(default, deserialize_with = "falsy", rename = "resource_calendar_id")]
    pub resource_calendar: Option<Many2One>,
    #[serde(default, deserialize_with = "falsy")]
    pub cv: Option<String>,
    #[serde(default, deserialize_with = "falsy", rename = "coach_id")]
    pub coach: Option<Many2One>,
    #[serde(default, deserialize_with = "falsy", rename = "parent_id")]
    pub manager: Option<Many2One>,
    #[serde(default, deserialize_with = "falsy")]
    pub employee_type: Option<String>,
}

/// Employee directory operations
#[async_trait]
pub trait EmployeesRepository: Send + Sync {
    /// Lists every employee visible to the session
    async fn get_all_employees(&self) -> Result<Vec<EmployeeSummary>>;

    /// Reads the card of one employee
    async fn get_employee_details(&self, employee_id: i64) -> Result<Vec<EmployeeDetails>>;
}

pub struct OdooEmployeesRepository {
    client: OdooClient,
}

impl OdooEmployeesRepository {
    pub fn new(client: OdooClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EmployeesRepository for OdooEmployeesRepository {
    async fn get_all_employees(&self) -> Result<Vec<EmployeeSummary>> {
        debug!("get_all_employees()");

        let call = CallKw::new(EMPLOYEE_MODEL, "search_read")
            .arg(json!([]))?
            .kwarg("fields", EMPLOYEE_LIST_FIELDS)?;
        self.client.call_kw(call).await
    }

    async fn get_employee_details(&self, employee_id: i64) -> Result<Vec<EmployeeDetails>> {
        debug!(employee_id, "get_employee_details()");

        let call = CallKw::new(EMPLOYEE_MODEL, "read")
            .arg(employee_id)?
            .arg(EMPLOYEE_DETAIL_FIELDS)?;
        self.client.call_kw(call).await
    }
}
