use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::Error;

pub const APPLICATION_STATUSES: [ApplicationStatus; 4] = [
    ApplicationStatus::New,
    ApplicationStatus::Reviewed,
    ApplicationStatus::Accepted,
    ApplicationStatus::Rejected,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ApplicationStatus {
    New,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Reviewed => "reviewed",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "reviewed" => Ok(Self::Reviewed),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(Error::InvalidInput(format!("application status({})", s))),
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationListItem {
    pub id: i64,
    pub program_id: i64,
    pub founder_name: String,
    pub email: String,
    pub startup_name: String,
    pub created_at: NaiveDateTime,
    pub status: ApplicationStatus,
}

/// One application joined with its program's name and active flag.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationDetail {
    pub id: i64,
    pub program_id: i64,
    pub founder_name: String,
    pub email: String,
    pub startup_name: String,
    pub created_at: NaiveDateTime,
    pub status: ApplicationStatus,
    pub program_name: String,
    pub program_is_active: bool,
}

/// Filters and pagination for one page of a program's applications.
/// `date_to` covers the whole calendar day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListApplicationsOptions {
    pub limit: i64,
    pub offset: i64,
    pub status: Option<ApplicationStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApplicationsPage {
    pub items: Vec<ApplicationListItem>,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub application_id: i64,
    pub status: ApplicationStatus,
}
