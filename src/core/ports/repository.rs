use crate::core::models::application::{ApplicationDetail, ApplicationsPage, ListApplicationsOptions, StatusUpdate};
use crate::core::models::program::Program;
use crate::error::Error;

/// Data access for programs and their applications. The MySQL implementation
/// lives in `database::mysql`; tests substitute an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait ApplicationsRepository {
    async fn list_programs(&mut self) -> Result<Vec<Program>, Error>;
    async fn list_applications_by_program_id(&mut self, program_id: i64, options: &ListApplicationsOptions) -> Result<ApplicationsPage, Error>;
    async fn get_application_by_id(&mut self, application_id: i64) -> Result<Option<ApplicationDetail>, Error>;
    /// Returns the number of rows changed; an unknown id yields 0 rather
    /// than an error.
    async fn update_application_status(&mut self, update: StatusUpdate) -> Result<u64, Error>;
}
