use chrono::NaiveTime;
use sqlx::{query, query_as, Executor, MySql, QueryBuilder};

use crate::core::models::application::{ApplicationDetail, ApplicationsPage, ListApplicationsOptions, StatusUpdate};
use crate::core::models::program::Program;
use crate::core::ports::repository::ApplicationsRepository;
use crate::error::Error;

/// MySQL-backed [ApplicationsRepository]. Generic over the executor so it
/// runs against a pool connection or a transaction alike.
pub struct MySqlApplications<E>
where
    for<'e> &'e mut E: Executor<'e, Database = MySql>,
{
    executor: E,
}

impl<E> MySqlApplications<E>
where
    for<'e> &'e mut E: Executor<'e, Database = MySql>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

/// Escapes LIKE metacharacters so a search term only ever matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

fn push_filters(stmt: &mut QueryBuilder<MySql>, options: &ListApplicationsOptions) {
    if let Some(status) = options.status {
        stmt.push(" AND status = ").push_bind(status);
    }
    if let Some(from) = options.date_from {
        stmt.push(" AND created_at >= ").push_bind(from.and_time(NaiveTime::MIN));
    }
    // the upper bound is exclusive of the next day's midnight, so the whole
    // date_to day is included
    if let Some(to) = options.date_to.and_then(|d| d.succ_opt()) {
        stmt.push(" AND created_at < ").push_bind(to.and_time(NaiveTime::MIN));
    }
    if let Some(search) = &options.search {
        let pattern = format!("%{}%", escape_like(search));
        stmt.push(" AND (founder_name LIKE ")
            .push_bind(pattern.clone())
            .push(" OR email LIKE ")
            .push_bind(pattern.clone())
            .push(" OR startup_name LIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

impl<E> ApplicationsRepository for MySqlApplications<E>
where
    for<'e> &'e mut E: Executor<'e, Database = MySql>,
{
    async fn list_programs(&mut self) -> Result<Vec<Program>, Error> {
        let programs = query_as("SELECT id, name, is_active FROM program ORDER BY is_active DESC, name ASC")
            .fetch_all(&mut self.executor)
            .await?;
        Ok(programs)
    }

    async fn list_applications_by_program_id(&mut self, program_id: i64, options: &ListApplicationsOptions) -> Result<ApplicationsPage, Error> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM application WHERE program_id = ");
        count.push_bind(program_id);
        push_filters(&mut count, options);
        let (total,) = count.build_query_as().fetch_one(&mut self.executor).await?;

        let mut stmt = QueryBuilder::new(
            "SELECT id, program_id, founder_name, email, startup_name, created_at, status
        FROM application
        WHERE program_id = ",
        );
        stmt.push_bind(program_id);
        push_filters(&mut stmt, options);
        stmt.push(" ORDER BY created_at DESC LIMIT ").push_bind(options.limit);
        stmt.push(" OFFSET ").push_bind(options.offset);
        let items = stmt.build_query_as().fetch_all(&mut self.executor).await?;
        Ok(ApplicationsPage { items, total })
    }

    async fn get_application_by_id(&mut self, application_id: i64) -> Result<Option<ApplicationDetail>, Error> {
        let application = query_as(
            "SELECT
            a.id,
            a.program_id,
            a.founder_name,
            a.email,
            a.startup_name,
            a.created_at,
            a.status,
            p.name AS program_name,
            p.is_active AS program_is_active
        FROM application AS a
        JOIN program AS p ON a.program_id = p.id
        WHERE a.id = ?",
        )
        .bind(application_id)
        .fetch_optional(&mut self.executor)
        .await?;
        Ok(application)
    }

    async fn update_application_status(&mut self, update: StatusUpdate) -> Result<u64, Error> {
        let result = query("UPDATE application SET status = ? WHERE id = ?")
            .bind(update.status)
            .bind(update.application_id)
            .execute(&mut self.executor)
            .await?;
        Ok(result.rows_affected())
    }
}
