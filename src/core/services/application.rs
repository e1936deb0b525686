use serde::Serialize;

use crate::core::models::application::{ApplicationListItem, ApplicationStatus, ListApplicationsOptions, StatusUpdate};
use crate::core::models::program::Program;
use crate::core::parse::parse_numeric_id;
use crate::core::ports::repository::ApplicationsRepository;
use crate::core::query::{
    applications_list_path, build_list_query_string, clamp_page, normalize_list_params, NormalizedListParams, RawListParams,
    APPLICATIONS_PAGE_SIZE,
};
use crate::error::Error;

/// Everything the applications list view needs for one request.
#[derive(Debug, Serialize)]
pub struct ApplicationsOverview {
    pub programs: Vec<Program>,
    pub selected_program_id: Option<i64>,
    pub applications: Vec<ApplicationListItem>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub status: Option<ApplicationStatus>,
    pub date_from_input_value: Option<String>,
    pub date_to_input_value: Option<String>,
    pub search: Option<String>,
}

/// Outcome of a status update. Expected failures are variants, not errors;
/// only repository trouble surfaces as `Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateStatusResult {
    Updated { affected: u64 },
    InvalidStatus,
    NotFound,
}

/// Resolves the program the list view should show: the requested one when it
/// exists, otherwise the first of the already-ordered program list.
pub fn pick_selected_program_id(program_id_param: Option<&str>, programs: &[Program]) -> Option<i64> {
    if let Some(id) = parse_numeric_id(program_id_param) {
        if programs.iter().any(|p| p.id == id) {
            return Some(id);
        }
    }
    programs.first().map(|p| p.id)
}

/// Validates the raw status value before the repository is touched, so an
/// unrecognized status never turns into a query.
pub async fn update_application_status<R>(repo: &mut R, application_id: i64, status: Option<&str>) -> Result<UpdateStatusResult, Error>
where
    R: ApplicationsRepository,
{
    let status = match status.and_then(|s| s.parse::<ApplicationStatus>().ok()) {
        Some(status) => status,
        None => return Ok(UpdateStatusResult::InvalidStatus),
    };
    let affected = repo.update_application_status(StatusUpdate { application_id, status }).await?;
    if affected == 0 {
        return Ok(UpdateStatusResult::NotFound);
    }
    Ok(UpdateStatusResult::Updated { affected })
}

/// Loads one page of the applications list. The count and the page are read
/// without a transaction, and the clamp re-fetch may run against a newer
/// table state than the first read; both reads agreeing is advisory only.
pub async fn load_applications_overview<R>(repo: &mut R, raw: &RawListParams) -> Result<ApplicationsOverview, Error>
where
    R: ApplicationsRepository,
{
    let programs = repo.list_programs().await?;
    let selected_program_id = pick_selected_program_id(raw.program_id.as_deref(), &programs);
    let normalized = normalize_list_params(raw, selected_program_id);
    let (applications, total, page) = match selected_program_id {
        Some(program_id) => {
            let mut options = ListApplicationsOptions {
                limit: APPLICATIONS_PAGE_SIZE,
                offset: (normalized.page - 1) * APPLICATIONS_PAGE_SIZE,
                status: normalized.status,
                date_from: normalized.date_from,
                date_to: normalized.date_to,
                search: normalized.search.clone(),
            };
            let mut listed = repo.list_applications_by_program_id(program_id, &options).await?;
            let total_pages = ((listed.total + APPLICATIONS_PAGE_SIZE - 1) / APPLICATIONS_PAGE_SIZE).max(1);
            let page = clamp_page(normalized.page, total_pages);
            if page != normalized.page {
                options.offset = (page - 1) * APPLICATIONS_PAGE_SIZE;
                listed = repo.list_applications_by_program_id(program_id, &options).await?;
            }
            (listed.items, listed.total, page)
        }
        None => (Vec::new(), 0, 1),
    };
    let NormalizedListParams {
        status,
        date_from_input_value,
        date_to_input_value,
        search,
        ..
    } = normalized;
    Ok(ApplicationsOverview {
        programs,
        selected_program_id,
        applications,
        total,
        page,
        page_size: APPLICATIONS_PAGE_SIZE,
        status,
        date_from_input_value,
        date_to_input_value,
        search,
    })
}

/// Inputs for rebuilding the list URL after a form submission. The form's
/// numeric program id wins; the string parameters are fallbacks for
/// re-resolving against the program list.
#[derive(Debug, Clone, Default)]
pub struct ListRedirectParams {
    pub program_id_from_form: Option<i64>,
    pub program_id_param_from_form: Option<String>,
    pub program_id_param_from_url: Option<String>,
    pub raw: RawListParams,
}

/// Builds the redirect target for the list view, preserving filter and
/// pagination state relative to the resolved program.
pub async fn applications_list_redirect_url<R>(repo: &mut R, input: ListRedirectParams) -> Result<String, Error>
where
    R: ApplicationsRepository,
{
    let selected_program_id = match input.program_id_from_form {
        Some(id) => Some(id),
        None => {
            let programs = repo.list_programs().await?;
            let param = input.program_id_param_from_form.or(input.program_id_param_from_url);
            pick_selected_program_id(param.as_deref(), &programs)
        }
    };
    let normalized = normalize_list_params(&input.raw, selected_program_id);
    let query = build_list_query_string(&normalized.to_query_params())?;
    Ok(applications_list_path(&query))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::models::application::{ApplicationDetail, ApplicationsPage};
    use chrono::NaiveDate;

    /// In-memory stand-in for the MySQL repository. Applications are only
    /// returned for offset 0, which is enough to observe clamp re-fetches.
    #[derive(Default)]
    struct FakeRepository {
        programs: Vec<Program>,
        items: Vec<ApplicationListItem>,
        total: i64,
        affected: u64,
        program_calls: usize,
        list_calls: Vec<(i64, ListApplicationsOptions)>,
        update_calls: Vec<StatusUpdate>,
    }

    impl ApplicationsRepository for FakeRepository {
        async fn list_programs(&mut self) -> Result<Vec<Program>, Error> {
            self.program_calls += 1;
            Ok(self.programs.clone())
        }

        async fn list_applications_by_program_id(&mut self, program_id: i64, options: &ListApplicationsOptions) -> Result<ApplicationsPage, Error> {
            self.list_calls.push((program_id, options.clone()));
            let items = if options.offset == 0 { self.items.clone() } else { Vec::new() };
            Ok(ApplicationsPage { items, total: self.total })
        }

        async fn get_application_by_id(&mut self, _application_id: i64) -> Result<Option<ApplicationDetail>, Error> {
            Ok(None)
        }

        async fn update_application_status(&mut self, update: StatusUpdate) -> Result<u64, Error> {
            self.update_calls.push(update);
            Ok(self.affected)
        }
    }

    fn program(id: i64, name: &str) -> Program {
        Program {
            id,
            name: name.into(),
            is_active: true,
        }
    }

    fn item(id: i64, program_id: i64) -> ApplicationListItem {
        ApplicationListItem {
            id,
            program_id,
            founder_name: "Founder".into(),
            email: "founder@example.com".into(),
            startup_name: "Startup".into(),
            created_at: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            status: ApplicationStatus::New,
        }
    }

    fn raw(overrides: impl FnOnce(&mut RawListParams)) -> RawListParams {
        let mut params = RawListParams::default();
        overrides(&mut params);
        params
    }

    #[test]
    fn test_pick_selected_program_id_uses_param_when_known() {
        let programs = vec![program(10, "A"), program(20, "B")];
        assert_eq!(pick_selected_program_id(Some("20"), &programs), Some(20));
    }

    #[test]
    fn test_pick_selected_program_id_falls_back_to_first() {
        let programs = vec![program(10, "A"), program(20, "B")];
        assert_eq!(pick_selected_program_id(Some("999"), &programs), Some(10));
        assert_eq!(pick_selected_program_id(Some("abc"), &programs), Some(10));
        assert_eq!(pick_selected_program_id(None, &programs), Some(10));
    }

    #[test]
    fn test_pick_selected_program_id_without_programs() {
        assert_eq!(pick_selected_program_id(Some("1"), &[]), None);
    }

    #[tokio::test]
    async fn test_overview_queries_selected_program() {
        let mut repo = FakeRepository {
            programs: vec![program(1, "P1"), program(2, "P2")],
            items: vec![item(123, 2)],
            total: 1,
            ..FakeRepository::default()
        };
        let overview = load_applications_overview(&mut repo, &raw(|r| r.program_id = Some("2".into()))).await.unwrap();
        assert_eq!(overview.selected_program_id, Some(2));
        assert_eq!(repo.list_calls.len(), 1);
        assert_eq!(repo.list_calls[0].0, 2);
        assert_eq!(overview.applications[0].program_id, 2);
        assert_eq!(overview.total, 1);
        assert_eq!(overview.page, 1);
        assert_eq!(overview.page_size, APPLICATIONS_PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_overview_without_programs_skips_listing() {
        let mut repo = FakeRepository::default();
        let overview = load_applications_overview(&mut repo, &raw(|r| r.program_id = Some("1".into()))).await.unwrap();
        assert_eq!(overview.selected_program_id, None);
        assert!(repo.list_calls.is_empty());
        assert!(overview.applications.is_empty());
        assert_eq!(overview.total, 0);
        assert_eq!(overview.page, 1);
        assert_eq!(overview.page_size, APPLICATIONS_PAGE_SIZE);
    }

    #[tokio::test]
    async fn test_overview_forwards_filters_and_pagination() {
        let mut repo = FakeRepository {
            programs: vec![program(1, "P1")],
            ..FakeRepository::default()
        };
        load_applications_overview(
            &mut repo,
            &raw(|r| {
                r.program_id = Some("1".into());
                r.page = Some("2".into());
                r.status = Some("accepted".into());
                r.date_from = Some("2025-01-01".into());
                r.date_to = Some("2025-02-01".into());
                r.search = Some("foo".into());
            }),
        )
        .await
        .unwrap();
        assert_eq!(repo.list_calls[0].0, 1);
        assert_eq!(
            repo.list_calls[0].1,
            ListApplicationsOptions {
                limit: APPLICATIONS_PAGE_SIZE,
                offset: APPLICATIONS_PAGE_SIZE,
                status: Some(ApplicationStatus::Accepted),
                date_from: NaiveDate::from_ymd_opt(2025, 1, 1),
                date_to: NaiveDate::from_ymd_opt(2025, 2, 1),
                search: Some("foo".into()),
            }
        );
    }

    #[tokio::test]
    async fn test_overview_defaults_invalid_params() {
        let mut repo = FakeRepository {
            programs: vec![program(1, "P1")],
            ..FakeRepository::default()
        };
        let overview = load_applications_overview(
            &mut repo,
            &raw(|r| {
                r.program_id = Some("1".into());
                r.page = Some("0".into());
                r.status = Some("invalid".into());
                r.search = Some("   ".into());
            }),
        )
        .await
        .unwrap();
        assert_eq!(overview.page, 1);
        assert_eq!(
            repo.list_calls[0].1,
            ListApplicationsOptions {
                limit: APPLICATIONS_PAGE_SIZE,
                offset: 0,
                ..ListApplicationsOptions::default()
            }
        );
    }

    #[tokio::test]
    async fn test_overview_clamps_page_and_refetches() {
        let mut repo = FakeRepository {
            programs: vec![program(1, "P1")],
            items: vec![item(1, 1)],
            total: 3,
            ..FakeRepository::default()
        };
        let overview = load_applications_overview(&mut repo, &raw(|r| {
            r.program_id = Some("1".into());
            r.page = Some("999".into());
        }))
        .await
        .unwrap();
        assert_eq!(overview.page, 1);
        assert_eq!(overview.total, 3);
        assert_eq!(overview.applications.len(), 1);
        assert_eq!(overview.applications[0].id, 1);
        assert_eq!(repo.list_calls.len(), 2);
        assert_eq!(repo.list_calls[1].1.offset, 0);
    }

    #[tokio::test]
    async fn test_update_status_rejects_unknown_status_without_repo_call() {
        let mut repo = FakeRepository::default();
        let result = update_application_status(&mut repo, 1, Some("bogus")).await.unwrap();
        assert_eq!(result, UpdateStatusResult::InvalidStatus);
        let result = update_application_status(&mut repo, 1, None).await.unwrap();
        assert_eq!(result, UpdateStatusResult::InvalidStatus);
        assert!(repo.update_calls.is_empty());
    }

    #[tokio::test]
    async fn test_update_status_reports_missing_row() {
        let mut repo = FakeRepository::default();
        let result = update_application_status(&mut repo, 42, Some("accepted")).await.unwrap();
        assert_eq!(result, UpdateStatusResult::NotFound);
        assert_eq!(repo.update_calls.len(), 1);
    }

    #[tokio::test]
    async fn test_update_status_applies_parsed_status() {
        let mut repo = FakeRepository {
            affected: 1,
            ..FakeRepository::default()
        };
        let result = update_application_status(&mut repo, 42, Some("rejected")).await.unwrap();
        assert_eq!(result, UpdateStatusResult::Updated { affected: 1 });
        assert_eq!(
            repo.update_calls[0],
            StatusUpdate {
                application_id: 42,
                status: ApplicationStatus::Rejected,
            }
        );
    }

    #[tokio::test]
    async fn test_redirect_url_preserves_list_params() {
        let mut repo = FakeRepository {
            programs: vec![program(1, "P1")],
            ..FakeRepository::default()
        };
        let url = applications_list_redirect_url(
            &mut repo,
            ListRedirectParams {
                program_id_from_form: Some(1),
                program_id_param_from_form: Some("1".into()),
                raw: raw(|r| {
                    r.page = Some("2".into());
                    r.status = Some("accepted".into());
                    r.date_from = Some("2025-01-01".into());
                    r.date_to = Some("2025-02-01".into());
                    r.search = Some("query".into());
                }),
                ..ListRedirectParams::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(url, "/applications?programId=1&page=2&status=accepted&dateFrom=2025-01-01&dateTo=2025-02-01&q=query");
        // the form already supplied the program id, no need to list programs
        assert_eq!(repo.program_calls, 0);
    }

    #[tokio::test]
    async fn test_redirect_url_strips_invalid_status() {
        let mut repo = FakeRepository {
            programs: vec![program(1, "P1")],
            ..FakeRepository::default()
        };
        let url = applications_list_redirect_url(
            &mut repo,
            ListRedirectParams {
                program_id_from_form: Some(1),
                program_id_param_from_form: Some("1".into()),
                raw: raw(|r| r.status = Some("bogus".into())),
                ..ListRedirectParams::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(url, "/applications?programId=1");
    }

    #[tokio::test]
    async fn test_redirect_url_resolves_program_from_url_param() {
        let mut repo = FakeRepository {
            programs: vec![program(1, "P1"), program(2, "P2")],
            ..FakeRepository::default()
        };
        let url = applications_list_redirect_url(
            &mut repo,
            ListRedirectParams {
                program_id_param_from_url: Some("2".into()),
                ..ListRedirectParams::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(url, "/applications?programId=2");
    }
}
