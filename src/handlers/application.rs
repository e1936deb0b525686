use actix_web::{
    web::{Data, Form, Json, Path, Query},
    HttpResponse,
};
use serde::Deserialize;
use sqlx::MySqlPool;

use crate::{
    core::{
        models::application::ApplicationDetail,
        parse::parse_numeric_id,
        ports::repository::ApplicationsRepository,
        query::RawListParams,
        services::application::{
            applications_list_redirect_url, load_applications_overview, update_application_status, ApplicationsOverview,
            ListRedirectParams, UpdateStatusResult,
        },
    },
    database::mysql::MySqlApplications,
    error::Error,
    response::see_other,
};

pub async fn index() -> HttpResponse {
    see_other("/applications")
}

pub async fn list(Query(raw): Query<RawListParams>, db: Data<MySqlPool>) -> Result<Json<ApplicationsOverview>, Error> {
    let overview = load_applications_overview(&mut MySqlApplications::new(db.acquire().await?), &raw).await?;
    Ok(Json(overview))
}

pub async fn detail(application_id: Path<(String,)>, db: Data<MySqlPool>) -> Result<Json<ApplicationDetail>, Error> {
    let application_id =
        parse_numeric_id(Some(&application_id.into_inner().0)).ok_or_else(|| Error::InvalidInput("application id".into()))?;
    let application = MySqlApplications::new(db.acquire().await?)
        .get_application_by_id(application_id)
        .await?
        .ok_or_else(|| Error::NotFound("application".into()))?;
    Ok(Json(application))
}

fn ensure_updated(result: UpdateStatusResult) -> Result<(), Error> {
    match result {
        UpdateStatusResult::Updated { .. } => Ok(()),
        UpdateStatusResult::InvalidStatus => Err(Error::InvalidInput("status".into())),
        UpdateStatusResult::NotFound => Err(Error::NotFound("application".into())),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusForm {
    pub application_id: Option<String>,
    pub status: Option<String>,
    pub program_id: Option<String>,
}

/// Status update submitted from the list view. On success the client is sent
/// back to the list with its filter and pagination state rebuilt.
pub async fn update_status(Form(form): Form<UpdateStatusForm>, Query(raw): Query<RawListParams>, db: Data<MySqlPool>) -> Result<HttpResponse, Error> {
    let application_id =
        parse_numeric_id(form.application_id.as_deref()).ok_or_else(|| Error::InvalidInput("application id".into()))?;
    let mut repo = MySqlApplications::new(db.acquire().await?);
    ensure_updated(update_application_status(&mut repo, application_id, form.status.as_deref()).await?)?;
    let next = applications_list_redirect_url(
        &mut repo,
        ListRedirectParams {
            program_id_from_form: parse_numeric_id(form.program_id.as_deref()),
            program_id_param_from_form: form.program_id.clone(),
            program_id_param_from_url: raw.program_id.clone(),
            raw,
        },
    )
    .await?;
    Ok(see_other(&next))
}

#[derive(Debug, Deserialize)]
pub struct DetailStatusForm {
    pub status: Option<String>,
}

/// Status update submitted from the detail view; redirects back to it.
pub async fn update_status_in_detail(
    application_id: Path<(String,)>,
    Form(form): Form<DetailStatusForm>,
    db: Data<MySqlPool>,
) -> Result<HttpResponse, Error> {
    let application_id =
        parse_numeric_id(Some(&application_id.into_inner().0)).ok_or_else(|| Error::InvalidInput("application id".into()))?;
    let mut repo = MySqlApplications::new(db.acquire().await?);
    ensure_updated(update_application_status(&mut repo, application_id, form.status.as_deref()).await?)?;
    Ok(see_other(&format!("/applications/{}", application_id)))
}
