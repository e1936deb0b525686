use actix_web::web::{Data, Json};
use sqlx::MySqlPool;

use crate::{
    core::{models::program::Program, ports::repository::ApplicationsRepository},
    database::mysql::MySqlApplications,
    error::Error,
    response::List,
};

pub async fn list(db: Data<MySqlPool>) -> Result<Json<List<Program>>, Error> {
    let programs = MySqlApplications::new(db.acquire().await?).list_programs().await?;
    let total = programs.len() as i64;
    Ok(Json(List::new(programs, total)))
}
