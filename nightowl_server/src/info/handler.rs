use axum::Json;

use super::dto::Info;

#[utoipa::path(
    get,
    path = "/",
    description = "Service information",
    responses(
        (status = 200, description = "Success", body = Info),
    )
)]
pub async fn info() -> Json<Info> {
    Json(Info::default())
}
