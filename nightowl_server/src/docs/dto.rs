use crate::{generate_schedule, info};
use nightowl_core::schedule::dto::{ErrorBody, ScheduleEntry, ScheduleRequest, ScheduleResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(info::handler::info, generate_schedule::handler::generate_schedule,),
    components(schemas(
        info::dto::Info,
        ScheduleRequest,
        ScheduleEntry,
        ScheduleResponse,
        ErrorBody
    ))
)]
pub struct ApiDoc;
