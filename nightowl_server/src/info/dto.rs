use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct Info {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl Default for Info {
    fn default() -> Self {
        Info {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Night owl study planner: turns a task list into a nightly schedule"
                .to_string(),
        }
    }
}
