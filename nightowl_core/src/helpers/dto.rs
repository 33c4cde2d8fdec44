use std::{env, fmt};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";

pub enum Endpoints {
    GenerateSchedule,
    Info,
    Docs,
}

impl Endpoints {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoints::GenerateSchedule => "/api/generate-schedule",
            Endpoints::Info => "/",
            Endpoints::Docs => "/docs",
        }
    }

    pub fn url(&self, backend_url: &str) -> String {
        format!("{}{}", backend_url.trim_end_matches('/'), self.path())
    }
}

pub fn backend_url() -> String {
    env::var("BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
}

impl fmt::Display for Endpoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url(&backend_url()))
    }
}
