use nightowl_core::ai::handler::GeminiSettings;
use reqwest::Client;

/// Where model settings come from. `Environment` re-reads the process
/// environment on every request so a missing key is reported per call.
#[derive(Clone, Debug)]
pub enum SettingsSource {
    Environment,
    Fixed(GeminiSettings),
}

#[derive(Clone)]
pub struct ServerState {
    http: Client,
    settings: SettingsSource,
}

impl From<(Client, SettingsSource)> for ServerState {
    fn from(states: (Client, SettingsSource)) -> Self {
        let (http, settings) = states;
        Self { http, settings }
    }
}

impl ServerState {
    pub fn http(&self) -> Client {
        self.http.clone()
    }

    pub fn gemini_settings(&self) -> GeminiSettings {
        match &self.settings {
            SettingsSource::Environment => GeminiSettings::from_env(),
            SettingsSource::Fixed(settings) => settings.clone(),
        }
    }
}
