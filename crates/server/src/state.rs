use std::sync::Arc;

use adapter::{AuthService, BlogBackend, PresenceChannel};
use domain::LiveEvent;
use tokio::sync::broadcast;

use crate::config::Settings;

pub struct SiteConfig {
    pub title: String,
    pub cookie_name: String,
    pub cookie_max_age_secs: u64,
    pub secure_cookie: bool,
    pub heartbeat_interval_secs: u64,
}

impl From<&Settings> for SiteConfig {
    fn from(s: &Settings) -> Self {
        Self {
            title: s.site.title.clone(),
            cookie_name: s.auth.cookie_name.clone(),
            cookie_max_age_secs: s.auth.cookie_max_age_secs,
            secure_cookie: s.auth.secure_cookie,
            heartbeat_interval_secs: s.presence.heartbeat_interval_secs,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn BlogBackend>,
    pub auth: Arc<dyn AuthService>,
    pub presence: Arc<dyn PresenceChannel>,
    pub tx_live: broadcast::Sender<LiveEvent>,
    pub site: Arc<SiteConfig>,
}
