use log::Level;

pub const LOGIN_ROUTE: &str = "/qr_login";
pub const COMMUNITY_ROUTE: &str = "/community";
pub const API_BASE: &str = "/api";

/// Runtime settings shared by the request helper, the api client and the pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where the browser goes once the server reports an expired session.
    pub login_route: String,
    pub community_route: String,
    pub session_expired_message: String,
    pub api_base: String,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            login_route: LOGIN_ROUTE.to_owned(),
            community_route: COMMUNITY_ROUTE.to_owned(),
            session_expired_message: "Please log in again".to_owned(),
            api_base: API_BASE.to_owned(),
            log_level: Level::Info,
        }
    }
}

impl Config {
    /// Debug builds log everything the request pipeline reports.
    pub fn for_build() -> Self {
        let log_level = if cfg!(debug_assertions) {
            Level::Debug
        } else {
            Level::Info
        };
        Self {
            log_level,
            ..Self::default()
        }
    }
}
