use crate::config::Config;

mod community;
pub use self::community::CommunityPage;

mod qr_login;
pub use self::qr_login::QrLoginPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    QrLogin,
    Community,
}

impl Page {
    /// Unknown paths land on the login page.
    pub fn from_path(path: &str, config: &Config) -> Self {
        if path.trim_end_matches('/') == config.community_route {
            Page::Community
        } else {
            Page::QrLogin
        }
    }
}
