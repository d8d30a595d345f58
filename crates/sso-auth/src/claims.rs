use super::*;
use sso_core::ID;
use sso_core::Unique;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

/// Session token payload.
///
/// Expiry is an absolute instant chosen by the caller, which keeps token
/// issuance a pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    pub app_id: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: &User, app: &App, expires: SystemTime) -> Self {
        Self {
            user_id: user.id().inner(),
            email: user.email().to_string(),
            app_id: app.id().inner(),
            exp: unix(expires),
        }
    }
    pub fn user(&self) -> ID<User> {
        ID::from(self.user_id)
    }
    pub fn app(&self) -> ID<App> {
        ID::from(self.app_id)
    }
    pub fn email(&self) -> &str {
        &self.email
    }
}

fn unix(time: SystemTime) -> i64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
