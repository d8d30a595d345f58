use super::*;
use sso_core::ID;

/// Marker row granting elevated privilege to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Admin {
    user: ID<User>,
}

impl Admin {
    pub fn new(user: ID<User>) -> Self {
        Self { user }
    }
    pub fn user(&self) -> ID<User> {
        self.user
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use sso_pg::*;

    impl Schema for Admin {
        fn name() -> &'static str {
            ADMINS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                ADMINS,
                " (
                    id          BIGINT PRIMARY KEY REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE
                );"
            )
        }
        fn indices() -> &'static str {
            ""
        }
    }
}
