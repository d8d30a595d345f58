use sso_core::ID;
use sso_core::Unique;

/// Registered account. The hashword is an opaque PHC string that is only
/// ever checked through [`crate::Hasher::verify`].
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    id: ID<Self>,
    email: String,
    hashword: String,
}

impl User {
    pub fn new(id: ID<Self>, email: String, hashword: String) -> Self {
        Self {
            id,
            email,
            hashword,
        }
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn hashword(&self) -> &str {
        &self.hashword
    }
}

impl Unique for User {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use sso_pg::*;

    impl Schema for User {
        fn name() -> &'static str {
            USERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USERS,
                " (
                    id          BIGSERIAL PRIMARY KEY,
                    email       TEXT UNIQUE NOT NULL,
                    pass_hash   TEXT NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_users_email ON ",
                USERS,
                " (email);"
            )
        }
    }
}
