use sso_core::ID;
use sso_core::Unique;

/// Client application permitted to request session tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct App {
    id: ID<Self>,
    name: String,
}

impl App {
    pub fn new(id: ID<Self>, name: String) -> Self {
        Self { id, name }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Unique for App {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use sso_pg::*;

    /// App ids are assigned by operators, not by a sequence.
    impl Schema for App {
        fn name() -> &'static str {
            APPS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                APPS,
                " (
                    id          BIGINT PRIMARY KEY,
                    name        TEXT NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            ""
        }
    }
}
