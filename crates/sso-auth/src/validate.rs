use super::*;
use sso_core::ID;
use std::sync::LazyLock;

static EMAIL: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid email regex pattern")
});

/// Request shape checks performed before the auth core is invoked.
///
/// Every failing field contributes one message, in field order, and the
/// messages are joined with `;`.
pub struct Validation(Vec<&'static str>);

impl Validation {
    pub fn register(req: &RegisterRequest) -> Result<(), String> {
        Self(Vec::new())
            .email(&req.email)
            .password(&req.password)
            .finish()
    }
    pub fn login(req: &LoginRequest) -> Result<(), String> {
        Self(Vec::new())
            .email(&req.email)
            .password(&req.password)
            .positive(ID::<App>::from(req.app_id), "invalid app id")
            .finish()
    }
    pub fn is_admin(req: &IsAdminRequest) -> Result<(), String> {
        Self(Vec::new())
            .positive(ID::<User>::from(req.user_id), "invalid userId")
            .finish()
    }
    fn email(self, email: &str) -> Self {
        self.require(EMAIL.is_match(email), "invalid email")
    }
    fn password(self, password: &str) -> Self {
        self.require(!password.is_empty(), "invalid password")
    }
    fn positive<T>(self, id: ID<T>, message: &'static str) -> Self {
        self.require(id.valid(), message)
    }
    fn require(mut self, ok: bool, message: &'static str) -> Self {
        if !ok {
            self.0.push(message);
        }
        self
    }
    fn finish(self) -> Result<(), String> {
        match self.0.is_empty() {
            true => Ok(()),
            false => Err(self.0.join(";")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    fn login(email: &str, password: &str, app_id: i64) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: password.into(),
            app_id,
        }
    }
    fn register(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.into(),
            password: password.into(),
        }
    }
    #[test]
    fn accepts_well_formed_requests() {
        assert!(Validation::register(&register("a@example.com", "pw")).is_ok());
        assert!(Validation::login(&login("a@example.com", "pw", 1)).is_ok());
        assert!(Validation::is_admin(&IsAdminRequest { user_id: 1 }).is_ok());
    }
    #[test]
    fn rejects_empty_or_malformed_email() {
        for email in ["", "invalid", "a@b", "a b@example.com", "@example.com"] {
            assert_eq!(
                Validation::register(&register(email, "pw")),
                Err(String::from("invalid email")),
                "{email:?}"
            );
        }
    }
    #[test]
    fn rejects_empty_password() {
        assert_eq!(
            Validation::register(&register("a@example.com", "")),
            Err(String::from("invalid password"))
        );
    }
    #[test]
    fn joins_field_errors_in_order() {
        assert_eq!(
            Validation::register(&register("invalid", "")),
            Err(String::from("invalid email;invalid password"))
        );
        assert_eq!(
            Validation::login(&login("", "", 0)),
            Err(String::from("invalid email;invalid password;invalid app id"))
        );
    }
    #[test]
    fn rejects_non_positive_ids() {
        assert_eq!(
            Validation::login(&login("a@example.com", "pw", -1)),
            Err(String::from("invalid app id"))
        );
        assert_eq!(
            Validation::is_admin(&IsAdminRequest { user_id: 0 }),
            Err(String::from("invalid userId"))
        );
    }
}
