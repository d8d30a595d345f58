/// Failures of the auth core.
///
/// The first four variants are domain outcomes that callers branch on.
/// `Cancelled` and `DeadlineExceeded` come from the request [`crate::Context`].
/// `Internal` covers everything else (store outages, hashing or signing
/// faults, missing secrets) and must never be matched by message text.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid app id")]
    InvalidAppId,
    #[error("invalid userId")]
    InvalidUserId,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("request cancelled")]
    Cancelled,
    #[error("deadline exceeded")]
    DeadlineExceeded,
    #[error(transparent)]
    Internal(anyhow::Error),
}

impl AuthError {
    /// Wraps an unexpected failure with the operation it interrupted.
    ///
    /// ```ignore
    /// self.hasher.hash(password).map_err(AuthError::during("register"))?;
    /// ```
    pub fn during<E>(operation: &'static str) -> impl FnOnce(E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        move |e| Self::Internal(anyhow::Error::new(e).context(operation))
    }
}
