use super::*;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Request-scoped cancellation and deadline.
///
/// Every store call made by the [`Service`] goes through [`Context::run`],
/// so a cancelled or expired request stops waiting on I/O and reports
/// [`AuthError::Cancelled`] or [`AuthError::DeadlineExceeded`] instead of
/// a domain outcome.
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// Never cancelled, no deadline.
    pub fn background() -> Self {
        Self::default()
    }
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().timeout(timeout)
    }
    /// Tightens the deadline to `timeout` from now. Never extends it.
    /// A timeout past the clock's range leaves the deadline unchanged.
    pub fn timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => Self {
                deadline: Some(self.deadline.map_or(deadline, |d| d.min(deadline))),
                ..self
            },
            None => self,
        }
    }
    pub fn cancel(&self) {
        self.token.cancel();
    }
    /// Fails fast when the request is already over.
    pub fn check(&self) -> Result<(), AuthError> {
        if self.token.is_cancelled() {
            return Err(AuthError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(AuthError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
    /// Races `future` against cancellation and the deadline.
    pub async fn run<F>(&self, future: F) -> Result<F::Output, AuthError>
    where
        F: Future,
    {
        self.check()?;
        let expiry = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(AuthError::Cancelled),
            _ = expiry => Err(AuthError::DeadlineExceeded),
            output = future => Ok(output),
        }
    }
}
