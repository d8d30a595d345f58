use super::*;
use sso_core::ID;
use sso_core::Unique;
use std::time::Duration;
use std::time::SystemTime;

/// Parameters for [`Service::login`].
#[derive(Debug, Clone)]
pub struct Login {
    pub email: String,
    pub password: String,
    pub app: ID<App>,
}

/// Parameters for [`Service::register`].
#[derive(Debug, Clone)]
pub struct Register {
    pub email: String,
    pub password: String,
}

/// Parameters for [`Service::is_admin`].
#[derive(Debug, Clone, Copy)]
pub struct IsAdmin {
    pub user: ID<User>,
}

/// Orchestrates credential checks, secret lookup, and token issuance.
///
/// Holds only injected collaborators and the access token lifetime, so a
/// single instance serves concurrent requests without locking.
pub struct Service {
    users: Box<dyn UserStore>,
    apps: Box<dyn AppStore>,
    admins: Box<dyn AdminStore>,
    hasher: Box<dyn Hasher>,
    issuer: Box<dyn TokenIssuer>,
    secrets: Box<dyn SecretResolver>,
    ttl: Duration,
}

impl Service {
    pub fn new<S>(
        store: S,
        hasher: impl Hasher + 'static,
        issuer: impl TokenIssuer + 'static,
        secrets: impl SecretResolver + 'static,
        ttl: Duration,
    ) -> Self
    where
        S: UserStore + AppStore + AdminStore + Clone + 'static,
    {
        Self {
            users: Box::new(store.clone()),
            apps: Box::new(store.clone()),
            admins: Box::new(store),
            hasher: Box::new(hasher),
            issuer: Box::new(issuer),
            secrets: Box::new(secrets),
            ttl,
        }
    }

    /// Verifies credentials and mints a session token for the app.
    ///
    /// Unknown email and wrong password are indistinguishable. Credentials
    /// are checked before the app, so an unknown app is only reported to
    /// callers who already proved who they are.
    pub async fn login(&self, ctx: &Context, params: Login) -> Result<String, AuthError> {
        const OP: &str = "login";
        let user = match ctx.run(self.users.find_by_email(&params.email)).await? {
            Ok(user) => user,
            Err(StoreError::NotFound) => return Err(AuthError::InvalidCredentials),
            Err(e) => return Err(AuthError::during(OP)(e)),
        };
        if !self.hasher.verify(&params.password, user.hashword()) {
            log::debug!("[auth] password mismatch for user {}", user.id());
            return Err(AuthError::InvalidCredentials);
        }
        let app = match ctx.run(self.apps.find_by_id(params.app)).await? {
            Ok(app) => app,
            Err(StoreError::NotFound) => return Err(AuthError::InvalidAppId),
            Err(e) => return Err(AuthError::during(OP)(e)),
        };
        let ref secret = self.secrets.resolve(app.id()).map_err(AuthError::during(OP))?;
        let expires = SystemTime::now()
            .checked_add(self.ttl)
            .ok_or(TokenError::Lifetime)
            .map_err(AuthError::during(OP))?;
        let ref claims = Claims::new(&user, &app, expires);
        let token = self
            .issuer
            .issue(claims, secret)
            .map_err(AuthError::during(OP))?;
        log::info!("[auth] user {} logged in to app {}", user.id(), app.id());
        Ok(token)
    }

    /// Creates an account and returns its store-assigned id.
    pub async fn register(&self, ctx: &Context, params: Register) -> Result<ID<User>, AuthError> {
        const OP: &str = "register";
        ctx.check()?;
        let ref hashword = self
            .hasher
            .hash(&params.password)
            .map_err(AuthError::during(OP))?;
        let id = match ctx.run(self.users.save(&params.email, hashword)).await? {
            Ok(id) => id,
            Err(StoreError::AlreadyExists) => return Err(AuthError::UserAlreadyExists),
            Err(e) => return Err(AuthError::during(OP)(e)),
        };
        log::info!("[auth] registered user {}", id);
        Ok(id)
    }

    /// Reports whether an existing user holds an admin marker.
    ///
    /// Unknown users fail with [`AuthError::InvalidUserId`]; known users
    /// without a marker are simply not admins.
    pub async fn is_admin(&self, ctx: &Context, params: IsAdmin) -> Result<bool, AuthError> {
        const OP: &str = "is_admin";
        match ctx.run(self.users.find_by_id(params.user)).await? {
            Ok(_) => {}
            Err(StoreError::NotFound) => return Err(AuthError::InvalidUserId),
            Err(e) => return Err(AuthError::during(OP)(e)),
        }
        match ctx.run(self.admins.find_by_user_id(params.user)).await? {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound) => Ok(false),
            Err(e) => Err(AuthError::during(OP)(e)),
        }
    }
}
