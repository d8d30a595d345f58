use super::*;
use sso_core::ID;
use sso_core::Unique;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::RwLock;

/// In-process store satisfying every data access contract.
///
/// Clones share the same tables. Email uniqueness is enforced under the
/// write lock, so concurrent registrations of one email cannot both win.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    tables: Arc<RwLock<Tables>>,
}

#[derive(Debug, Default)]
struct Tables {
    sequence: i64,
    users: HashMap<ID<User>, User>,
    emails: HashMap<String, ID<User>>,
    apps: HashMap<ID<App>, App>,
    admins: HashSet<ID<User>>,
}

impl Memory {
    pub fn insert_app(&self, app: App) -> Result<(), StoreError> {
        self.write(|t| {
            t.apps.insert(app.id(), app);
        })
    }
    pub fn grant_admin(&self, user: ID<User>) -> Result<(), StoreError> {
        self.write(|t| {
            t.admins.insert(user);
        })
    }
    pub fn users(&self) -> Result<usize, StoreError> {
        self.read(|t| t.users.len())
    }
    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> Result<T, StoreError> {
        self.tables
            .read()
            .map(|tables| f(&tables))
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))
    }
    fn write<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> Result<T, StoreError> {
        self.tables
            .write()
            .map(|mut tables| f(&mut tables))
            .map_err(|_| StoreError::Backend("memory store lock poisoned".into()))
    }
}

#[async_trait::async_trait]
impl UserStore for Memory {
    async fn save(&self, email: &str, hashword: &str) -> Result<ID<User>, StoreError> {
        self.write(|t| {
            if t.emails.contains_key(email) {
                return Err(StoreError::AlreadyExists);
            }
            t.sequence += 1;
            let id = ID::from(t.sequence);
            t.emails.insert(email.to_string(), id);
            t.users
                .insert(id, User::new(id, email.to_string(), hashword.to_string()));
            Ok(id)
        })?
    }
    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.read(|t| {
            t.emails
                .get(email)
                .and_then(|id| t.users.get(id))
                .cloned()
                .ok_or(StoreError::NotFound)
        })?
    }
    async fn find_by_id(&self, id: ID<User>) -> Result<User, StoreError> {
        self.read(|t| t.users.get(&id).cloned().ok_or(StoreError::NotFound))?
    }
}

#[async_trait::async_trait]
impl AppStore for Memory {
    async fn find_by_id(&self, id: ID<App>) -> Result<App, StoreError> {
        self.read(|t| t.apps.get(&id).cloned().ok_or(StoreError::NotFound))?
    }
}

#[async_trait::async_trait]
impl AdminStore for Memory {
    async fn find_by_user_id(&self, id: ID<User>) -> Result<Admin, StoreError> {
        self.read(|t| {
            t.admins
                .contains(&id)
                .then(|| Admin::new(id))
                .ok_or(StoreError::NotFound)
        })?
    }
}
