//! Registered users and the signed-in marker.

use super::RepoResult;
use crate::geo::normalize;
use crate::model::user::User;
use crate::storage::{
    read_json_list, write_json_list, KeyValueStore, StorageScope, CURRENT_USER_KEY, USERS_KEY,
};

pub trait AccountRepository {
    fn list_users(&self) -> RepoResult<Vec<User>>;
    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    fn find_by_id(&self, id: &str) -> RepoResult<Option<User>>;
    fn insert_user(&self, user: &User) -> RepoResult<()>;
    fn current_user_id(&self) -> RepoResult<Option<String>>;
    fn set_current_user_id(&self, id: &str) -> RepoResult<()>;
    fn clear_current_user_id(&self) -> RepoResult<()>;
    fn display_name(&self, scope: &StorageScope) -> RepoResult<Option<String>>;
    fn set_display_name(&self, scope: &StorageScope, name: &str) -> RepoResult<()>;
}

pub struct KvAccountRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvAccountRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> AccountRepository for KvAccountRepository<S> {
    fn list_users(&self) -> RepoResult<Vec<User>> {
        Ok(read_json_list(&self.store, USERS_KEY)?)
    }

    /// Email comparison is trim + case-insensitive.
    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let wanted = normalize(email);
        Ok(self
            .list_users()?
            .into_iter()
            .find(|user| normalize(user.email.as_str()) == wanted))
    }

    fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        Ok(self.list_users()?.into_iter().find(|user| user.id == id))
    }

    fn insert_user(&self, user: &User) -> RepoResult<()> {
        let mut users = self.list_users()?;
        users.push(user.clone());
        Ok(write_json_list(&self.store, USERS_KEY, &users)?)
    }

    fn current_user_id(&self) -> RepoResult<Option<String>> {
        Ok(self
            .store
            .get(CURRENT_USER_KEY)?
            .filter(|id| !id.trim().is_empty()))
    }

    fn set_current_user_id(&self, id: &str) -> RepoResult<()> {
        Ok(self.store.set(CURRENT_USER_KEY, id)?)
    }

    fn clear_current_user_id(&self) -> RepoResult<()> {
        Ok(self.store.remove(CURRENT_USER_KEY)?)
    }

    fn display_name(&self, scope: &StorageScope) -> RepoResult<Option<String>> {
        Ok(self
            .store
            .get(&scope.display_name_key())?
            .filter(|name| !name.trim().is_empty()))
    }

    fn set_display_name(&self, scope: &StorageScope, name: &str) -> RepoResult<()> {
        Ok(self.store.set(&scope.display_name_key(), name)?)
    }
}
