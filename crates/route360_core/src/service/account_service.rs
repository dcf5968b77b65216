//! Local account use-cases: register, sign in/out, display name.
//!
//! # Invariants
//! - Emails are stored trimmed and lowercased and are unique.
//! - Only the SHA-256 hex digest of a password is stored.
//! - This is a convenience gate for a single-user device, not a security
//!   boundary.

use crate::model::user::User;
use crate::repo::{AccountRepository, RepoError};
use crate::storage::StorageScope;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Display name used when nothing better is known.
pub const GUEST_NAME: &str = "Guest";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

#[derive(Debug)]
pub enum AccountError {
    EmptyName,
    InvalidEmail(String),
    EmptyPassword,
    DuplicateEmail(String),
    InvalidCredentials,
    NotSignedIn,
    Repo(RepoError),
}

impl Display for AccountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name cannot be empty"),
            Self::InvalidEmail(value) => write!(f, "invalid email: `{value}`"),
            Self::EmptyPassword => write!(f, "password cannot be empty"),
            Self::DuplicateEmail(value) => write!(f, "an account already exists for {value}"),
            Self::InvalidCredentials => write!(f, "email or password is incorrect"),
            Self::NotSignedIn => write!(f, "no user is signed in"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AccountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AccountError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type AccountResult<T> = Result<T, AccountError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct AccountService<R: AccountRepository> {
    repo: R,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers and signs in a new user.
    pub fn register(&self, registration: Registration) -> AccountResult<User> {
        let name = registration.name.trim();
        if name.is_empty() {
            return Err(AccountError::EmptyName);
        }
        let email = registration.email.trim().to_lowercase();
        if !EMAIL_RE.is_match(&email) {
            return Err(AccountError::InvalidEmail(email));
        }
        if registration.password.is_empty() {
            return Err(AccountError::EmptyPassword);
        }
        if self.repo.find_by_email(&email)?.is_some() {
            return Err(AccountError::DuplicateEmail(email));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email,
            password_hash: hash_password(&registration.password),
        };
        self.repo.insert_user(&user)?;
        self.repo.set_current_user_id(&user.id)?;
        info!("event=account_register module=accounts status=ok user_id={}", user.id);
        Ok(user)
    }

    pub fn sign_in(&self, email: &str, password: &str) -> AccountResult<User> {
        let user = self
            .repo
            .find_by_email(email)?
            .filter(|user| user.password_hash == hash_password(password))
            .ok_or(AccountError::InvalidCredentials)?;
        self.repo.set_current_user_id(&user.id)?;
        info!("event=account_sign_in module=accounts status=ok user_id={}", user.id);
        Ok(user)
    }

    pub fn sign_out(&self) -> AccountResult<()> {
        Ok(self.repo.clear_current_user_id()?)
    }

    /// Signed-in user, if the stored id still names a registered user.
    pub fn current_user(&self) -> AccountResult<Option<User>> {
        match self.repo.current_user_id()? {
            Some(id) => Ok(self.repo.find_by_id(&id)?),
            None => Ok(None),
        }
    }

    pub fn require_current_user(&self) -> AccountResult<User> {
        self.current_user()?.ok_or(AccountError::NotSignedIn)
    }

    /// Display name: the stored one, else the registered name (which is then
    /// stored), else "Guest".
    pub fn display_name(&self, user: Option<&User>) -> AccountResult<String> {
        let Some(user) = user else {
            return Ok(GUEST_NAME.to_string());
        };
        let scope = StorageScope::for_user(&user.id);
        if let Some(name) = self.repo.display_name(&scope)? {
            return Ok(name);
        }
        let name = if user.name.trim().is_empty() {
            GUEST_NAME.to_string()
        } else {
            user.name.clone()
        };
        self.repo.set_display_name(&scope, &name)?;
        Ok(name)
    }

    /// Sets the display name. Blank input is ignored; returns whether it was
    /// stored.
    pub fn set_display_name(&self, user: &User, name: &str) -> AccountResult<bool> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }
        self.repo
            .set_display_name(&StorageScope::for_user(&user.id), trimmed)?;
        Ok(true)
    }
}

/// Lowercase hex SHA-256 of `password`.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
