//! Storage key layout.

/// Global key holding the registered user list.
pub const USERS_KEY: &str = "route360_users";
/// Global key holding the signed-in user id.
pub const CURRENT_USER_KEY: &str = "route360_currentUserId";

const APP_PREFIX: &str = "route360_";
const VISITED_SUFFIX: &str = "visitedCountries_v1";
const TRIPS_SUFFIX: &str = "trips_v1";
const DISPLAY_NAME_SUFFIX: &str = "username_v1";

/// Opaque per-user key namespace.
///
/// Keys owned by the core are the prefix followed by a fixed suffix. The
/// prefix is taken verbatim; callers that manage users pick it.
///
/// The per-user keys are not the browser app's: it put the user id in the
/// middle (`route360_visitedCountries_<id>_v1`), which no single prefix can
/// express. Only the two global keys match it. Importing browser data means
/// renaming those keys first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageScope {
    prefix: String,
}

impl StorageScope {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Application namespace for one signed-in user: `route360_<id>_`.
    pub fn for_user(user_id: &str) -> Self {
        Self::new(format!("{APP_PREFIX}{user_id}_"))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn visited_countries_key(&self) -> String {
        format!("{}{VISITED_SUFFIX}", self.prefix)
    }

    pub fn trips_key(&self) -> String {
        format!("{}{TRIPS_SUFFIX}", self.prefix)
    }

    pub fn display_name_key(&self) -> String {
        format!("{}{DISPLAY_NAME_SUFFIX}", self.prefix)
    }
}
