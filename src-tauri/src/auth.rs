//! Login gate.
//!
//! This is a placeholder gate, not a security boundary: one fixed credential
//! pair is compared in memory and success is remembered as a plain flag in
//! the [`LocalStore`]. Real deployments need an external identity service.

use crate::error::AppError;
use crate::store::LocalStore;

/// Key of the persisted login flag.
pub const LOGIN_FLAG_KEY: &str = "isLoggedIn";

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "admin123";

pub fn check_credentials(username: &str, password: &str) -> bool {
    username == ADMIN_USERNAME && password == ADMIN_PASSWORD
}

/// Login state backed by the persisted flag.
#[derive(Debug, Clone)]
pub struct Session {
    store: LocalStore,
}

impl Session {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Whether a previous login is still remembered. Consulted on startup so
    /// the gate can be skipped.
    pub fn is_logged_in(&self) -> Result<bool, AppError> {
        Ok(self.store.get_item(LOGIN_FLAG_KEY)?.as_deref() == Some("true"))
    }

    /// Check the credentials and remember the login on success.
    ///
    /// A mismatch returns [`AppError::InvalidCredentials`] and leaves the
    /// stored flag untouched.
    pub fn login(&self, username: &str, password: &str) -> Result<(), AppError> {
        if !check_credentials(username, password) {
            return Err(AppError::InvalidCredentials);
        }
        self.store.set_item(LOGIN_FLAG_KEY, "true")?;
        Ok(())
    }

    pub fn logout(&self) -> Result<(), AppError> {
        self.store.remove_item(LOGIN_FLAG_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_session() -> (tempfile::TempDir, Session) {
        let dir = tempfile::tempdir().expect("temp dir");
        let session = Session::new(LocalStore::in_data_dir(dir.path()));
        (dir, session)
    }

    #[test]
    fn credentials_must_match_exactly() {
        assert!(check_credentials("admin", "admin123"));
        assert!(!check_credentials("admin", "admin"));
        assert!(!check_credentials("Admin", "admin123"));
        assert!(!check_credentials("", ""));
    }

    #[test]
    fn fresh_session_is_logged_out() {
        let (_dir, session) = temp_session();
        assert!(!session.is_logged_in().expect("status"));
    }

    #[test]
    fn login_persists_flag() {
        let (dir, session) = temp_session();
        session.login("admin", "admin123").expect("login");
        assert!(session.is_logged_in().expect("status"));

        // A new process sees the same flag.
        let reopened = Session::new(LocalStore::in_data_dir(dir.path()));
        assert!(reopened.is_logged_in().expect("status"));
    }

    #[test]
    fn bad_credentials_do_not_change_state() {
        let (_dir, session) = temp_session();
        let result = session.login("admin", "wrong");
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
        assert!(!session.is_logged_in().expect("status"));
    }

    #[test]
    fn logout_clears_flag() {
        let (_dir, session) = temp_session();
        session.login("admin", "admin123").expect("login");
        session.logout().expect("logout");
        assert!(!session.is_logged_in().expect("status"));
    }

    #[test]
    fn flag_other_than_true_is_logged_out() {
        let (dir, session) = temp_session();
        LocalStore::in_data_dir(dir.path())
            .set_item(LOGIN_FLAG_KEY, "yes")
            .expect("set");
        assert!(!session.is_logged_in().expect("status"));
    }
}
