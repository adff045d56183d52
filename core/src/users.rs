use anyhow::Result;
use tracing::info;

use crate::entry_log::EntryLog;
use crate::error::ValidationError;
use crate::models::{USERS_KEY, UserAccount};
use crate::store::KeyValueStore;

/// Toy account list kept in plain text under `users`.
pub struct UserDirectory<'s> {
    log: EntryLog<'s, UserAccount>,
}

impl<'s> UserDirectory<'s> {
    pub fn new(store: &'s dyn KeyValueStore) -> Self {
        Self {
            log: EntryLog::new(store, USERS_KEY),
        }
    }

    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<UserAccount> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ValidationError::new("Please fill in all fields!").into());
        }
        if self.log.load()?.iter().any(|u| u.email == email) {
            return Err(ValidationError::new("User already exists! Please log in.").into());
        }

        let account = UserAccount {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.log.append(account.clone())?;
        info!(email, "registered user");
        Ok(account)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<UserAccount> {
        if email.is_empty() || password.is_empty() {
            return Err(ValidationError::new("Please fill in all fields!").into());
        }
        self.log
            .load()?
            .into_iter()
            .find(|u| u.email == email && u.password == password)
            .ok_or_else(|| {
                ValidationError::new("Invalid credentials! Please register first.").into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::is_validation;
    use crate::store::MemoryStore;

    #[test]
    fn test_register_then_login() {
        let store = MemoryStore::new();
        let users = UserDirectory::new(&store);
        users.register("Ada", "ada@example.com", "secret").unwrap();

        let account = users.login("ada@example.com", "secret").unwrap();
        assert_eq!(account.name, "Ada");
    }

    #[test]
    fn test_register_rejects_empty_fields() {
        let store = MemoryStore::new();
        let users = UserDirectory::new(&store);
        assert!(is_validation(
            &users.register("", "a@b.c", "pw").unwrap_err()
        ));
        assert!(is_validation(&users.register("A", "", "pw").unwrap_err()));
        assert!(is_validation(
            &users.register("A", "a@b.c", "").unwrap_err()
        ));
        assert!(store.get(USERS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_register_duplicate_email() {
        let store = MemoryStore::new();
        let users = UserDirectory::new(&store);
        users.register("Ada", "ada@example.com", "one").unwrap();
        let err = users
            .register("Other Ada", "ada@example.com", "two")
            .unwrap_err();
        assert!(is_validation(&err));
        assert_eq!(err.to_string(), "User already exists! Please log in.");
    }

    #[test]
    fn test_login_wrong_password() {
        let store = MemoryStore::new();
        let users = UserDirectory::new(&store);
        users.register("Ada", "ada@example.com", "secret").unwrap();
        let err = users.login("ada@example.com", "nope").unwrap_err();
        assert!(is_validation(&err));
        assert!(is_validation(&users.login("", "secret").unwrap_err()));
    }

    #[test]
    fn test_stored_shape() {
        let store = MemoryStore::new();
        let users = UserDirectory::new(&store);
        users.register("Ada", "ada@example.com", "pw").unwrap();
        assert_eq!(
            store.get(USERS_KEY).unwrap().as_deref(),
            Some(r#"[{"name":"Ada","email":"ada@example.com","password":"pw"}]"#)
        );
    }
}
