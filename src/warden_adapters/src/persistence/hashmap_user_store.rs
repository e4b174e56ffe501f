use std::collections::HashMap;
use std::sync::Arc;

use secrecy::Secret;
use tokio::sync::RwLock;

use warden_core::{Email, User, UserId, UserStore, UserStoreError};

#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email() == user.email()) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(user.id(), user);
        Ok(())
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|user| user.email() == email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users.get(&id).cloned().ok_or(UserStoreError::UserNotFound)
    }

    async fn mark_verified(&self, id: UserId) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        user.set_verified();
        Ok(user.clone())
    }

    async fn set_password_hash(
        &self,
        id: UserId,
        password_hash: Secret<String>,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        user.set_password_hash(password_hash);
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        let email = Email::try_from(Secret::from(email.to_string())).unwrap();
        User::new(email, Secret::from("$argon2id$stub".to_string()))
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = HashMapUserStore::new();
        store.add_user(user("test@example.com")).await.unwrap();

        let result = store.add_user(user("test@example.com")).await;
        assert_eq!(result, Err(UserStoreError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn test_lookup_by_email_and_id() {
        let store = HashMapUserStore::new();
        let user = user("test@example.com");
        store.add_user(user.clone()).await.unwrap();

        let by_email = store.get_user_by_email(user.email()).await.unwrap();
        assert_eq!(by_email.id(), user.id());

        let by_id = store.get_user(user.id()).await.unwrap();
        assert_eq!(by_id.email(), user.email());
    }
}
