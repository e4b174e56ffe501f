use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use warden_core::{
    UserId, VerificationCode, VerificationCodeId, VerificationCodeKind, VerificationCodeStore,
    VerificationCodeStoreError,
};

#[derive(Default, Clone)]
pub struct HashMapVerificationCodeStore {
    codes: Arc<RwLock<HashMap<VerificationCodeId, VerificationCode>>>,
}

impl HashMapVerificationCodeStore {
    pub fn new() -> Self {
        Self {
            codes: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl VerificationCodeStore for HashMapVerificationCodeStore {
    async fn add_code(&self, code: VerificationCode) -> Result<(), VerificationCodeStoreError> {
        let mut codes = self.codes.write().await;
        codes.insert(code.id, code);
        Ok(())
    }

    async fn find_valid_code(
        &self,
        id: VerificationCodeId,
        kind: VerificationCodeKind,
    ) -> Result<VerificationCode, VerificationCodeStoreError> {
        let codes = self.codes.read().await;
        codes
            .get(&id)
            .filter(|code| code.kind == kind && !code.is_expired_at(Utc::now()))
            .cloned()
            .ok_or(VerificationCodeStoreError::CodeNotFound)
    }

    async fn delete_code(&self, id: VerificationCodeId) -> Result<(), VerificationCodeStoreError> {
        let mut codes = self.codes.write().await;
        codes
            .remove(&id)
            .ok_or(VerificationCodeStoreError::CodeNotFound)?;
        Ok(())
    }

    async fn count_codes_created_since(
        &self,
        user_id: UserId,
        kind: VerificationCodeKind,
        since: DateTime<Utc>,
    ) -> Result<u64, VerificationCodeStoreError> {
        let codes = self.codes.read().await;
        let count = codes
            .values()
            .filter(|code| code.user_id == user_id && code.kind == kind && code.created_at > since)
            .count();
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[tokio::test]
    async fn test_expired_code_fails_the_valid_lookup_but_stays_stored() {
        let store = HashMapVerificationCodeStore::new();
        let code = VerificationCode::new(
            UserId::new(),
            VerificationCodeKind::PasswordReset,
            Duration::hours(-1),
        );
        store.add_code(code.clone()).await.unwrap();

        let result = store
            .find_valid_code(code.id, VerificationCodeKind::PasswordReset)
            .await;
        assert_eq!(result, Err(VerificationCodeStoreError::CodeNotFound));

        // inert, but still present until deleted
        assert!(store.delete_code(code.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_kind_mismatch_fails_the_valid_lookup() {
        let store = HashMapVerificationCodeStore::new();
        let code = VerificationCode::new(
            UserId::new(),
            VerificationCodeKind::EmailVerification,
            Duration::days(365),
        );
        store.add_code(code.clone()).await.unwrap();

        let result = store
            .find_valid_code(code.id, VerificationCodeKind::PasswordReset)
            .await;
        assert_eq!(result, Err(VerificationCodeStoreError::CodeNotFound));
    }

    #[tokio::test]
    async fn test_count_is_scoped_to_user_kind_and_window() {
        let store = HashMapVerificationCodeStore::new();
        let user = UserId::new();
        let other = UserId::new();

        for _ in 0..2 {
            store
                .add_code(VerificationCode::new(
                    user,
                    VerificationCodeKind::PasswordReset,
                    Duration::hours(1),
                ))
                .await
                .unwrap();
        }
        store
            .add_code(VerificationCode::new(
                user,
                VerificationCodeKind::EmailVerification,
                Duration::days(365),
            ))
            .await
            .unwrap();
        store
            .add_code(VerificationCode::new(
                other,
                VerificationCodeKind::PasswordReset,
                Duration::hours(1),
            ))
            .await
            .unwrap();

        let since = Utc::now() - Duration::minutes(5);
        let count = store
            .count_codes_created_since(user, VerificationCodeKind::PasswordReset, since)
            .await
            .unwrap();
        assert_eq!(count, 2);

        // codes created before the window are not counted
        let since = Utc::now() + Duration::minutes(1);
        let count = store
            .count_codes_created_since(user, VerificationCodeKind::PasswordReset, since)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
