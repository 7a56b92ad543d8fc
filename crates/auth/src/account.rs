//! Sign-in and sign-up flows over the identity provider and record store.

use std::sync::Arc;

use thiserror::Error;

use crate::identity::{AuthError, IdentityProvider, Session, UserIdentity};
use crate::records::{RecordStore, UserRecord, WriteError};

#[derive(Debug, Error)]
pub enum SignupError {
    #[error("passwords do not match")]
    PasswordMismatch,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("user record could not be written: {0}")]
    Record(#[from] WriteError),

    #[error("user record could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Account flows bound to explicitly supplied collaborators.
#[derive(Clone)]
pub struct AccountService {
    identity: Arc<dyn IdentityProvider>,
    records: Arc<dyn RecordStore>,
    default_admin: bool,
}

impl core::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AccountService")
            .field("default_admin", &self.default_admin)
            .finish_non_exhaustive()
    }
}

impl AccountService {
    pub fn new(identity: Arc<dyn IdentityProvider>, records: Arc<dyn RecordStore>) -> Self {
        Self {
            identity,
            records,
            default_admin: true,
        }
    }

    /// Admin flag stored on newly registered users.
    pub fn with_default_admin(mut self, default_admin: bool) -> Self {
        self.default_admin = default_admin;
        self
    }

    /// Register a user and store their `users/{uid}` record.
    ///
    /// A confirmation mismatch is rejected before any provider call. If the
    /// record write fails the account still exists at the provider; the
    /// error is reported so the caller can tell the user.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<UserIdentity, SignupError> {
        if password != confirm_password {
            return Err(SignupError::PasswordMismatch);
        }

        let identity = self.identity.sign_up(email, password).await.map_err(|err| {
            tracing::warn!(error = %err, "sign-up rejected");
            err
        })?;

        let record = UserRecord {
            email: identity.email.clone(),
            is_admin: self.default_admin,
        };
        let path = UserRecord::path_for(identity.uid);
        self.records
            .write(&path, serde_json::to_value(&record)?)
            .await
            .map_err(|err| {
                tracing::error!(uid = %identity.uid, error = %err, "user record write failed");
                err
            })?;

        tracing::info!(uid = %identity.uid, is_admin = record.is_admin, "user registered");
        Ok(identity)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self.identity.sign_in(email, password).await.map_err(|err| {
            tracing::warn!(error = %err, "sign-in failed");
            err
        })?;
        tracing::info!(uid = %session.user.uid, "signed in");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::InMemoryIdentityProvider;
    use crate::records::InMemoryRecordStore;

    struct RejectingStore;

    #[async_trait::async_trait]
    impl RecordStore for RejectingStore {
        async fn write(&self, path: &str, _record: serde_json::Value) -> Result<(), WriteError> {
            Err(WriteError::Denied {
                path: path.to_string(),
            })
        }
    }

    fn service() -> (AccountService, Arc<InMemoryRecordStore>) {
        let records = Arc::new(InMemoryRecordStore::new());
        let service = AccountService::new(Arc::new(InMemoryIdentityProvider::new()), records.clone());
        (service, records)
    }

    #[tokio::test]
    async fn register_writes_user_record() {
        let (service, records) = service();
        let identity = service.register("ana@example.com", "secret1", "secret1").await.unwrap();

        let stored = records.read(&format!("users/{}", identity.uid)).unwrap();
        assert_eq!(
            stored,
            serde_json::json!({ "email": "ana@example.com", "isAdmin": true })
        );
    }

    #[tokio::test]
    async fn register_respects_default_admin_flag() {
        let records = Arc::new(InMemoryRecordStore::new());
        let service = AccountService::new(Arc::new(InMemoryIdentityProvider::new()), records.clone())
            .with_default_admin(false);
        let identity = service.register("bo@example.com", "secret1", "secret1").await.unwrap();

        let stored: UserRecord =
            serde_json::from_value(records.read(&UserRecord::path_for(identity.uid)).unwrap()).unwrap();
        assert!(!stored.is_admin);
    }

    #[tokio::test]
    async fn mismatch_is_rejected_before_any_call() {
        let (service, records) = service();
        let err = service.register("ana@example.com", "secret1", "secret2").await.unwrap_err();
        assert!(matches!(err, SignupError::PasswordMismatch));
        assert!(records.is_empty());

        // The email was never registered, so it is still free.
        service.register("ana@example.com", "secret1", "secret1").await.unwrap();
    }

    #[tokio::test]
    async fn provider_errors_propagate() {
        let (service, records) = service();
        service.register("ana@example.com", "secret1", "secret1").await.unwrap();
        let err = service.register("ana@example.com", "secret1", "secret1").await.unwrap_err();
        assert!(matches!(err, SignupError::Auth(AuthError::EmailInUse)));
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn record_write_failure_is_reported() {
        let service = AccountService::new(Arc::new(InMemoryIdentityProvider::new()), Arc::new(RejectingStore));
        let err = service.register("ana@example.com", "secret1", "secret1").await.unwrap_err();
        assert!(matches!(err, SignupError::Record(WriteError::Denied { .. })));
    }

    #[tokio::test]
    async fn sign_in_after_register() {
        let (service, _) = service();
        let identity = service.register("ana@example.com", "secret1", "secret1").await.unwrap();
        let session = service.sign_in("ana@example.com", "secret1").await.unwrap();
        assert_eq!(session.user, identity);
        assert_eq!(
            service.sign_in("ana@example.com", "nope!!").await.unwrap_err(),
            AuthError::InvalidCredentials
        );
    }
}
