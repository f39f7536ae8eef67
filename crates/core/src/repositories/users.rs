//! User accounts: registration, login and profile updates.
//!
//! Users are never deleted. Doctor and patient profiles reference a user by id.

use super::{found, run_blocking};
use crate::models::{LoginCredentials, NewUser, User, UserProfileUpdate, UserRecord};
use crate::password::PasswordHasher;
use crate::store::{Collection, EntityStore, Filter};
use crate::{MrasError, MrasResult};
use chrono::Utc;
use mras_uuid::EntityId;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserService {
    users: Collection<UserRecord>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(store: Arc<dyn EntityStore>, password_iterations: u32) -> Self {
        Self {
            users: Collection::new(store),
            hasher: PasswordHasher::new(password_iterations),
        }
    }

    /// Registers a new user account.
    ///
    /// # Errors
    ///
    /// - `AlreadyRegistered` if the email is taken.
    /// - `InvalidInput` if the password is too short.
    pub async fn register(&self, req: NewUser) -> MrasResult<User> {
        let by_email = Filter::new().eq("email", req.email.as_str());
        if self.users.find_one(&by_email).await?.is_some() {
            return Err(MrasError::AlreadyRegistered("User".into()));
        }

        let hasher = self.hasher;
        let password = req.password;
        let password_hash = run_blocking(move || hasher.hash(&password)).await?;

        let now = Utc::now();
        let record = UserRecord {
            id: EntityId::new(),
            name: req.name,
            email: req.email,
            password_hash,
            role: req.role,
            phone: crate::models::normalise_optional_text(req.phone),
            avatar: String::new(),
            is_verified: false,
            created_at: now,
            updated_at: now,
        };

        let stored = self.users.insert(&record).await?;
        tracing::info!("registered user {} ({:?})", stored.id, stored.role);
        Ok(stored.into())
    }

    /// Checks credentials and returns the matching user.
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn login(&self, creds: LoginCredentials) -> MrasResult<User> {
        let by_email = Filter::new().eq("email", creds.email.as_str());
        let Some(record) = self.users.find_one(&by_email).await? else {
            return Err(MrasError::InvalidCredentials);
        };

        let hasher = self.hasher;
        let stored_hash = record.password_hash.clone();
        let password = creds.password;
        let valid = run_blocking(move || hasher.verify(&password, &stored_hash)).await?;
        if !valid {
            return Err(MrasError::InvalidCredentials);
        }

        Ok(record.into())
    }

    pub async fn get(&self, id: EntityId) -> MrasResult<User> {
        let record = found(self.users.find_by_id(id).await?, "user")?;
        Ok(record.into())
    }

    pub async fn update_profile(&self, id: EntityId, mut patch: UserProfileUpdate) -> MrasResult<User> {
        patch.phone = crate::models::normalise_optional_text(patch.phone);
        let record = found(self.users.update_by_id(id, &patch).await?, "user")?;
        Ok(record.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::repositories::test_support::*;

    fn service() -> UserService {
        UserService::new(memory_store(), 1)
    }

    fn new_user(email_addr: &str, password: &str) -> NewUser {
        NewUser {
            name: text("Ada"),
            email: email(email_addr),
            password: password.into(),
            role: Role::Admin,
            phone: Some("  ".into()),
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let users = service();
        let created = users
            .register(new_user("ada@example.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(created.role, Role::Admin);
        assert_eq!(created.phone, None);

        let logged_in = users
            .login(LoginCredentials {
                email: email("ADA@example.com"),
                password: "secret1".into(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.id, created.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_already_registered() {
        let users = service();
        users
            .register(new_user("ada@example.com", "secret1"))
            .await
            .unwrap();

        let err = users
            .register(new_user("ada@example.com", "another1"))
            .await
            .unwrap_err();
        assert!(matches!(err, MrasError::AlreadyRegistered(_)));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_invalid_credentials() {
        let users = service();
        users
            .register(new_user("ada@example.com", "secret1"))
            .await
            .unwrap();

        let wrong = users
            .login(LoginCredentials {
                email: email("ada@example.com"),
                password: "secret2".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(wrong, MrasError::InvalidCredentials));

        let unknown = users
            .login(LoginCredentials {
                email: email("nobody@example.com"),
                password: "secret1".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(unknown, MrasError::InvalidCredentials));
    }

    #[tokio::test]
    async fn short_password_is_rejected_and_nothing_stored() {
        let users = service();
        let err = users
            .register(new_user("ada@example.com", "abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, MrasError::InvalidInput(_)));

        users
            .register(new_user("ada@example.com", "secret1"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_profile_changes_only_given_fields() {
        let users = service();
        let created = users
            .register(new_user("ada@example.com", "secret1"))
            .await
            .unwrap();

        let updated = users
            .update_profile(
                created.id,
                UserProfileUpdate {
                    phone: Some("01632 960000".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.phone.as_deref(), Some("01632 960000"));
        assert_eq!(updated.name, created.name);
        assert!(updated.updated_at >= created.updated_at);

        let err = users
            .update_profile(EntityId::new(), UserProfileUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, MrasError::NotFound(what) if what == "user"));
    }
}
