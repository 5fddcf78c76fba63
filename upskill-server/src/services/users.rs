//! User CRUD

use std::sync::Arc;

use crate::db::UserStore;
use crate::error::{ServerError, ServerResult};
use crate::models::{NewUser, User, UserChanges};

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Register a user. The email pre-check answers with a readable conflict;
    /// the store's unique constraint still covers concurrent inserts.
    pub async fn create(&self, user: NewUser) -> ServerResult<User> {
        if self.store.find_by_email(&user.email).await?.is_some() {
            tracing::warn!(email = %user.email, "duplicate email rejected");
            return Err(ServerError::Conflict(format!(
                "O email '{}' já está cadastrado.",
                user.email
            )));
        }

        let created = self.store.create(user).await?;
        tracing::debug!(user_id = created.id, "user created");
        Ok(created)
    }

    pub async fn find_by_id(&self, id: i64) -> ServerResult<User> {
        Ok(self.store.find_by_id(id).await?)
    }

    pub async fn find_all(&self) -> ServerResult<Vec<User>> {
        Ok(self.store.find_all().await?)
    }

    pub async fn update(&self, id: i64, changes: UserChanges) -> ServerResult<User> {
        let mut user = self.store.find_by_id(id).await?;
        user.apply(changes);
        self.store.update(&user).await?;
        tracing::debug!(user_id = id, "user updated");
        Ok(user)
    }

    pub async fn delete(&self, id: i64) -> ServerResult<()> {
        self.store.delete(id).await?;
        tracing::debug!(user_id = id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDatabase;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryDatabase::new()))
    }

    fn ana() -> NewUser {
        NewUser {
            name: "Ana".into(),
            email: "ana@x.com".into(),
            area: "TI".into(),
            career_level: "Pleno".into(),
        }
    }

    #[tokio::test]
    async fn created_user_matches_input_and_can_be_fetched() {
        let users = service();
        let created = users.create(ana()).await.unwrap();

        assert!(created.id > 0);
        assert_eq!(created.name, "Ana");
        assert_eq!(created.email, "ana@x.com");
        assert_eq!(created.area, "TI");
        assert_eq!(created.career_level, "Pleno");
        assert_eq!(users.find_by_id(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict_and_adds_nothing() {
        let users = service();
        users.create(ana()).await.unwrap();

        let err = users.create(ana()).await.unwrap_err();
        match err {
            ServerError::Conflict(message) => assert!(message.contains("ana@x.com")),
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(users.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_user_is_not_found_on_every_path() {
        let users = service();

        for err in [
            users.find_by_id(42).await.unwrap_err(),
            users.update(42, UserChanges::default()).await.unwrap_err(),
            users.delete(42).await.unwrap_err(),
        ] {
            assert!(matches!(
                err,
                ServerError::NotFound { resource: "Usuário", id: 42 }
            ));
        }
    }

    #[tokio::test]
    async fn update_overlays_given_fields() {
        let users = service();
        let created = users.create(ana()).await.unwrap();

        let updated = users
            .update(
                created.id,
                UserChanges {
                    area: Some("Dados".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Ana");
        assert_eq!(updated.area, "Dados");
        assert_eq!(users.find_by_id(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn delete_removes_user() {
        let users = service();
        let created = users.create(ana()).await.unwrap();

        users.delete(created.id).await.unwrap();
        assert!(users.find_all().await.unwrap().is_empty());
    }
}
