//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use database::mongodb::{id_filter, is_duplicate_key_error};
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    options::IndexOptions,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

const USERNAME_INDEX: &str = "idx_users_username_unique";
const EMAIL_INDEX: &str = "idx_users_email_unique";
const TOKEN_INDEX: &str = "idx_users_verification_token";

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<User>("users"),
        }
    }

    /// Unique username and email; the token index is sparse so redeemed
    /// users (no token field) do not collide.
    pub async fn init_indexes(&self) -> UserResult<()> {
        let unique = |field: &str, name: &str, sparse: bool| {
            let mut keys = Document::new();
            keys.insert(field, 1);
            IndexModel::builder()
                .keys(keys)
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .sparse(sparse)
                        .name(name.to_string())
                        .build(),
                )
                .build()
        };

        self.collection
            .create_indexes(vec![
                unique("username", USERNAME_INDEX, false),
                unique("email", EMAIL_INDEX, false),
                unique("emailVerificationToken", TOKEN_INDEX, true),
            ])
            .await?;
        tracing::info!("User indexes created successfully");
        Ok(())
    }
}

/// Map a unique index violation to the matching conflict.
fn map_insert_error(err: mongodb::error::Error) -> UserError {
    if is_duplicate_key_error(&err) {
        let message = err.to_string();
        if message.contains(EMAIL_INDEX) {
            return UserError::EmailTaken;
        }
        if message.contains(USERNAME_INDEX) {
            return UserError::UsernameTaken;
        }
    }
    err.into()
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: User) -> UserResult<User> {
        self.collection
            .insert_one(&user)
            .await
            .map_err(map_insert_error)?;
        tracing::info!("User created successfully");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "username": username }).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    #[instrument(skip(self, token))]
    async fn find_by_verification_token(&self, token: &str) -> UserResult<Option<User>> {
        Ok(self
            .collection
            .find_one(doc! { "emailVerificationToken": token })
            .await?)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: User) -> UserResult<User> {
        let result = self.collection.replace_one(id_filter(user.id), &user).await?;
        if result.matched_count == 0 {
            return Err(UserError::NotFound);
        }
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        if result.deleted_count > 0 {
            tracing::info!(user_id = %id, "User deleted");
        }
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::to_raw_document_buf;
    use test_utils::{TestDataBuilder, TestMongo};

    fn user(builder: &TestDataBuilder, username: &str, email: &str) -> User {
        User::new(
            builder.name("user", username),
            email.to_string(),
            "$argon2id$stub".to_string(),
            crate::password::generate_token(),
        )
    }

    #[test]
    fn test_id_filter_matches_stored_user() {
        let builder = TestDataBuilder::from_test_name("user_filter_encoding");
        let user = user(&builder, "carol", "carol@example.com");

        let stored = to_raw_document_buf(&user).unwrap().to_document().unwrap();
        assert_eq!(stored.get("_id"), id_filter(user.id).get("_id"));
    }

    #[tokio::test]
    #[ignore] // Requires Docker
    async fn test_lookup_update_and_delete_by_id() {
        let mongo = TestMongo::new().await;
        let repo = MongoUserRepository::new(&mongo.database());
        let builder = TestDataBuilder::from_test_name("mongo_users_by_id");

        let created = repo.create(user(&builder, "dave", "dave@example.com")).await.unwrap();
        let mut found = repo.find_by_id(created.id).await.unwrap().unwrap();
        found.mark_verified();
        repo.update(found).await.unwrap();
        assert!(repo.find_by_id(created.id).await.unwrap().unwrap().email_verified);

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        let err = repo.update(created).await.unwrap_err();
        assert!(matches!(err, UserError::NotFound));
    }

    #[tokio::test]
    #[ignore] // Requires Docker
    async fn test_unique_indexes_map_to_conflicts() {
        let mongo = TestMongo::new().await;
        let repo = MongoUserRepository::new(&mongo.database());
        repo.init_indexes().await.unwrap();
        let builder = TestDataBuilder::from_test_name("mongo_users_unique");

        repo.create(user(&builder, "alice", "alice@example.com")).await.unwrap();

        let dup_name = repo.create(user(&builder, "alice", "other@example.com")).await;
        assert!(matches!(dup_name, Err(UserError::UsernameTaken)));

        let dup_email = repo.create(user(&builder, "bob", "alice@example.com")).await;
        assert!(matches!(dup_email, Err(UserError::EmailTaken)));
    }

    #[tokio::test]
    #[ignore] // Requires Docker
    async fn test_redeemed_tokens_do_not_collide() {
        let mongo = TestMongo::new().await;
        let repo = MongoUserRepository::new(&mongo.database());
        repo.init_indexes().await.unwrap();
        let builder = TestDataBuilder::from_test_name("mongo_users_tokens");

        for (name, email) in [("a", "a@example.com"), ("b", "b@example.com")] {
            let created = repo.create(user(&builder, name, email)).await.unwrap();
            let token = created.email_verification_token.clone().unwrap();
            let mut found = repo.find_by_verification_token(&token).await.unwrap().unwrap();
            found.mark_verified();
            repo.update(found).await.unwrap();
        }

        let verified = repo
            .find_by_username(&builder.name("user", "a"))
            .await
            .unwrap()
            .unwrap();
        assert!(verified.email_verified);
        assert!(verified.email_verification_token.is_none());
    }
}
