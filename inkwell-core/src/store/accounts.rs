//! `AccountRegistry` over the SQLite `users` table
//!
//! The role is computed inside the INSERT, and the bootstrap insert is
//! conditional on the table being empty. SQLite serialises writers, so two
//! racing first registrations cannot both become admin.

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::auth::registry::AccountRegistry;
use crate::auth::types::{Identity, NewIdentity, RegistrationGrant, Role, StoredIdentity};
use crate::error::{InkwellError, Result};

use super::StoreSession;

const INSERT_BOOTSTRAP: &str = "
INSERT INTO users (email, hashed_password, role)
SELECT ?, ?, 'admin'
WHERE NOT EXISTS (SELECT 1 FROM users)
RETURNING id, email, role";

const INSERT_GRANTED: &str = "
INSERT INTO users (email, hashed_password, role)
SELECT ?, ?, CASE WHEN EXISTS (SELECT 1 FROM users) THEN 'user' ELSE 'admin' END
RETURNING id, email, role";

#[async_trait]
impl AccountRegistry for StoreSession {
    async fn is_empty(&mut self) -> Result<bool> {
        let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM users) AS present")
            .fetch_one(&mut *self.conn)
            .await?;
        let present: i64 = row.try_get("present")?;
        Ok(present == 0)
    }

    async fn find_by_id(&mut self, id: i64) -> Result<Option<Identity>> {
        let row = sqlx::query("SELECT id, email, role FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        row.as_ref().map(identity_from_row).transpose()
    }

    async fn find_by_email(&mut self, email: &str) -> Result<Option<StoredIdentity>> {
        let row = sqlx::query("SELECT id, email, role, hashed_password FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&mut *self.conn)
            .await?;

        match row {
            Some(row) => Ok(Some(StoredIdentity {
                identity: identity_from_row(&row)?,
                hashed_password: row.try_get("hashed_password")?,
            })),
            None => Ok(None),
        }
    }

    async fn create_identity(
        &mut self,
        new: NewIdentity,
        grant: &RegistrationGrant,
    ) -> Result<Option<Identity>> {
        let sql = match grant {
            RegistrationGrant::Bootstrap => INSERT_BOOTSTRAP,
            RegistrationGrant::Admin(_) => INSERT_GRANTED,
        };

        let result = sqlx::query(sql)
            .bind(new.email)
            .bind(new.hashed_password)
            .fetch_optional(&mut *self.conn)
            .await;

        match result {
            Ok(row) => row.as_ref().map(identity_from_row).transpose(),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(InkwellError::DuplicateIdentity)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn identity_from_row(row: &SqliteRow) -> Result<Identity> {
    let role: String = row.try_get("role")?;
    Ok(Identity {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        role: role.parse::<Role>()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use tempfile::TempDir;

    async fn test_store(dir: &TempDir) -> Store {
        Store::open(dir.path().join("accounts.db")).await.unwrap()
    }

    fn new_identity(email: &str) -> NewIdentity {
        NewIdentity {
            email: email.into(),
            hashed_password: "$argon2id$placeholder".into(),
        }
    }

    #[tokio::test]
    async fn test_first_identity_is_admin() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir).await;
        let mut session = store.session().await.unwrap();

        assert!(session.is_empty().await.unwrap());
        let admin = session
            .create_identity(new_identity("root@example.com"), &RegistrationGrant::Bootstrap)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(!session.is_empty().await.unwrap());

        let user = session
            .create_identity(new_identity("user@example.com"), &RegistrationGrant::Admin(admin.clone()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.role, Role::User);
        assert_ne!(user.id, admin.id);
    }

    #[tokio::test]
    async fn test_bootstrap_insert_refused_once_populated() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir).await;
        let mut session = store.session().await.unwrap();

        session
            .create_identity(new_identity("first@example.com"), &RegistrationGrant::Bootstrap)
            .await
            .unwrap();
        let second = session
            .create_identity(new_identity("second@example.com"), &RegistrationGrant::Bootstrap)
            .await
            .unwrap();
        assert!(second.is_none());
        assert!(session.find_by_email("second@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir).await;
        let mut session = store.session().await.unwrap();

        let admin = session
            .create_identity(new_identity("dup@example.com"), &RegistrationGrant::Bootstrap)
            .await
            .unwrap()
            .unwrap();
        let err = session
            .create_identity(new_identity("dup@example.com"), &RegistrationGrant::Admin(admin))
            .await
            .unwrap_err();
        assert!(matches!(err, InkwellError::DuplicateIdentity));
    }

    #[tokio::test]
    async fn test_lookups() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir).await;
        let mut session = store.session().await.unwrap();

        let admin = session
            .create_identity(new_identity("find@example.com"), &RegistrationGrant::Bootstrap)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(session.find_by_id(admin.id).await.unwrap(), Some(admin.clone()));
        assert_eq!(session.find_by_id(admin.id + 1).await.unwrap(), None);

        let stored = session.find_by_email("find@example.com").await.unwrap().unwrap();
        assert_eq!(stored.identity, admin);
        assert_eq!(stored.hashed_password, "$argon2id$placeholder");
        assert!(session.find_by_email("missing@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_bootstrap_creates_one_admin() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir).await;

        let mut tasks = Vec::new();
        for i in 0..6 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                let mut session = store.session().await.unwrap();
                session
                    .create_identity(
                        new_identity(&format!("racer{i}@example.com")),
                        &RegistrationGrant::Bootstrap,
                    )
                    .await
                    .unwrap()
            }));
        }

        let mut winners = 0;
        for task in tasks {
            if let Some(identity) = task.await.unwrap() {
                assert_eq!(identity.role, Role::Admin);
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }
}
