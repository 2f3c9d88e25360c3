//! Credential verification for agent sign-in.

use sea_orm::DatabaseConnection;

use crate::{
    model::user::UserDto,
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, Error},
    },
};

/// Work factor matching existing stored hashes.
const BCRYPT_COST: u32 = 12;

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Verifies credentials against the stored hash.
    ///
    /// An unknown email and a wrong password both surface as
    /// [`AuthError::InvalidCredentials`], never revealing which failed.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserDto, Error> {
        let Some(user) = UserRepository::new(self.db).find_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !bcrypt::verify(password, &user.password)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(UserDto::from_model(&user))
    }
}

/// Hashes a plaintext password for storage.
pub fn hash_password(password: &str) -> Result<String, Error> {
    Ok(bcrypt::hash(password, BCRYPT_COST)?)
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, Schema};

    use crate::server::util::test::setup::test_setup;

    async fn setup() -> Result<DatabaseConnection, DbErr> {
        let test = test_setup().await;

        let db = test.state.db;
        let schema = Schema::new(DbBackend::Sqlite);

        let stmt = schema.create_table_from_entity(entity::prelude::AgentUser);

        db.execute(&stmt).await?;

        Ok(db)
    }

    mod login_tests {
        use crate::server::{
            data::user::UserRepository,
            error::{auth::AuthError, Error},
            service::auth::{tests::setup, AuthService},
        };

        // Low cost keeps the hashing in tests fast
        fn hash(password: &str) -> String {
            bcrypt::hash(password, 4).unwrap()
        }

        /// Correct credentials return the user
        #[tokio::test]
        async fn test_login_success() -> Result<(), Error> {
            let db = setup().await?;

            UserRepository::new(&db)
                .create(
                    "agent@pasurite-tiranes.al",
                    "Agent",
                    &hash("correct horse"),
                    "AGENT",
                )
                .await?;

            let user = AuthService::new(&db)
                .login("agent@pasurite-tiranes.al", "correct horse")
                .await?;

            assert_eq!(user.email, "agent@pasurite-tiranes.al");
            assert_eq!(user.name, "Agent");

            Ok(())
        }

        /// A wrong password is rejected as invalid credentials
        #[tokio::test]
        async fn test_login_wrong_password() -> Result<(), Error> {
            let db = setup().await?;

            UserRepository::new(&db)
                .create(
                    "agent@pasurite-tiranes.al",
                    "Agent",
                    &hash("correct horse"),
                    "AGENT",
                )
                .await?;

            let result = AuthService::new(&db)
                .login("agent@pasurite-tiranes.al", "battery staple")
                .await;

            assert!(matches!(
                result,
                Err(Error::AuthError(AuthError::InvalidCredentials))
            ));

            Ok(())
        }

        /// An unknown email is rejected the same way as a wrong password
        #[tokio::test]
        async fn test_login_unknown_email() -> Result<(), Error> {
            let db = setup().await?;

            let result = AuthService::new(&db)
                .login("nobody@pasurite-tiranes.al", "anything")
                .await;

            assert!(matches!(
                result,
                Err(Error::AuthError(AuthError::InvalidCredentials))
            ));

            Ok(())
        }
    }
}
