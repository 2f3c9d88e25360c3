use tower_sessions::Session;

use crate::{
    model::user::{UserDto, UserRole},
    server::{
        data::user::UserRepository,
        error::{auth::AuthError, Error},
        model::{app::AppState, session::user::SessionUserId},
    },
};

/// Retrieves user information from session and then from database
///
/// # Returns
/// - `Ok(UserDto)`: User found
/// - `Err(Error::AuthError(AuthError::UserNotInSession))`: User ID not present in session
/// - `Err(Error::AuthError(AuthError::UserNotInDatabase))`: User ID exists in session but not found in database (session is cleared)
/// - `Err(Error)`: Internal errors (database query failures, session errors, etc.)
pub async fn get_user_from_session(state: &AppState, session: &Session) -> Result<UserDto, Error> {
    // Get user from session
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(Error::AuthError(AuthError::UserNotInSession));
    };

    // Get user from database
    let Some(user) = UserRepository::new(&state.db).find_by_id(user_id).await? else {
        session.clear().await;

        tracing::debug!(
            "Session cleared for user ID {} with active session but was not found in database",
            user_id
        );

        return Err(Error::AuthError(AuthError::UserNotInDatabase(user_id)));
    };

    Ok(UserDto::from_model(&user))
}

/// Like [`get_user_from_session`] but additionally requires the admin role.
pub async fn require_admin(state: &AppState, session: &Session) -> Result<UserDto, Error> {
    let user = get_user_from_session(state, session).await?;

    if user.role != UserRole::Admin {
        return Err(Error::AuthError(AuthError::Forbidden));
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectionTrait, DbBackend, DbErr, Schema};

    use crate::server::{
        controller::util::get_user::{get_user_from_session, require_admin},
        error::{auth::AuthError, Error},
        model::session::user::SessionUserId,
        util::test::{
            mock::insert_user,
            setup::{test_setup, TestSetup},
        },
    };

    async fn setup() -> Result<TestSetup, DbErr> {
        let test = test_setup().await;

        let schema = Schema::new(DbBackend::Sqlite);
        let stmt = schema.create_table_from_entity(entity::prelude::AgentUser);

        test.state.db.execute(&stmt).await?;

        Ok(test)
    }

    /// No session entry resolves to UserNotInSession
    #[tokio::test]
    async fn test_no_session_is_unauthorized() -> Result<(), Error> {
        let test = setup().await?;

        let result = get_user_from_session(&test.state, &test.session).await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::UserNotInSession))
        ));

        Ok(())
    }

    /// A session pointing at a deleted user is cleared
    #[tokio::test]
    async fn test_stale_session_is_cleared() -> Result<(), Error> {
        let test = setup().await?;

        SessionUserId::insert(&test.session, 42).await?;

        let result = get_user_from_session(&test.state, &test.session).await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::UserNotInDatabase(42)))
        ));
        assert_eq!(SessionUserId::get(&test.session).await?, None);

        Ok(())
    }

    /// A non-admin session fails the admin check
    #[tokio::test]
    async fn test_require_admin_rejects_agents() -> Result<(), Error> {
        let test = setup().await?;

        let agent = insert_user(&test.state.db, "agent@pasurite-tiranes.al", "AGENT").await?;
        SessionUserId::insert(&test.session, agent.id).await?;

        let result = require_admin(&test.state, &test.session).await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::Forbidden))
        ));

        Ok(())
    }

    /// An admin session passes the admin check
    #[tokio::test]
    async fn test_require_admin_accepts_admins() -> Result<(), Error> {
        let test = setup().await?;

        let admin = insert_user(&test.state.db, "admin@pasurite-tiranes.al", "ADMIN").await?;
        SessionUserId::insert(&test.session, admin.id).await?;

        let user = require_admin(&test.state, &test.session).await?;

        assert_eq!(user.email, "admin@pasurite-tiranes.al");

        Ok(())
    }
}
