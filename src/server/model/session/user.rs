use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_USER_ID_KEY: &str = "prona:user:id";

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionUserId(pub String);

impl SessionUserId {
    /// Insert user ID into session
    pub async fn insert(session: &Session, user_id: i32) -> Result<(), Error> {
        session
            .insert(SESSION_USER_ID_KEY, SessionUserId(user_id.to_string()))
            .await?;

        Ok(())
    }

    /// Get user ID from session
    pub async fn get(session: &Session) -> Result<Option<i32>, Error> {
        session
            .get::<SessionUserId>(SESSION_USER_ID_KEY)
            .await?
            .map(|SessionUserId(id_str)| {
                id_str.parse::<i32>().map_err(|e| {
                    Error::ParseError(format!("Failed to parse session user id: {}", e))
                })
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use crate::server::{
        model::session::user::{SessionUserId, SESSION_USER_ID_KEY},
        util::test::setup::test_setup,
    };

    /// Expect success when inserting valid user ID into session
    #[tokio::test]
    async fn test_insert_session_user_id_success() {
        let test = test_setup().await;

        let user_id = 1;
        let result = SessionUserId::insert(&test.session, user_id).await;

        assert!(result.is_ok());
    }

    /// Expect Some when user ID is present in session
    #[tokio::test]
    async fn test_get_session_user_id_some() {
        let test = test_setup().await;
        let user_id = 1;
        SessionUserId::insert(&test.session, user_id).await.unwrap();

        let result = SessionUserId::get(&test.session).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), Some(user_id));
    }

    /// Expect None when no user ID is present in session
    #[tokio::test]
    async fn test_get_session_user_id_none() {
        let test = test_setup().await;

        let result = SessionUserId::get(&test.session).await;

        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    /// Expect parse error when user ID inserted into session is not an i32
    #[tokio::test]
    async fn test_get_session_user_id_parse_error() {
        let test = test_setup().await;

        test.session
            .insert(SESSION_USER_ID_KEY, SessionUserId("invalid_id".to_string()))
            .await
            .unwrap();

        let result = SessionUserId::get(&test.session).await;

        assert!(result.is_err());
    }
}
