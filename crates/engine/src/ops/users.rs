use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*, sea_query::Expr};

use crate::{EngineError, NewUser, ResultEngine, User, users};

use super::{Engine, normalize_required_text, with_tx};

impl Engine {
    /// Register a new account.
    ///
    /// Usernames and emails are unique across the whole store; both are
    /// matched case-insensitively.
    pub async fn register_user(&self, new_user: NewUser) -> ResultEngine<User> {
        let username = normalize_required_text(&new_user.username, "username")?.to_lowercase();
        let full_name = normalize_required_text(&new_user.full_name, "full name")?;
        let email = normalize_required_text(&new_user.email, "email")?.to_lowercase();
        if new_user.password.is_empty() {
            return Err(EngineError::Validation(
                "password must not be empty".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let username_taken = users::Entity::find_by_id(username.clone())
                .one(&db_tx)
                .await?
                .is_some();
            if username_taken {
                return Err(EngineError::ExistingKey(username));
            }

            let email_taken = users::Entity::find()
                .filter(Expr::cust("LOWER(email)").eq(email.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if email_taken {
                return Err(EngineError::ExistingKey(email));
            }

            let model = users::ActiveModel {
                username: ActiveValue::Set(username),
                password: ActiveValue::Set(new_user.password),
                full_name: ActiveValue::Set(full_name),
                email: ActiveValue::Set(email),
                role: ActiveValue::Set(new_user.role.as_str().to_string()),
                created_at: ActiveValue::Set(Utc::now()),
            };
            let model = model.insert(&db_tx).await?;

            Ok(User::try_from(model)?)
        })
    }

    /// Return the profile of an existing account.
    pub async fn user_profile(&self, username: &str) -> ResultEngine<User> {
        let model = users::Entity::find_by_id(username.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(username.to_string()))?;

        Ok(User::try_from(model)?)
    }
}
