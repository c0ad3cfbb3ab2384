//! User management utilities for web handlers.

use bson::{DateTime, oid::ObjectId};
use todo_auth::secret_hash::{hash_password, verify_password};
use todo_models::{db::connection::DbConnection, deleted::DeletedDoc, user::UserDoc};
use todo_sdk::{
    deleted::DeletedApi,
    page::Page,
    role::UserRole,
    user::{UserApi, UserCreated, UserLoginRequest, UserPage, UserSignup},
};
use tracing::{info, warn};

use crate::{
    auth_token::{TokenService, refresh_user_tokens},
    ctx::Ctx,
    policy::{require_role, require_self_or_role},
    prelude::*,
};

impl From<UserDoc> for W<UserApi> {
    fn from(value: UserDoc) -> Self {
        Self(UserApi {
            id: value.id.to_hex(),
            user_id: value.user_id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            phone: value.phone,
            user_type: value.user_type,
            token: None,
            refresh_token: None,
            created_at: value.created_at.to_chrono(),
            updated_at: value.updated_at.to_chrono(),
        })
    }
}

/// Maps a unique index violation to the conflict `on_duplicate`.
pub(crate) fn conflict_on_duplicate(
    on_duplicate: Error,
) -> impl FnOnce(todo_models::error::Error) -> Error {
    move |err| match err {
        todo_models::error::Error::DuplicateKey => on_duplicate,
        err => Error::Models(err),
    }
}

/// Creates a user account.
///
/// Ids, timestamps and the initial token pair are assigned here; the
/// password is stored hashed.
pub async fn signup(
    payload: UserSignup,
    connection: &DbConnection,
    tokens: &TokenService,
) -> Result<UserCreated> {
    payload.validate()?;

    let taken = connection
        .bounded(
            connection
                .users
                .exists_with_email_or_phone(&payload.email, &payload.phone),
        )
        .await?;
    if taken {
        return Err(Error::UserExists);
    }

    let id = ObjectId::new();
    let now = DateTime::now();
    let mut user = UserDoc {
        id,
        user_id: id.to_hex(),
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        phone: payload.phone,
        password: hash_password(&payload.password).await?,
        user_type: payload.user_type,
        token: String::new(),
        refresh_token: String::new(),
        created_at: now,
        updated_at: now,
    };
    let pair = tokens.issue_tokens(&user)?;
    user.token = pair.access_token;
    user.refresh_token = pair.refresh_token;

    connection
        .bounded(connection.users.insert(&user))
        .await
        .map_err(conflict_on_duplicate(Error::UserExists))?;

    info!("Created user {}", user.user_id);
    Ok(UserCreated {
        user_id: user.user_id,
    })
}

/// Verifies credentials and rotates the user's token pair.
///
/// An unknown email and a wrong password fail identically.
pub async fn login(
    payload: &UserLoginRequest,
    connection: &DbConnection,
    tokens: &TokenService,
) -> Result<UserApi> {
    let user = connection
        .bounded(connection.users.fetch_by_email(&payload.email))
        .await?;
    let Some(user) = user else {
        warn!("Login attempt for unknown email");
        return Err(Error::WrongCredentials);
    };
    if !verify_password(&payload.password, &user.password).await? {
        warn!("Wrong password for user {}", user.user_id);
        return Err(Error::WrongCredentials);
    }

    let pair = tokens.issue_tokens(&user)?;
    refresh_user_tokens(connection, &pair, &user.user_id).await?;

    let user = connection
        .bounded(connection.users.fetch_by_user_id(&user.user_id))
        .await?
        .ok_or(Error::UserNotFound)?;
    let mut api = W::<UserApi>::from(user).0;
    api.token = Some(pair.access_token);
    api.refresh_token = Some(pair.refresh_token);
    Ok(api)
}

/// One page of users plus the total user count.
pub async fn get_users(connection: &DbConnection, page: Page) -> Result<UserPage> {
    let total_count = connection.bounded(connection.users.count()).await?;
    let users = connection
        .bounded(connection.users.fetch_page(page.skip(), page.per_page))
        .await?;

    Ok(UserPage {
        total_count,
        user_items: users.into_iter().map(|u| W::<UserApi>::from(u).0).collect(),
    })
}

pub async fn get_user(connection: &DbConnection, ctx: &Ctx, user_id: &str) -> Result<UserApi> {
    require_self_or_role(ctx, user_id, UserRole::Admin)?;
    let user = connection
        .bounded(connection.users.fetch_by_user_id(user_id))
        .await?
        .ok_or(Error::UserNotFound)?;
    Ok(W::<UserApi>::from(user).0)
}

/// Removes a user and its todos, archiving both in the deleted log.
///
/// The archive entry is written first. Only the todos it holds are then
/// removed, so a todo created concurrently stays in the store rather than
/// disappearing unarchived.
pub async fn delete_user(
    connection: &DbConnection,
    ctx: &Ctx,
    user_id: &str,
) -> Result<DeletedApi> {
    require_role(ctx, UserRole::Admin)?;
    let user = connection
        .bounded(connection.users.fetch_by_user_id(user_id))
        .await?
        .ok_or(Error::UserNotFound)?;
    let todos = connection
        .bounded(connection.todos.fetch_by_user(user_id))
        .await?;

    let archived: Vec<_> = todos.iter().map(|todo| todo.id).collect();
    let record = DeletedDoc::new(user, todos);
    connection
        .bounded(connection.deleted.insert(&record))
        .await?;
    let removed = connection
        .bounded(connection.todos.delete_owned(user_id, &archived))
        .await?;
    connection
        .bounded(connection.users.delete_by_user_id(user_id))
        .await?;

    info!("Deleted user {user_id} and {removed} todos");
    Ok(W::<DeletedApi>::from(record).0)
}
