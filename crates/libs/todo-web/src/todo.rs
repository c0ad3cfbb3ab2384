//! Todo management utilities for web handlers.

use bson::{DateTime, oid::ObjectId};
use todo_models::{db::connection::DbConnection, todo::TodoDoc};
use todo_sdk::{
    role::UserRole,
    todo::{
        ActiveTodos, TodoApi, TodoCheckUpdate, TodoCreated, TodoEdit, TodoPost, TodosByUser,
        UncheckedCount,
    },
};
use tracing::{info, warn};

use crate::{
    ctx::Ctx,
    parse_object_id,
    policy::{require_role, require_self_or_role},
    prelude::*,
    user::conflict_on_duplicate,
};

impl From<TodoDoc> for W<TodoApi> {
    fn from(value: TodoDoc) -> Self {
        Self(TodoApi {
            id: value.id.to_hex(),
            title: value.title,
            description: value.description,
            user_id: value.user_id,
            check: value.check,
            created_at: value.created_at.to_chrono(),
            updated_at: value.updated_at.to_chrono(),
        })
    }
}

fn to_api(todos: Vec<TodoDoc>) -> Vec<TodoApi> {
    todos.into_iter().map(|t| W::<TodoApi>::from(t).0).collect()
}

pub async fn get_todos(connection: &DbConnection) -> Result<Vec<TodoApi>> {
    let todos = connection.bounded(connection.todos.fetch_all()).await?;
    Ok(to_api(todos))
}

/// Creates a todo owned by `payload.user_id`.
///
/// The owner must exist and the caller must be the owner or an admin.
pub async fn add_todo(
    payload: TodoPost,
    connection: &DbConnection,
    ctx: &Ctx,
) -> Result<TodoCreated> {
    payload.validate()?;
    require_self_or_role(ctx, &payload.user_id, UserRole::Admin)?;

    let owner = connection
        .bounded(connection.users.fetch_by_user_id(&payload.user_id))
        .await?;
    if owner.is_none() {
        return Err(Error::UserNotFound);
    }

    let taken = connection
        .bounded(
            connection
                .todos
                .exists_with_title(&payload.user_id, &payload.title),
        )
        .await?;
    if taken {
        return Err(Error::TodoExists);
    }

    let now = DateTime::now();
    let todo = TodoDoc {
        id: ObjectId::new(),
        title: payload.title,
        description: payload.description,
        user_id: payload.user_id,
        check: false,
        created_at: now,
        updated_at: now,
    };
    connection
        .bounded(connection.todos.insert(&todo))
        .await
        .map_err(conflict_on_duplicate(Error::TodoExists))?;

    info!("Created todo {} for user {}", todo.id, todo.user_id);
    Ok(TodoCreated {
        id: todo.id.to_hex(),
    })
}

pub async fn get_todo(connection: &DbConnection, todo_id: &str) -> Result<TodoApi> {
    let id = parse_object_id(todo_id)?;
    let todo = fetch_todo(connection, &id).await?;
    Ok(W::<TodoApi>::from(todo).0)
}

async fn fetch_todo(connection: &DbConnection, id: &ObjectId) -> Result<TodoDoc> {
    connection
        .bounded(connection.todos.fetch_by_id(id))
        .await?
        .ok_or(Error::TodoNotFound)
}

/// Loads a todo that is about to be modified on behalf of `user_id`.
///
/// The stored owner must equal `user_id`, and the caller must be that user
/// or an admin.
async fn fetch_owned_todo(
    connection: &DbConnection,
    ctx: &Ctx,
    id: &ObjectId,
    user_id: &str,
) -> Result<TodoDoc> {
    let todo = fetch_todo(connection, id).await?;
    if todo.user_id != user_id {
        warn!("Todo {id} is not owned by {user_id}");
        return Err(Error::OwnerMismatch);
    }
    require_self_or_role(ctx, user_id, UserRole::Admin)?;
    Ok(todo)
}

/// Sets the `check` flag of a todo.
pub async fn update_check(
    todo_id: &str,
    payload: TodoCheckUpdate,
    connection: &DbConnection,
    ctx: &Ctx,
) -> Result<TodoApi> {
    let id = parse_object_id(todo_id)?;
    payload.validate()?;
    fetch_owned_todo(connection, ctx, &id, &payload.user_id).await?;

    let matched = connection
        .bounded(
            connection
                .todos
                .set_check(&id, payload.check, DateTime::now()),
        )
        .await?;
    if !matched {
        return Err(Error::TodoNotFound);
    }
    get_todo(connection, todo_id).await
}

/// Replaces the title and description of a todo.
pub async fn edit_todo(
    todo_id: &str,
    payload: TodoEdit,
    connection: &DbConnection,
    ctx: &Ctx,
) -> Result<TodoApi> {
    let id = parse_object_id(todo_id)?;
    payload.validate()?;
    fetch_owned_todo(connection, ctx, &id, &payload.user_id).await?;

    let matched = connection
        .bounded(connection.todos.edit(
            &id,
            &payload.title,
            &payload.description,
            DateTime::now(),
        ))
        .await
        .map_err(conflict_on_duplicate(Error::TodoExists))?;
    if !matched {
        return Err(Error::TodoNotFound);
    }
    get_todo(connection, todo_id).await
}

pub async fn delete_todo(connection: &DbConnection, ctx: &Ctx, todo_id: &str) -> Result<()> {
    require_role(ctx, UserRole::Admin)?;
    let id = parse_object_id(todo_id)?;
    connection
        .bounded(connection.todos.delete_by_id(&id))
        .await?
        .ok_or(Error::TodoNotFound)?;
    info!("Deleted todo {id}");
    Ok(())
}

pub async fn todos_by_user(
    connection: &DbConnection,
    ctx: &Ctx,
    user_id: &str,
) -> Result<TodosByUser> {
    require_self_or_role(ctx, user_id, UserRole::Admin)?;
    let todos = connection
        .bounded(connection.todos.fetch_by_user(user_id))
        .await?;
    let total_count = connection
        .bounded(connection.todos.count_by_user(user_id))
        .await?;
    Ok(TodosByUser {
        data: to_api(todos),
        total_count,
    })
}

/// Checked todos alongside the number of todos overall.
pub async fn active_todos(connection: &DbConnection) -> Result<ActiveTodos> {
    let todos = connection
        .bounded(connection.todos.fetch_checked())
        .await?;
    let total_count = connection.bounded(connection.todos.count()).await?;
    Ok(ActiveTodos {
        details: to_api(todos),
        total_count,
    })
}

pub async fn unchecked_count(connection: &DbConnection) -> Result<UncheckedCount> {
    let check = connection
        .bounded(connection.todos.count_unchecked())
        .await?;
    Ok(UncheckedCount { check })
}
