use axum::{
    Json, Router,
    extract::{Path, State},
    middleware,
    routing::{get, post, put},
};
use todo_auth::auth_body::AuthBody;
use todo_sdk::{
    Data, Message,
    deleted::DeletedApi,
    page::PageQuery,
    role::UserRole,
    todo::{
        ActiveTodos, TodoApi, TodoCheckUpdate, TodoCreated, TodoEdit, TodoPost, TodosByUser,
        UncheckedCount,
    },
    user::{TokenRefreshRequest, UserApi, UserCreated, UserLoginRequest, UserPage, UserSignup},
};
use todo_web::{
    auth_token::refresh_session,
    ctx::{Ctx, resolver::mw_ctx_resolver},
    deleted, json::JsonBody, mw_auth::mw_require_auth, query::QueryParams, require_role, todo,
    user,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::info;

use crate::prelude::*;
use crate::state::AppState;
use todo_web::prelude::Result as WebResult;

/// Builds the full route table.
///
/// Role checks that depend on the addressed record (self or admin) happen in
/// the handler logic; the layers here only cover whole route groups.
pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/users/signup", post(signup))
        .route("/users/login", post(login))
        .route("/users/refresh", post(refresh));

    let admin_routes = Router::new()
        .route("/users", get(get_users))
        .route("/deleted", get(get_all_deleted))
        .route("/deleted/{del_id}", get(get_deleted))
        .route_layer(require_role!(UserRole::Admin))
        .route_layer(middleware::from_fn(mw_require_auth));

    let user_routes = Router::new()
        .route("/users/{user_id}", get(get_user).delete(delete_user))
        .route("/todos", get(get_todos).post(add_todo))
        .route(
            "/todos/{todo_id}",
            get(get_todo).put(update_check).delete(delete_todo),
        )
        .route("/todos-update/{todo_id}", put(edit_todo))
        .route("/todos-user/{user_id}", get(todos_by_user))
        .route("/todos-active", get(active_todos))
        .route("/todos-find", get(unchecked_count))
        .route_layer(middleware::from_fn(mw_require_auth));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .merge(user_routes)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            mw_ctx_resolver,
        ))
        .with_state(state)
}

/// Serves `app` on `listener` until ctrl-c.
pub async fn serve(listener: tokio::net::TcpListener, app: Router) -> Result<()> {
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {err}");
            }
            info!("Shutting down");
        })
        .await?;
    Ok(())
}

async fn signup(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UserSignup>,
) -> WebResult<Json<Data<UserCreated>>> {
    let created = user::signup(payload, &state.connection, &state.tokens).await?;
    Ok(Json(Data::new(created)))
}

async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UserLoginRequest>,
) -> WebResult<Json<Data<UserApi>>> {
    let user = user::login(&payload, &state.connection, &state.tokens).await?;
    Ok(Json(Data::new(user)))
}

async fn refresh(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<TokenRefreshRequest>,
) -> WebResult<Json<Data<AuthBody>>> {
    let tokens = refresh_session(&state.connection, &state.tokens, &payload.refresh_token).await?;
    Ok(Json(Data::new(tokens)))
}

async fn get_users(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PageQuery>,
) -> WebResult<Json<Data<UserPage>>> {
    let page = user::get_users(&state.connection, query.resolve()).await?;
    Ok(Json(Data::new(page)))
}

async fn get_user(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(user_id): Path<String>,
) -> WebResult<Json<Data<UserApi>>> {
    let user = user::get_user(&state.connection, &ctx, &user_id).await?;
    Ok(Json(Data::new(user)))
}

async fn delete_user(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(user_id): Path<String>,
) -> WebResult<Json<Data<DeletedApi>>> {
    let record = user::delete_user(&state.connection, &ctx, &user_id).await?;
    Ok(Json(Data::new(record)))
}

async fn get_todos(State(state): State<AppState>) -> WebResult<Json<Data<Vec<TodoApi>>>> {
    Ok(Json(Data::new(todo::get_todos(&state.connection).await?)))
}

async fn add_todo(
    State(state): State<AppState>,
    ctx: Ctx,
    JsonBody(payload): JsonBody<TodoPost>,
) -> WebResult<Json<Data<TodoCreated>>> {
    let created = todo::add_todo(payload, &state.connection, &ctx).await?;
    Ok(Json(Data::new(created)))
}

async fn get_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<String>,
) -> WebResult<Json<Data<TodoApi>>> {
    Ok(Json(Data::new(
        todo::get_todo(&state.connection, &todo_id).await?,
    )))
}

async fn update_check(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(todo_id): Path<String>,
    JsonBody(payload): JsonBody<TodoCheckUpdate>,
) -> WebResult<Json<Data<TodoApi>>> {
    let todo = todo::update_check(&todo_id, payload, &state.connection, &ctx).await?;
    Ok(Json(Data::new(todo)))
}

async fn edit_todo(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(todo_id): Path<String>,
    JsonBody(payload): JsonBody<TodoEdit>,
) -> WebResult<Json<Data<TodoApi>>> {
    let todo = todo::edit_todo(&todo_id, payload, &state.connection, &ctx).await?;
    Ok(Json(Data::new(todo)))
}

async fn delete_todo(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(todo_id): Path<String>,
) -> WebResult<Json<Message>> {
    todo::delete_todo(&state.connection, &ctx, &todo_id).await?;
    Ok(Json(Message::new(format!("Todo {todo_id} deleted successfully"))))
}

async fn todos_by_user(
    State(state): State<AppState>,
    ctx: Ctx,
    Path(user_id): Path<String>,
) -> WebResult<Json<TodosByUser>> {
    Ok(Json(
        todo::todos_by_user(&state.connection, &ctx, &user_id).await?,
    ))
}

async fn active_todos(State(state): State<AppState>) -> WebResult<Json<Data<ActiveTodos>>> {
    Ok(Json(Data::new(todo::active_todos(&state.connection).await?)))
}

async fn unchecked_count(State(state): State<AppState>) -> WebResult<Json<Data<UncheckedCount>>> {
    Ok(Json(Data::new(
        todo::unchecked_count(&state.connection).await?,
    )))
}

async fn get_all_deleted(State(state): State<AppState>) -> WebResult<Json<Data<Vec<DeletedApi>>>> {
    Ok(Json(Data::new(
        deleted::get_all_deleted(&state.connection).await?,
    )))
}

async fn get_deleted(
    State(state): State<AppState>,
    Path(del_id): Path<String>,
) -> WebResult<Json<Data<DeletedApi>>> {
    Ok(Json(Data::new(
        deleted::get_deleted(&state.connection, &del_id).await?,
    )))
}
