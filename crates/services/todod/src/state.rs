use todo_models::db::connection::DbConnection;
use todo_web::auth_token::TokenService;

/// Shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub connection: DbConnection,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(connection: DbConnection, tokens: TokenService) -> Self {
        Self { connection, tokens }
    }
}
