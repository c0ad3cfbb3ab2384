//! Startup and serving failures of the todod binary.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Binding the listener or serving connections failed.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document store could not be reached or prepared.
    #[error("Store initialisation failed: {0}")]
    Store(#[from] todo_models::error::Error),
}
