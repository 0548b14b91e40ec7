//! REST API for boards.
//!
//! Provides the board endpoints over [`BoardService`](crate::service::BoardService)
//! using Axum.
//!
//! ## Endpoints
//!
//! - `POST /boards` create a board from `{"initial_state": [[bool]]}`
//! - `GET /boards/:id` fetch a stored board
//! - `GET /boards/:id/next` one generation forward
//! - `GET /boards/:id/iterate/:iterations` several generations forward
//! - `GET /boards/:id/final` run until a fixed point or cycle
//! - `GET /health` liveness
//!
//! ## Usage
//!
//! ```no_run
//! use lifeboard::Config;
//! use lifeboard::web::run_server;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!     run_server(config).await.unwrap();
//! }
//! ```

mod error;
mod routes;
mod server;
mod state;

pub use error::ApiError;
pub use routes::api_router;
pub use server::{build_app, run_server};
pub use state::AppState;
