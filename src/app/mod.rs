// App layer: HTTP surface over the study service.

pub mod response;
pub mod routes;
pub mod server;

pub use routes::AppState;
pub use server::{build_router, serve, serve_on};
