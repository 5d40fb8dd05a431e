pub mod handlers;
pub mod routes;

pub use handlers::{AppState, Verdict};
pub use routes::create_router;
