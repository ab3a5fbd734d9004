pub mod polling;
pub mod profile;
pub mod routes;
pub mod sessions;
pub mod types;

pub use routes::{router, start_web_server};
pub use types::AppState;
