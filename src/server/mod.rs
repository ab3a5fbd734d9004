pub mod dispatch;
pub mod manager;
pub mod registry;
pub mod web;

pub use dispatch::{DispatchEngine, DispatchError};
pub use manager::SessionManagerHandle;
pub use registry::SessionRegistry;
pub use web::{router, start_web_server};
