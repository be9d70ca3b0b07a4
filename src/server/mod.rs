pub mod lifecycle;
pub mod router;

pub use lifecycle::{ServerHandle, run};
pub use router::{AppState, app_router};
