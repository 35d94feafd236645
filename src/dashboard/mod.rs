pub mod handlers;
pub mod models;

pub use handlers::dashboard_handler;
pub use models::DashboardResponse;
