mod auth;
mod dashboard;
mod db;
mod employees;
mod error;
mod events;
mod query;
mod requests;
mod validation;

use axum::{
    middleware::from_fn,
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use auth::{AccountRepository, AuthService, RequireRole, TokenService};
use employees::{EmployeeRepository, EmployeeService};
use events::EventBus;
use requests::{LeaveRepository, OvertimeRepository, RequestService};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::login_handler,
        auth::handlers::register_handler,
        auth::handlers::me_handler,
        employees::handlers::profile_handler,
        employees::handlers::clock_in_handler,
        employees::handlers::clock_out_handler,
        employees::handlers::update_employee_handler,
        dashboard::handlers::dashboard_handler,
    ),
    components(
        schemas(
            auth::LoginRequest,
            auth::RegisterRequest,
            auth::AuthResponse,
            auth::AccountResponse,
            auth::Role,
            employees::Employee,
            employees::ClockStatus,
            employees::ContractType,
            employees::AttendanceEntry,
            employees::UpdateEmployeeRequest,
            employees::AddSkillRequest,
            employees::AddWarningRequest,
            employees::Warning,
            employees::EmployeeProfileResponse,
            requests::LeaveRequest,
            requests::OvertimeRequest,
            requests::CreateLeaveRequest,
            requests::CreateOvertimeRequest,
            requests::ResolveRequest,
            requests::RequestStatus,
            dashboard::DashboardResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Login, registration, and token validation"),
        (name = "employees", description = "Employee records and attendance"),
        (name = "dashboard", description = "Admin attendance overview"),
    ),
    info(
        title = "Attendance API",
        version = "1.0.0",
        description = "HR and attendance tracking backend with role-gated access",
    )
)]
struct ApiDoc;

/// Registers the bearer-token security scheme referenced by the handlers
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
///
/// Constructed once in main and injected everywhere; no service reaches for
/// a global connection.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub employee_repo: EmployeeRepository,
    pub auth_service: AuthService,
    pub employee_service: EmployeeService,
    pub request_service: RequestService,
    pub events: EventBus,
}

impl AppState {
    /// Wire up repositories and services over a connection pool
    pub fn new(db: PgPool, jwt_secret: String) -> Self {
        let events = EventBus::default();

        let account_repo = AccountRepository::new(db.clone());
        let employee_repo = EmployeeRepository::new(db.clone());
        let leave_repo = LeaveRepository::new(db.clone());
        let overtime_repo = OvertimeRepository::new(db.clone());

        let token_service = TokenService::new(jwt_secret);

        let auth_service = AuthService::new(
            account_repo,
            employee_repo.clone(),
            token_service,
            events.clone(),
        );
        let employee_service = EmployeeService::new(employee_repo.clone(), events.clone());
        let request_service = RequestService::new(
            leave_repo,
            overtime_repo,
            employee_repo.clone(),
            events.clone(),
        );

        Self {
            db,
            employee_repo,
            auth_service,
            employee_service,
            request_service,
            events,
        }
    }
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Registration, record edits, skill/warning additions, request
    // resolution, and the dashboard all require the admin role
    let admin_routes = Router::new()
        .route("/api/auth/register", post(auth::register_handler))
        .route("/api/employees/:id", patch(employees::update_employee_handler))
        .route("/api/employees/:id/skills", post(employees::add_skill_handler))
        .route(
            "/api/employees/:id/warnings",
            post(employees::add_warning_handler),
        )
        .route(
            "/api/requests/leave/:id/status",
            patch(requests::resolve_leave_handler),
        )
        .route(
            "/api/requests/overtime/:id/status",
            patch(requests::resolve_overtime_handler),
        )
        .route("/api/admin/dashboard", get(dashboard::dashboard_handler))
        .route_layer(from_fn(|req, next| {
            RequireRole::admin().middleware(req, next)
        }));

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public and token-gated routes
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/auth/me", get(auth::me_handler))
        .route("/api/employees/profile", get(employees::profile_handler))
        .route("/api/employees/clock-in", post(employees::clock_in_handler))
        .route("/api/employees/clock-out", post(employees::clock_out_handler))
        .route(
            "/api/requests/leave",
            post(requests::create_leave_handler).get(requests::list_leave_handler),
        )
        .route(
            "/api/requests/overtime",
            post(requests::create_overtime_handler).get(requests::list_overtime_handler),
        )
        // Real-time event stream
        .route("/ws", get(events::events_ws_handler))
        .merge(admin_routes)
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Attendance API - Starting...");

    // Get configuration from environment variables
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    let state = AppState::new(db_pool, jwt_secret);

    // Seed the default admin and employee accounts on first run
    state
        .auth_service
        .bootstrap_defaults()
        .await
        .expect("Failed to seed default accounts");

    // Create the application router
    let app = create_router(state);

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Attendance API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests;
