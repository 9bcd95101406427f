// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State as AxumState,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bookwise_api::{
    ApiError, AuthenticationService, DeleteConfirmation, ListQuery, LoginRequest, LoginResponse,
    RegisterRequest, TokenService, TokenValidationResponse, WritePolicy, create_booking,
    create_client, create_service, delete_client, delete_service, get_booking, get_client,
    get_service, list_bookings, list_clients, list_services, parse_record_id, update_booking,
    update_client, update_service,
};
use bookwise_domain::{
    Booking, BookingPayload, Client, ClientPayload, FieldError, Page, Service, ServicePayload,
    User,
};
use bookwise_persistence::Persistence;
use clap::Parser;
use serde::Serialize;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use time::Duration;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::session::{BearerToken, OptionalActor};

/// Bookwise Server - HTTP backend for bookings, clients and services
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// `SQLite` database: a file path, `sqlite://path`, or `:memory:`.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Secret used to sign and verify bearer tokens.
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: String,

    /// Address to bind the server to
    #[arg(long, env = "BIND_ADDRESS", default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// Require an admin bearer token for client, service and booking writes.
    #[arg(long, env = "REQUIRE_ADMIN")]
    require_admin: bool,

    /// Lifetime of issued tokens, in seconds.
    #[arg(
        long,
        env = "TOKEN_TTL_SECS",
        default_value_t = 3600,
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    token_ttl_secs: i64,
}

/// Application state shared across handlers.
///
/// The store sits behind one mutex, so requests touching it are serialised.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    tokens: Arc<TokenService>,
    write_policy: WritePolicy,
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaginationInfo {
    page: u32,
    limit: u32,
    total: i64,
    total_pages: i64,
}

/// The uniform response wrapper.
#[derive(Debug, Clone, Serialize)]
struct Envelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pagination: Option<PaginationInfo>,
}

impl<T> Envelope<T> {
    const fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
            pagination: None,
        }
    }

    fn with_message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }
}

impl<T> Envelope<Vec<T>> {
    fn page(page: Page<T>) -> Self {
        let pagination: PaginationInfo = PaginationInfo {
            page: page.page,
            limit: page.limit,
            total: page.total,
            total_pages: page.total_pages(),
        };
        Self {
            pagination: Some(pagination),
            ..Self::data(page.items)
        }
    }
}

impl Envelope<()> {
    const fn failure(message: String, errors: Option<Vec<FieldError>>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            errors,
            pagination: None,
        }
    }
}

type JsonResult<T> = Result<Json<Envelope<T>>, HttpError>;
type CreatedResult<T> = Result<(StatusCode, Json<Envelope<T>>), HttpError>;

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
    errors: Option<Vec<FieldError>>,
}

impl HttpError {
    const fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
            errors: None,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<Envelope<()>> = Json(Envelope::failure(self.message, self.errors));
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::ValidationFailed { .. }
            | ApiError::InvalidTransition { .. }
            | ApiError::Conflict { .. }
            | ApiError::InvalidToken { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::AlreadyFinal { .. } | ApiError::ResourceInUse { .. } => StatusCode::CONFLICT,
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::StoreUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %err, "Request failed with a server error");
        }

        let message: String = err.to_string();
        let errors: Option<Vec<FieldError>> = match err {
            ApiError::ValidationFailed { field_errors } => Some(field_errors),
            _ => None,
        };

        Self {
            status,
            message,
            errors,
        }
    }
}

/// Unwraps a JSON body, turning parse failures into a 400 envelope.
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, HttpError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| HttpError::bad_request(rejection.body_text()))
}

/// Unwraps list query parameters, turning parse failures into a 400 envelope.
fn list_query(query: Result<Query<ListQuery>, QueryRejection>) -> Result<ListQuery, HttpError> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| HttpError::bad_request(rejection.body_text()))
}

// ============================================================================
// Health and auth
// ============================================================================

/// Handler for GET `/api/health`.
#[allow(clippy::unused_async)]
async fn handle_health() -> Json<Envelope<()>> {
    Json(Envelope {
        success: true,
        data: None,
        message: Some(String::from("ok")),
        errors: None,
        pagination: None,
    })
}

/// Handler for POST `/api/register`.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> CreatedResult<User> {
    let req: RegisterRequest = json_body(body)?;
    info!(username = ?req.username, "Handling register request");

    let mut persistence = app_state.persistence.lock().await;
    let user: User = AuthenticationService::register(&mut persistence, &req)?;
    drop(persistence);

    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(user).with_message(String::from("User registered successfully"))),
    ))
}

/// Handler for POST `/api/login`.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> JsonResult<LoginResponse> {
    let req: LoginRequest = json_body(body)?;
    info!(username = ?req.username, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse =
        AuthenticationService::login(&mut persistence, &app_state.tokens, &req)?;
    drop(persistence);

    Ok(Json(Envelope::data(response)))
}

/// Handler for POST `/api/validate-token`.
#[allow(clippy::unused_async)]
async fn handle_validate_token(
    AxumState(app_state): AxumState<AppState>,
    BearerToken(token): BearerToken,
) -> JsonResult<TokenValidationResponse> {
    info!("Handling validate_token request");
    let response: TokenValidationResponse =
        AuthenticationService::validate_token(&app_state.tokens, token.as_deref())?;
    Ok(Json(Envelope::data(response)))
}

// ============================================================================
// Clients
// ============================================================================

/// Handler for GET `/api/clients`.
async fn handle_list_clients(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> JsonResult<Vec<Client>> {
    let query: ListQuery = list_query(query)?;
    info!(page = ?query.page, limit = ?query.limit, "Handling list_clients request");

    let mut persistence = app_state.persistence.lock().await;
    let page: Page<Client> = list_clients(&mut persistence, query)?;
    Ok(Json(Envelope::page(page)))
}

/// Handler for GET `/api/clients/{id}`.
async fn handle_get_client(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> JsonResult<Client> {
    let client_id: i64 = parse_record_id(&id, "Client")?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(Envelope::data(get_client(&mut persistence, client_id)?)))
}

/// Handler for POST `/api/clients`.
async fn handle_create_client(
    AxumState(app_state): AxumState<AppState>,
    OptionalActor(actor): OptionalActor,
    body: Result<Json<ClientPayload>, JsonRejection>,
) -> CreatedResult<Client> {
    let payload: ClientPayload = json_body(body)?;
    info!("Handling create_client request");

    let mut persistence = app_state.persistence.lock().await;
    let client: Client = create_client(
        &mut persistence,
        app_state.write_policy,
        actor.as_ref(),
        &payload,
    )?;
    Ok((StatusCode::CREATED, Json(Envelope::data(client))))
}

/// Handler for PUT `/api/clients/{id}`.
async fn handle_update_client(
    AxumState(app_state): AxumState<AppState>,
    OptionalActor(actor): OptionalActor,
    Path(id): Path<String>,
    body: Result<Json<ClientPayload>, JsonRejection>,
) -> JsonResult<Client> {
    let client_id: i64 = parse_record_id(&id, "Client")?;
    let payload: ClientPayload = json_body(body)?;
    info!(client_id, "Handling update_client request");

    let mut persistence = app_state.persistence.lock().await;
    let client: Client = update_client(
        &mut persistence,
        app_state.write_policy,
        actor.as_ref(),
        client_id,
        payload,
    )?;
    Ok(Json(Envelope::data(client)))
}

/// Handler for DELETE `/api/clients/{id}`.
async fn handle_delete_client(
    AxumState(app_state): AxumState<AppState>,
    OptionalActor(actor): OptionalActor,
    Path(id): Path<String>,
) -> JsonResult<DeleteConfirmation> {
    let client_id: i64 = parse_record_id(&id, "Client")?;
    info!(client_id, "Handling delete_client request");

    let mut persistence = app_state.persistence.lock().await;
    let confirmation: DeleteConfirmation = delete_client(
        &mut persistence,
        app_state.write_policy,
        actor.as_ref(),
        client_id,
    )?;
    let message: String = confirmation.message.clone();
    Ok(Json(Envelope::data(confirmation).with_message(message)))
}

// ============================================================================
// Services
// ============================================================================

/// Handler for GET `/api/services`.
async fn handle_list_services(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> JsonResult<Vec<Service>> {
    let query: ListQuery = list_query(query)?;
    info!(page = ?query.page, limit = ?query.limit, "Handling list_services request");

    let mut persistence = app_state.persistence.lock().await;
    let page: Page<Service> = list_services(&mut persistence, query)?;
    Ok(Json(Envelope::page(page)))
}

/// Handler for GET `/api/services/{id}`.
async fn handle_get_service(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> JsonResult<Service> {
    let service_id: i64 = parse_record_id(&id, "Service")?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(Envelope::data(get_service(&mut persistence, service_id)?)))
}

/// Handler for POST `/api/services`.
async fn handle_create_service(
    AxumState(app_state): AxumState<AppState>,
    OptionalActor(actor): OptionalActor,
    body: Result<Json<ServicePayload>, JsonRejection>,
) -> CreatedResult<Service> {
    let payload: ServicePayload = json_body(body)?;
    info!(name = ?payload.name, "Handling create_service request");

    let mut persistence = app_state.persistence.lock().await;
    let service: Service = create_service(
        &mut persistence,
        app_state.write_policy,
        actor.as_ref(),
        &payload,
    )?;
    Ok((StatusCode::CREATED, Json(Envelope::data(service))))
}

/// Handler for PUT `/api/services/{id}`.
async fn handle_update_service(
    AxumState(app_state): AxumState<AppState>,
    OptionalActor(actor): OptionalActor,
    Path(id): Path<String>,
    body: Result<Json<ServicePayload>, JsonRejection>,
) -> JsonResult<Service> {
    let service_id: i64 = parse_record_id(&id, "Service")?;
    let payload: ServicePayload = json_body(body)?;
    info!(service_id, "Handling update_service request");

    let mut persistence = app_state.persistence.lock().await;
    let service: Service = update_service(
        &mut persistence,
        app_state.write_policy,
        actor.as_ref(),
        service_id,
        payload,
    )?;
    Ok(Json(Envelope::data(service)))
}

/// Handler for DELETE `/api/services/{id}`.
///
/// Refused with 409 while any booking references the service.
async fn handle_delete_service(
    AxumState(app_state): AxumState<AppState>,
    OptionalActor(actor): OptionalActor,
    Path(id): Path<String>,
) -> JsonResult<DeleteConfirmation> {
    let service_id: i64 = parse_record_id(&id, "Service")?;
    info!(service_id, "Handling delete_service request");

    let mut persistence = app_state.persistence.lock().await;
    let confirmation: DeleteConfirmation = delete_service(
        &mut persistence,
        app_state.write_policy,
        actor.as_ref(),
        service_id,
    )?;
    let message: String = confirmation.message.clone();
    Ok(Json(Envelope::data(confirmation).with_message(message)))
}

// ============================================================================
// Bookings
// ============================================================================

/// Handler for GET `/api/bookings`.
async fn handle_list_bookings(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> JsonResult<Vec<Booking>> {
    let query: ListQuery = list_query(query)?;
    info!(page = ?query.page, limit = ?query.limit, "Handling list_bookings request");

    let mut persistence = app_state.persistence.lock().await;
    let page: Page<Booking> = list_bookings(&mut persistence, query)?;
    Ok(Json(Envelope::page(page)))
}

/// Handler for GET `/api/bookings/{id}`.
async fn handle_get_booking(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
) -> JsonResult<Booking> {
    let booking_id: i64 = parse_record_id(&id, "Booking")?;
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(Envelope::data(get_booking(&mut persistence, booking_id)?)))
}

/// Handler for POST `/api/bookings`.
///
/// This is the customer-facing form and never needs a credential.
async fn handle_create_booking(
    AxumState(app_state): AxumState<AppState>,
    body: Result<Json<BookingPayload>, JsonRejection>,
) -> CreatedResult<Booking> {
    let payload: BookingPayload = json_body(body)?;
    info!("Handling create_booking request");

    let mut persistence = app_state.persistence.lock().await;
    let booking: Booking = create_booking(&mut persistence, &payload)?;
    Ok((StatusCode::CREATED, Json(Envelope::data(booking))))
}

/// Handler for PUT `/api/bookings/{id}`.
async fn handle_update_booking(
    AxumState(app_state): AxumState<AppState>,
    OptionalActor(actor): OptionalActor,
    Path(id): Path<String>,
    body: Result<Json<BookingPayload>, JsonRejection>,
) -> JsonResult<Booking> {
    let booking_id: i64 = parse_record_id(&id, "Booking")?;
    let payload: BookingPayload = json_body(body)?;
    info!(booking_id, status = ?payload.status, "Handling update_booking request");

    let mut persistence = app_state.persistence.lock().await;
    let booking: Booking = update_booking(
        &mut persistence,
        app_state.write_policy,
        actor.as_ref(),
        booking_id,
        payload,
    )?;
    Ok(Json(Envelope::data(booking)))
}

/// Builds the application router with all endpoints.
/// Hardening headers sent with every response unless a handler set its own.
const SECURITY_HEADERS: [(&str, &str); 11] = [
    (
        "content-security-policy",
        "default-src 'self';base-uri 'self';font-src 'self' https: data:;\
         form-action 'self';frame-ancestors 'self';img-src 'self' data:;\
         object-src 'none';script-src 'self';script-src-attr 'none';\
         style-src 'self' https: 'unsafe-inline';upgrade-insecure-requests",
    ),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("origin-agent-cluster", "?1"),
    ("referrer-policy", "no-referrer"),
    (
        "strict-transport-security",
        "max-age=15552000; includeSubDomains",
    ),
    ("x-content-type-options", "nosniff"),
    ("x-dns-prefetch-control", "off"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-permitted-cross-domain-policies", "none"),
    ("x-xss-protection", "0"),
];

fn with_security_headers(router: Router) -> Router {
    SECURITY_HEADERS
        .iter()
        .fold(router, |router, &(name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            ))
        })
}

fn build_router(app_state: AppState) -> Router {
    let router: Router = Router::new()
        .route("/api/health", get(handle_health))
        .route("/api/register", post(handle_register))
        .route("/api/login", post(handle_login))
        .route("/api/validate-token", post(handle_validate_token))
        .route(
            "/api/clients",
            get(handle_list_clients).post(handle_create_client),
        )
        .route(
            "/api/clients/{id}",
            get(handle_get_client)
                .put(handle_update_client)
                .delete(handle_delete_client),
        )
        .route(
            "/api/services",
            get(handle_list_services).post(handle_create_service),
        )
        .route(
            "/api/services/{id}",
            get(handle_get_service)
                .put(handle_update_service)
                .delete(handle_delete_service),
        )
        .route(
            "/api/bookings",
            get(handle_list_bookings).post(handle_create_booking),
        )
        .route(
            "/api/bookings/{id}",
            get(handle_get_booking).put(handle_update_booking),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    with_security_headers(router)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is normal; real environment variables still apply.
    dotenvy::dotenv().ok();

    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Bookwise Server");

    let persistence: Persistence = match Persistence::from_database_url(&args.database_url) {
        Ok(persistence) => persistence,
        Err(e) => {
            error!(error = %e, "Failed to open database");
            return Err(Box::new(e) as Box<dyn std::error::Error>);
        }
    };

    let write_policy: WritePolicy = if args.require_admin {
        info!("Record writes require an admin token");
        WritePolicy::AdminOnly
    } else {
        WritePolicy::Open
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        tokens: Arc::new(TokenService::new(
            args.jwt_secret.as_bytes(),
            Duration::seconds(args.token_ttl_secs),
        )),
        write_policy,
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
