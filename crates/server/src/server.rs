use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::Arc;

use crate::{attendance, auth, employees, products, reports, sales, stock};
use engine::{Engine, users};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
}

async fn basic_auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(auth_header) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    // Usernames are stored lowercased.
    let user: Option<users::Model> = users::Entity::find()
        .filter(users::Column::Username.eq(auth_header.username().to_lowercase()))
        .filter(users::Column::Password.eq(auth_header.password()))
        .one(&state.db)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let Some(user) = user else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/employees", get(employees::list).post(employees::create))
        .route(
            "/employees/{id}",
            axum::routing::patch(employees::update).delete(employees::remove),
        )
        .route("/attendance", post(attendance::mark))
        .route("/employees/{id}/attendance", get(attendance::list))
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            axum::routing::patch(products::update).delete(products::remove),
        )
        .route("/stock", get(stock::list).post(stock::create))
        .route(
            "/stock/{id}",
            axum::routing::patch(stock::update).delete(stock::remove),
        )
        .route("/sales", get(sales::list).post(sales::create))
        .route(
            "/sales/{id}",
            get(sales::detail)
                .patch(sales::update)
                .delete(sales::remove),
        )
        .route("/sales/{id}/payments", post(sales::record_payment))
        .route("/reports/sales", get(reports::sales))
        .route("/reports/sales/export", get(reports::sales_export))
        .route("/reports/salaries", get(reports::salaries))
        .route_layer(middleware::from_fn_with_state(state.clone(), basic_auth));

    Router::new()
        .route("/auth/register", post(auth::register))
        .merge(protected)
        .with_state(state)
}

/// Build the application router; used by `run` and by the HTTP tests.
pub fn app(engine: Engine, db: DatabaseConnection) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
        db,
    })
}

pub async fn run(engine: Engine, db: DatabaseConnection) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, db, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine, db)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, db, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
