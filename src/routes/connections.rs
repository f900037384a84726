use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    ConnectRequest, ConnectResponse, ConnectionsResponse, DisconnectQuery, ListConnectionsQuery,
    MessageResponse,
};
use crate::routes::{core_error_response, validation_failed, AppState};

/// Configure connection routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/connections")
            .route(web::get().to(list_connections))
            .route(web::post().to(connect))
            .route(web::delete().to(disconnect)),
    );
}

/// GET /api/v1/connections?userId={userId}
async fn list_connections(
    state: web::Data<AppState>,
    query: web::Query<ListConnectionsQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    match state.connections.list_connections(&query.user_id).await {
        Ok(connections) => HttpResponse::Ok().json(ConnectionsResponse { connections }),
        Err(e) => core_error_response(e),
    }
}

/// POST /api/v1/connections
///
/// Request body:
/// ```json
/// { "userId": "string", "connectToId": "string" }
/// ```
async fn connect(
    state: web::Data<AppState>,
    req: web::Json<ConnectRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.connections.connect(&req.user_id, &req.connect_to_id).await {
        Ok(connection) => HttpResponse::Created().json(ConnectResponse {
            message: "Connection created successfully".to_string(),
            connection,
        }),
        Err(e) => {
            tracing::info!(
                "Connect {} -> {} rejected: {}",
                req.user_id,
                req.connect_to_id,
                e
            );
            core_error_response(e)
        }
    }
}

/// DELETE /api/v1/connections?connectionId={id}&userId={userId}
async fn disconnect(
    state: web::Data<AppState>,
    query: web::Query<DisconnectQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    match state
        .connections
        .disconnect(&query.connection_id, &query.user_id)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: "Connection removed successfully".to_string(),
        }),
        Err(e) => core_error_response(e),
    }
}
