//! Map SDK web service relay

use crate::backend::amap::ProxyRequest;
use crate::error::AppError;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{ConnectInfo, Path, Query, State},
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;

/// Forward a map SDK call upstream with the security code attached
pub async fn amap_service(
    State(state): State<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    method: Method,
    Path(path): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let request = ProxyRequest {
        method,
        path,
        query,
        headers,
        body,
        client_ip: connect_info.map(|ConnectInfo(addr)| addr.ip()),
    };

    let response = state.map_proxy.forward(request).await?;
    Ok((response.status, response.headers, response.body).into_response())
}
