//! Prefix-dispatching reverse proxy in front of the backend services.
//!
//! Every inbound request is matched against the routing table in
//! dispatch-priority order; the first matching prefix wins and the
//! request is forwarded verbatim (method, query string, body, headers
//! minus hop-specific ones). The backend's status, headers, and body
//! stream are relayed back without re-encoding. A backend that cannot
//! be reached within the configured timeout yields a 503 naming it.
//! The gateway holds no state beyond the shared HTTP client.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::Response,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Cap on a buffered forwarded body.
const MAX_FORWARD_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Headers tied to a single hop, never relayed in either direction.
const HOP_HEADERS: [&str; 4] = ["host", "content-length", "transfer-encoding", "connection"];

#[derive(Debug, Clone)]
pub struct Route {
    pub prefix: &'static str,
    pub name: &'static str,
    pub backend: String,
}

#[derive(Clone)]
pub struct GatewayState {
    client: reqwest::Client,
    routes: Arc<Vec<Route>>,
}

impl GatewayState {
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            routing_table(config),
            Duration::from_secs(config.gateway_timeout_secs),
        )
    }

    pub fn new(routes: Vec<Route>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .expect("Failed to build gateway HTTP client");
        Self {
            client,
            routes: Arc::new(routes),
        }
    }
}

/// Routing table in dispatch-priority order; first matching prefix wins.
pub fn routing_table(config: &Config) -> Vec<Route> {
    vec![
        Route {
            prefix: "/auth",
            name: "auth-service",
            backend: config.auth_service_url.clone(),
        },
        Route {
            prefix: "/users",
            name: "user-service",
            backend: config.user_service_url.clone(),
        },
        Route {
            prefix: "/health",
            name: "health-data-service",
            backend: config.health_data_service_url.clone(),
        },
        Route {
            prefix: "/ai",
            name: "ai-service",
            backend: config.ai_service_url.clone(),
        },
    ]
}

pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .fallback(proxy)
        .with_state(state)
}

async fn root(State(state): State<GatewayState>) -> Json<Value> {
    let routes: serde_json::Map<String, Value> = state
        .routes
        .iter()
        .map(|r| (r.prefix.to_string(), Value::String(r.name.to_string())))
        .collect();

    Json(json!({
        "service": "api-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "routes": routes,
    }))
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "api-gateway" }))
}

fn match_route<'a>(routes: &'a [Route], path: &str) -> Option<&'a Route> {
    routes.iter().find(|r| {
        path.starts_with(r.prefix)
            && (path.len() == r.prefix.len() || path.as_bytes()[r.prefix.len()] == b'/')
    })
}

fn is_hop_header(name: &str) -> bool {
    HOP_HEADERS.iter().any(|h| name.eq_ignore_ascii_case(h))
}

async fn proxy(State(state): State<GatewayState>, req: Request) -> AppResult<Response> {
    let (parts, body) = req.into_parts();
    let path = parts.uri.path().to_string();

    let route = match_route(&state.routes, &path)
        .ok_or_else(|| AppError::NotFound(format!("No route for {path}")))?;

    let bytes = axum::body::to_bytes(body, MAX_FORWARD_BODY_BYTES)
        .await
        .map_err(|e| AppError::validation(format!("Failed to read request body: {e}")))?;

    let url = match parts.uri.query() {
        Some(query) => format!("{}{}?{}", route.backend, path, query),
        None => format!("{}{}", route.backend, path),
    };

    // The gateway and its HTTP client sit on different `http` major
    // versions, so method and headers cross by value.
    let method = reqwest::Method::from_bytes(parts.method.as_str().as_bytes())
        .map_err(|_| AppError::validation("Unsupported HTTP method"))?;

    let mut headers = reqwest::header::HeaderMap::new();
    for (name, value) in parts.headers.iter() {
        if is_hop_header(name.as_str()) {
            continue;
        }
        if let (Ok(n), Ok(v)) = (
            reqwest::header::HeaderName::from_bytes(name.as_str().as_bytes()),
            reqwest::header::HeaderValue::from_bytes(value.as_bytes()),
        ) {
            headers.append(n, v);
        }
    }

    tracing::debug!(backend = route.name, path = %path, "Forwarding request");

    let upstream = state
        .client
        .request(method, &url)
        .headers(headers)
        .body(bytes)
        .send()
        .await
        .map_err(|e| AppError::Upstream {
            backend: route.name.to_string(),
            reason: e.to_string(),
        })?;

    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);

    let mut response_headers = HeaderMap::new();
    for (name, value) in upstream.headers().iter() {
        if is_hop_header(name.as_str()) {
            continue;
        }
        if let (Ok(n), Ok(v)) = (
            HeaderName::from_bytes(name.as_str().as_bytes()),
            HeaderValue::from_bytes(value.as_bytes()),
        ) {
            response_headers.append(n, v);
        }
    }

    // Stream the backend body through without buffering or re-encoding.
    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::RawQuery;
    use axum::response::IntoResponse;
    use axum::routing::post;
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    fn test_routes(health_backend: String) -> Vec<Route> {
        vec![
            Route {
                prefix: "/auth",
                name: "auth-service",
                backend: "http://127.0.0.1:1".into(),
            },
            Route {
                prefix: "/health",
                name: "health-data-service",
                backend: health_backend,
            },
        ]
    }

    async fn spawn_backend(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_match_route_first_prefix_wins() {
        let routes = test_routes("http://example".into());
        assert_eq!(
            match_route(&routes, "/health/statistics").unwrap().name,
            "health-data-service"
        );
        assert_eq!(match_route(&routes, "/auth").unwrap().name, "auth-service");
        assert!(match_route(&routes, "/other").is_none());
    }

    #[test]
    fn test_match_route_requires_segment_boundary() {
        let routes = test_routes("http://example".into());
        // "/healthy" shares a prefix string but not a path segment
        assert!(match_route(&routes, "/healthy").is_none());
        assert!(match_route(&routes, "/authenticate").is_none());
    }

    #[tokio::test]
    async fn test_proxy_forwards_query_and_relays_body() {
        async fn stats(RawQuery(query): RawQuery) -> Json<Value> {
            Json(json!({ "echo_query": query }))
        }

        let backend =
            spawn_backend(Router::new().route("/health/statistics", get(stats))).await;
        let gateway = router(GatewayState::new(
            test_routes(backend),
            Duration::from_secs(2),
        ));

        let response = gateway
            .oneshot(
                Request::builder()
                    .uri("/health/statistics?days=7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["echo_query"], "days=7");
    }

    #[tokio::test]
    async fn test_proxy_relays_status_and_post_body() {
        async fn echo(body: String) -> impl IntoResponse {
            (StatusCode::IM_A_TEAPOT, body)
        }

        let backend = spawn_backend(Router::new().route("/health/data", post(echo))).await;
        let gateway = router(GatewayState::new(
            test_routes(backend),
            Duration::from_secs(2),
        ));

        let response = gateway
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/health/data")
                    .header("content-type", "text/plain")
                    .body(Body::from("hello backend"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"hello backend");
    }

    #[tokio::test]
    async fn test_unreachable_backend_returns_503_naming_it() {
        let gateway = router(GatewayState::new(
            test_routes("http://example".into()),
            Duration::from_secs(1),
        ));

        let response = gateway
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/login")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["kind"], "upstream_unavailable");
        assert_eq!(json["error"]["backend"], "auth-service");
    }

    #[tokio::test]
    async fn test_unmatched_path_is_handled_locally() {
        let gateway = router(GatewayState::new(
            test_routes("http://example".into()),
            Duration::from_secs(1),
        ));

        let response = gateway
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["service"], "api-gateway");

        let gateway = router(GatewayState::new(
            test_routes("http://example".into()),
            Duration::from_secs(1),
        ));
        let response = gateway
            .oneshot(
                Request::builder()
                    .uri("/nothing/here")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
