use crate::log::logger::Logger;
use crate::log::record::RequestAuth;
use crate::log::request::HttpExchange;
use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// 记录每一次 HTTP 请求的 axum 中间件
///
/// 在内层服务处理完成后捕获请求记录，附带 `execTime` 耗时。对端地址取自
/// `ConnectInfo<SocketAddr>`，认证上下文取自响应或请求扩展中的 [`RequestAuth`]，
/// 都没有时视为访客。
///
/// ```ignore
/// let app = Router::new()
///     .route("/api/health", get(health))
///     .layer(axum::middleware::from_fn_with_state(logger.clone(), log_requests));
/// ```
pub async fn log_requests(State(logger): State<Arc<Logger>>, req: Request, next: Next) -> Response {
    let started = Instant::now();
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let request_auth = req.extensions().get::<RequestAuth>().copied();

    let mut snapshot = http::Request::new(());
    *snapshot.method_mut() = req.method().clone();
    *snapshot.uri_mut() = req.uri().clone();
    *snapshot.headers_mut() = req.headers().clone();
    let (snapshot, _) = snapshot.into_parts();

    let response = next.run(req).await;

    let auth = response
        .extensions()
        .get::<RequestAuth>()
        .copied()
        .or(request_auth)
        .unwrap_or_default();
    let exchange = HttpExchange::new(&snapshot, response.status())
        .with_remote_addr(remote_addr)
        .with_auth(auth);

    if let Err(e) = logger
        .request(&exchange)
        .duration("execTime", started.elapsed())
        .send()
    {
        ::log::warn!("failed to log request {} {}: {}", snapshot.method, snapshot.uri, e);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::appender::MemoryAppender;
    use crate::log::store::MemoryStore;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Extension, Router};
    use tower::ServiceExt;

    fn app() -> (Router, Arc<MemoryStore>, Arc<MemoryAppender>) {
        let store = Arc::new(MemoryStore::new());
        let appender = Arc::new(MemoryAppender::new());
        let logger = Logger::disabled().with_appender(appender.clone());
        logger.set_store(store.clone()).unwrap();
        let logger = Arc::new(logger);

        let router = Router::new()
            .route("/api/health", get(|| async { "ok" }))
            .route(
                "/api/admin",
                get(|| async { (Extension(RequestAuth::Admin), "secret") }),
            )
            .route(
                "/api/missing",
                get(|| async { (StatusCode::NOT_FOUND, "missing") }),
            )
            .layer(axum::middleware::from_fn_with_state(logger, log_requests));

        (router, store, appender)
    }

    #[tokio::test]
    async fn test_log_requests_guest() {
        let (app, store, appender) = app();
        let peer: SocketAddr = "203.0.113.5:54321".parse().unwrap();

        let response = app
            .oneshot(
                http::Request::builder()
                    .uri("/api/health")
                    .extension(ConnectInfo(peer))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let requests = store.requests().unwrap();
        assert_eq!(requests.len(), 1);
        let record = &requests[0];
        assert_eq!(record.method, "get");
        assert_eq!(record.url, "/api/health");
        assert_eq!(record.status, 200);
        assert_eq!(record.auth, RequestAuth::Guest);
        assert_eq!(record.user_ip, "203.0.113.5");
        assert_eq!(record.remote_ip, "203.0.113.5");
        assert!(record.meta.contains_key("execTime"));
        assert_eq!(appender.lines(), vec!["get /api/health"]);
    }

    #[tokio::test]
    async fn test_log_requests_auth_and_proxy_headers() {
        let (app, store, _) = app();

        app.oneshot(
            http::Request::builder()
                .uri("/api/admin?verbose=1")
                .header("x-forwarded-for", "10.0.0.1, 10.0.0.2")
                .header("user-agent", "curl/8.0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

        let record = store.requests().unwrap().remove(0);
        assert_eq!(record.url, "/api/admin?verbose=1");
        assert_eq!(record.auth, RequestAuth::Admin);
        assert_eq!(record.user_ip, "10.0.0.2");
        assert_eq!(record.remote_ip, "");
        assert_eq!(record.user_agent, "curl/8.0");
    }

    #[tokio::test]
    async fn test_log_requests_records_status() {
        let (app, store, _) = app();

        let response = app
            .oneshot(
                http::Request::builder()
                    .method("GET")
                    .uri("/api/missing")
                    .extension(RequestAuth::AuthRecord)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let record = store.requests().unwrap().remove(0);
        assert_eq!(record.method, "get");
        assert_eq!(record.status, 404);
        assert_eq!(record.auth, RequestAuth::AuthRecord);
    }
}
