//! HTTP Middleware
//!
//! 请求耗时与 HTTP 状态码日志

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 请求日志中间件
///
/// 4xx 记录 warn，5xx 记录 error，其余记录 debug。
/// 业务错误（errno != 0）在 ApiError::into_response() 中记录
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP client error"
        );
    } else {
        tracing::debug!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP request completed"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::post,
        Router,
    };
    use tower::util::ServiceExt;

    async fn accepted() -> StatusCode {
        StatusCode::ACCEPTED
    }

    async fn unprocessable() -> StatusCode {
        StatusCode::UNPROCESSABLE_ENTITY
    }

    async fn unavailable() -> StatusCode {
        StatusCode::SERVICE_UNAVAILABLE
    }

    fn router() -> Router {
        Router::new()
            .route("/accepted", post(accepted))
            .route("/unprocessable", post(unprocessable))
            .route("/unavailable", post(unavailable))
            .layer(axum::middleware::from_fn(request_logging_middleware))
    }

    async fn status_of(uri: &str) -> StatusCode {
        let request = HttpRequest::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_middleware_passes_responses_through() {
        assert_eq!(status_of("/accepted").await, StatusCode::ACCEPTED);
        assert_eq!(status_of("/unprocessable").await, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_of("/unavailable").await, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_of("/missing").await, StatusCode::NOT_FOUND);
    }
}
