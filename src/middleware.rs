use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

/// Пропускает запрос к обработчику только при ожидаемом HTTP-методе.
/// Подключается через `from_fn_with_state(Method::GET, require_method)`.
pub async fn require_method(
    State(expected): State<Method>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != expected {
        warn!(
            "Method not allowed: expected {}, got {} ({})",
            expected,
            request.method(),
            request.uri().path()
        );
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, expected.to_string())],
            format!("method {} is not allowed\n", request.method()),
        )
            .into_response();
    }

    next.run(request).await
}
