/// Security headers middleware
///
/// Adds security-related HTTP headers to every response, following OWASP
/// recommendations.
///
/// # Headers Applied
///
/// - `X-Content-Type-Options: nosniff`
/// - `X-Frame-Options: DENY`
/// - `Referrer-Policy: strict-origin-when-cross-origin`
/// - `Content-Security-Policy` restricting everything to 'self'
/// - `Strict-Transport-Security` (production only)

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
const CSP_VALUE: &str =
    "default-src 'self'; frame-ancestors 'none'; base-uri 'self'; form-action 'self'";

/// Adds security headers to the response
///
/// Use via `axum::middleware::from_fn` with `production` captured:
///
/// ```no_run
/// use axum::{middleware, Router};
/// use taskshare_api::middleware::security::security_headers;
///
/// let production = false;
/// let app: Router = Router::new()
///     .layer(middleware::from_fn(move |req, next| {
///         security_headers(production, req, next)
///     }));
/// ```
pub async fn security_headers(production: bool, req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    let headers = response.headers_mut();
    headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    headers.insert(
        HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        HeaderName::from_static("content-security-policy"),
        HeaderValue::from_static(CSP_VALUE),
    );

    // HSTS only makes sense behind HTTPS
    if production {
        headers.insert(
            HeaderName::from_static("strict-transport-security"),
            HeaderValue::from_static(HSTS_VALUE),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::Service as _;

    async fn handler() -> StatusCode {
        StatusCode::OK
    }

    fn app(production: bool) -> Router {
        Router::new()
            .route("/test", get(handler))
            .layer(middleware::from_fn(move |req, next| {
                security_headers(production, req, next)
            }))
    }

    #[tokio::test]
    async fn test_security_headers_applied() {
        let mut app = app(false);

        let response = app
            .call(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert!(headers.get("content-security-policy").is_some());
        assert!(headers.get("strict-transport-security").is_none());
    }

    #[tokio::test]
    async fn test_hsts_enabled_in_production() {
        let mut app = app(true);

        let response = app
            .call(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.headers().get("strict-transport-security").is_some());
    }
}
