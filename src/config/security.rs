use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use std::env;
use std::sync::OnceLock;

const NOSNIFF: &str = "nosniff";
const DENY: &str = "DENY";
const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
const CSP_API_VALUE: &str = "default-src 'none'; frame-ancestors 'none'";
const REFERRER_POLICY_VALUE: &str = "strict-origin-when-cross-origin";

// HSTS only makes sense behind HTTPS, i.e. in production deployments
fn hsts_enabled() -> bool {
    static HSTS: OnceLock<bool> = OnceLock::new();
    *HSTS.get_or_init(|| {
        env::var("RUST_ENV")
            .map(|v| v.to_lowercase() == "production")
            .unwrap_or(false)
    })
}

pub async fn set_security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert("X-Content-Type-Options", HeaderValue::from_static(NOSNIFF));
    headers.insert("X-Frame-Options", HeaderValue::from_static(DENY));
    headers.insert(
        "Content-Security-Policy",
        HeaderValue::from_static(CSP_API_VALUE),
    );
    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static(REFERRER_POLICY_VALUE),
    );
    if hsts_enabled() {
        headers.insert(
            "Strict-Transport-Security",
            HeaderValue::from_static(HSTS_VALUE),
        );
    }

    response
}
