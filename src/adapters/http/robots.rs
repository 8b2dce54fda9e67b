//! Crawl policy endpoint.
//!
//! The public pages (home, signup) are indexable; everything behind
//! authentication or serving machine traffic is excluded.

use axum::{http::header, response::IntoResponse, routing::get, Router};

const ROBOTS_TXT: &str = "\
User-agent: *
Allow: /
Allow: /signup
Disallow: /dashboard/
Disallow: /login
Disallow: /api/
Disallow: /admin/
";

/// Creates the robots router.
pub fn robots_routes() -> Router {
    Router::new().route("/robots.txt", get(robots_txt))
}

/// GET /robots.txt
async fn robots_txt() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], ROBOTS_TXT)
}
