//! Response middleware applied to every request.

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

pub const CARS_COOKIE_NAME: &str = "cars_cookie";
pub const CARS_COOKIE_VALUE: &str = "you_visited_the_carsharing_app";

const CARS_COOKIE: &str = "cars_cookie=you_visited_the_carsharing_app; Path=/; SameSite=lax";

/// Append the visit cookie to whatever the downstream stack answered.
pub async fn add_cars_cookie(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .append(header::SET_COOKIE, HeaderValue::from_static(CARS_COOKIE));
    response
}

/// Value of cookie `name` in a `Cookie` request header.
pub fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|part| {
        let (k, v) = part.trim().split_once('=')?;
        (k.trim() == name).then(|| v.trim())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route(
                "/teapot",
                get(|| async { (StatusCode::IM_A_TEAPOT, [(header::SET_COOKIE, "other=1")]) }),
            )
            .layer(axum::middleware::from_fn(add_cars_cookie))
    }

    fn cookies(response: &Response) -> Vec<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn cookie_constant_matches_name_and_value() {
        assert!(CARS_COOKIE.starts_with(&format!("{}={};", CARS_COOKIE_NAME, CARS_COOKIE_VALUE)));
    }

    #[tokio::test]
    async fn cookie_set_on_success() {
        let response = app()
            .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(cookies(&response), vec![CARS_COOKIE.to_string()]);
    }

    #[tokio::test]
    async fn cookie_set_on_unmatched_route() {
        let response = app()
            .oneshot(Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(cookies(&response), vec![CARS_COOKIE.to_string()]);
    }

    #[tokio::test]
    async fn existing_cookies_are_kept() {
        let response = app()
            .oneshot(Request::builder().uri("/teapot").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(cookies(&response), vec!["other=1".to_string(), CARS_COOKIE.to_string()]);
    }

    #[test]
    fn reads_cookie_from_header() {
        let header = "a=1; cars_cookie=you_visited_the_carsharing_app ;b=2";
        assert_eq!(cookie_value(header, "cars_cookie"), Some(CARS_COOKIE_VALUE));
        assert_eq!(cookie_value(header, "missing"), None);
    }
}
