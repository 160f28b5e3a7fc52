//! End-to-end route tests against a seeded catalog.
//!
//! The catalog feed URL points at a closed port, so every test seeds the
//! store directly and nothing leaves the process.

#![allow(clippy::unwrap_used)]

use std::str::FromStr;
use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use quimica_core::{Catalog, Price, Product, ProductId};
use quimica_storefront::config::{CatalogConfig, OrderConfig, StoreConfig, StorefrontConfig};
use quimica_storefront::state::AppState;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        catalog: CatalogConfig {
            url: Url::parse("http://127.0.0.1:9/catalog.csv").unwrap(),
            revalidate: Duration::from_secs(3600),
        },
        order: OrderConfig {
            service_url: Url::parse("https://wa.me").unwrap(),
            phone: "5491131066937".to_string(),
            prefix: "QuimicaGr-Pedido:".to_string(),
        },
        store: StoreConfig::default(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

fn product(id: &str, title: &str, price: &str, category: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        description: format!("{title} de calidad"),
        price: Price::new(Decimal::from_str(price).unwrap()).unwrap(),
        image: format!("/static/img/{id}.jpg"),
        category: category.to_string(),
    }
}

async fn seeded_app() -> Router {
    let state = AppState::new(test_config());
    state
        .catalog()
        .seed(Catalog::new(vec![
            product("1", "Lavandina", "1500", "Limpieza"),
            product("2", "Detergente", "850.5", "Limpieza"),
            product("3", "Crema Corporal", "3200", "Belleza"),
        ]))
        .await;
    quimica_storefront::app(state)
}

/// Minimal cookie jar: remembers the session cookie between requests.
struct Client {
    app: Router,
    cookie: Option<String>,
}

impl Client {
    async fn new() -> Self {
        Self {
            app: seeded_app().await,
            cookie: None,
        }
    }

    async fn get(&mut self, uri: &str) -> Response {
        let request = Request::get(uri);
        self.send(request.body(Body::empty()).unwrap()).await
    }

    async fn post(&mut self, uri: &str, form: &str) -> Response {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&mut self, mut request: Request<Body>) -> Response {
        if let Some(cookie) = &self.cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }

        let response = self.app.clone().oneshot(request).await.unwrap();
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }
        response
    }
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn test_health_and_readiness() {
    let mut client = Client::new().await;

    let response = client.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");

    let response = client.get("/health/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_without_catalog() {
    let app = quimica_storefront::app(AppState::new(test_config()));
    let response = app
        .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_listing_renders_sections() {
    let mut client = Client::new().await;

    let response = client.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert!(response.headers().contains_key("content-security-policy"));

    let html = body_text(response).await;
    assert!(html.contains("Limpieza (2)"));
    assert!(html.contains("Belleza (1)"));
    assert!(html.contains("Lavandina"));
    assert!(html.contains("$ 1.500,00"));
}

#[tokio::test]
async fn test_listing_filters_by_search_term() {
    let mut client = Client::new().await;

    let html = body_text(client.get("/?q=CREMA").await).await;
    assert!(html.contains("Crema Corporal"));
    assert!(!html.contains("Lavandina"));
    assert!(!html.contains("Limpieza (0)"));
}

#[tokio::test]
async fn test_api_catalog_filters_by_category() {
    let mut client = Client::new().await;

    let json = body_json(client.get("/api/catalog?category=Limpieza").await).await;
    let products = json["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(json["categories"], serde_json::json!(["Limpieza", "Belleza"]));

    let json = body_json(client.get("/api/catalog?q=deter&category=").await).await;
    let products = json["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["title"], "Detergente");
}

#[tokio::test]
async fn test_toggle_category_collapses_section() {
    let mut client = Client::new().await;

    let response = client
        .post("/categories/toggle", "category=Limpieza&q=&selected=")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let html = body_text(client.get("/").await).await;
    assert!(html.contains("Limpieza (2)"));
    assert!(!html.contains("Lavandina"));
    assert!(html.contains("Crema Corporal"));

    client
        .post("/categories/toggle", "category=Limpieza&q=&selected=")
        .await;
    let html = body_text(client.get("/").await).await;
    assert!(html.contains("Lavandina"));
}

#[tokio::test]
async fn test_toggle_preserves_filters_in_redirect() {
    let mut client = Client::new().await;

    let response = client
        .post("/categories/toggle", "category=Belleza&q=crema&selected=Belleza")
        .await;
    assert_eq!(location(&response), "/?q=crema&category=Belleza");
}

#[tokio::test]
async fn test_drawer_flow_adds_pending_quantity() {
    let mut client = Client::new().await;

    let response = client.get("/products/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Lavandina"));
    assert!(html.contains("Subtotal: $ 1.500,00"));

    for _ in 0..2 {
        let response = client.post("/drawer/quantity", "step=1").await;
        assert_eq!(location(&response), "/drawer");
    }

    let html = body_text(client.get("/drawer").await).await;
    assert!(html.contains("Subtotal: $ 4.500,00"));

    let response = client.post("/drawer/confirm", "").await;
    assert_eq!(location(&response), "/");

    let json = body_json(client.get("/cart/count").await).await;
    assert_eq!(json["entries"], 1);
    assert_eq!(json["quantity"], 3);
    assert_eq!(json["formatted_total"], "$ 4.500,00");

    // The drawer is closed after confirming.
    let response = client.get("/drawer").await;
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_drawer_rejects_quantity_below_one() {
    let mut client = Client::new().await;

    client.get("/products/2").await;
    client.post("/drawer/quantity", "step=-1").await;
    client.post("/drawer/quantity", "quantity=0").await;
    client.post("/drawer/confirm", "").await;

    let json = body_json(client.get("/cart/count").await).await;
    assert_eq!(json["quantity"], 1);
}

#[tokio::test]
async fn test_close_drawer_adds_nothing() {
    let mut client = Client::new().await;

    client.get("/products/3").await;
    client.post("/drawer/quantity", "quantity=5").await;
    let response = client.post("/drawer/close", "").await;
    assert_eq!(location(&response), "/");

    let json = body_json(client.get("/cart/count").await).await;
    assert_eq!(json["entries"], 0);
    assert_eq!(json["quantity"], 0);
}

#[tokio::test]
async fn test_cart_appends_repeated_products() {
    let mut client = Client::new().await;

    client.post("/cart/add", "product_id=1").await;
    client.post("/cart/add", "product_id=1&quantity=2").await;

    let json = body_json(client.get("/cart/count").await).await;
    assert_eq!(json["entries"], 2);
    assert_eq!(json["quantity"], 3);

    let html = body_text(client.get("/").await).await;
    assert!(html.contains("Completar Pedido (3 productos)"));
}

#[tokio::test]
async fn test_checkout_redirects_to_order_chat() {
    let mut client = Client::new().await;

    client.post("/cart/add", "product_id=2&quantity=2").await;
    let response = client.get("/checkout").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let expected = urlencoding::encode(
        "QuimicaGr-Pedido:* Detergente - $ 850,50 (2 unidades)\nTotal: $ 1.701,00",
    )
    .into_owned();
    assert_eq!(
        location(&response),
        format!("https://wa.me/5491131066937?text={expected}")
    );
}

#[tokio::test]
async fn test_checkout_with_empty_cart_is_rejected() {
    let mut client = Client::new().await;

    let response = client.get("/checkout").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let mut client = Client::new().await;

    let response = client.get("/products/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client.post("/cart/add", "product_id=999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_zero_quantity_is_rejected() {
    let mut client = Client::new().await;

    let response = client.post("/cart/add", "product_id=1&quantity=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
