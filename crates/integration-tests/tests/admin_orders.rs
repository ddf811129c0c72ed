//! End-to-end tests for the orders page.

use flashfood_integration_tests::{TestContext, ok, order, page, rejected};
use reqwest::Method;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

async fn with_orders(ctx: &TestContext) {
    let items = [
        order("FF_ORD_1", "PENDING"),
        order("FF_ORD_2", "CANCELLED"),
        order("FF_ORD_3", "DELIVERED"),
    ];
    Mock::given(method("GET"))
        .and(path(TestContext::api_path("orders/paginated")))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&items, 23, 3)))
        .mount(&ctx.backend)
        .await;
    ctx.sign_in("SUPER_ADMIN").await;
}

#[tokio::test]
async fn test_orders_view_rows_and_stats() {
    let ctx = TestContext::start().await;
    with_orders(&ctx).await;

    let (status, view) = ctx.get("/orders").await;

    assert_eq!(status, 200);
    assert_eq!(view["rows"][0]["total_amount"], "$12.50");
    assert_eq!(view["stats"]["total"], 23);
    assert_eq!(view["stats"]["pending"], 1);
    assert_eq!(view["stats"]["cancelled"], 1);
    assert_eq!(view["stats"]["delivered"], 1);
}

#[tokio::test]
async fn test_failed_delete_restores_row_in_place() {
    let ctx = TestContext::start().await;
    with_orders(&ctx).await;
    Mock::given(method("DELETE"))
        .and(path(TestContext::api_path("orders/FF_ORD_2")))
        .respond_with(ResponseTemplate::new(200).set_body_json(rejected(3, "locked")))
        .expect(1)
        .mount(&ctx.backend)
        .await;

    let (status, body) = ctx.send(Method::DELETE, "/orders/FF_ORD_2", None).await;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "locked");

    let (_, view) = ctx.get("/orders").await;
    let ids: Vec<_> = view["rows"]
        .as_array()
        .expect("rows")
        .iter()
        .map(|row| row["id"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(ids, ["FF_ORD_1", "FF_ORD_2", "FF_ORD_3"]);
}

#[tokio::test]
async fn test_delete_removes_row() {
    let ctx = TestContext::start().await;
    with_orders(&ctx).await;
    Mock::given(method("DELETE"))
        .and(path(TestContext::api_path("orders/FF_ORD_1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"EC": 0})))
        .expect(1)
        .mount(&ctx.backend)
        .await;

    let (status, view) = ctx.send(Method::DELETE, "/orders/FF_ORD_1", None).await;

    assert_eq!(status, 200);
    assert_eq!(view["rows"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_order_details_dialog() {
    let ctx = TestContext::start().await;
    with_orders(&ctx).await;
    Mock::given(method("GET"))
        .and(path(TestContext::api_path("orders/FF_ORD_1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok(order("FF_ORD_1", "PENDING"))))
        .mount(&ctx.backend)
        .await;

    let (status, view) = ctx
        .send(Method::POST, "/orders/FF_ORD_1/details", None)
        .await;

    assert_eq!(status, 200);
    assert_eq!(view["details"]["open"], true);
    assert_eq!(view["details"]["loading"], false);
    assert_eq!(view["details"]["data"]["id"], "FF_ORD_1");
}
