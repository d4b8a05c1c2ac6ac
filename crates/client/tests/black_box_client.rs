use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use foodnova_cart::{CartKey, CartLine};
use foodnova_client::screens::{
    BrowseScreen, CatalogAdmin, CheckoutScreen, DashboardScreen, OrderReviewer, OrderViewer,
};
use foodnova_client::store::keys;
use foodnova_client::{ApiClient, AppContext, ClientError, LocalStore, SessionContext};
use foodnova_core::{CategoryId, Money, OrderId, ProductId};
use foodnova_orders::{
    CheckoutForm, CustomerAction, DeliveryMode, OrderStatus, PaymentMethod, ReceiptState,
    ReceiptStatus, ReviewDecision,
};

fn api_url(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

fn mint_jwt(role: &str) -> String {
    let claims = json!({
        "sub": "3",
        "role": role,
        "type": "access",
        "exp": (Utc::now() + ChronoDuration::minutes(10)).timestamp(),
    });
    jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-secret"))
        .expect("failed to encode jwt")
}

async fn context(server: &MockServer, role: &str) -> AppContext {
    let store = LocalStore::in_memory().await.unwrap();
    AppContext::with_store(&api_url(server), store, Some(mint_jwt(role)))
        .await
        .unwrap()
}

async fn fill_cart(ctx: &mut AppContext) {
    ctx.cart
        .add(CartLine::new(CartKey::Product(ProductId::new(1)), "Rice", Money::new(1000), 2))
        .await
        .unwrap();
    ctx.cart
        .add(CartLine::new(CartKey::Product(ProductId::new(2)), "Beans", Money::new(500), 1))
        .await
        .unwrap();
}

fn form(mode: DeliveryMode, address: &str) -> CheckoutForm {
    CheckoutForm {
        mode,
        address: address.into(),
        phone: "08030000000".into(),
        payment_method: PaymentMethod::Etransfer,
    }
}

fn order_json(status: &str, receipt: Option<&str>) -> serde_json::Value {
    let mut order = json!({
        "id": 7,
        "user_id": 3,
        "status": status,
        "total_amount": 2500,
        "delivery_address": "12 Marina Rd",
        "phone": "08030000000",
        "created_at": "2025-05-04T09:15:00",
        "items": [
            {"id": 1, "product_id": 1, "name_snapshot": "Rice", "unit_price": 1000, "qty": 2, "line_total": 2000},
            {"id": 2, "product_id": 2, "name_snapshot": "Beans", "unit_price": 500, "qty": 1, "line_total": 500}
        ],
        "has_receipt": receipt.is_some(),
        "receipt_status": receipt,
    });
    if let Some(status) = receipt {
        order["receipt"] = receipt_json(status);
        order["payment"] = json!({"id": 9, "method": "etransfer", "status": "pending", "reference": null, "verified_at": null});
        order["user_email"] = json!("ada@example.com");
        order["user_name"] = json!("Ada");
    }
    order
}

fn receipt_json(status: &str) -> serde_json::Value {
    json!({
        "id": 5,
        "order_id": 7,
        "file_url": "/uploads/receipt_7.png",
        "status": status,
        "admin_note": null,
        "uploaded_at": "2025-05-04T10:00:00"
    })
}

fn ack(status: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"message": "updated", "status": status}))
}

#[tokio::test]
async fn cart_totals_scenario() {
    let server = MockServer::start().await;
    let mut ctx = context(&server, "customer").await;
    fill_cart(&mut ctx).await;
    assert_eq!(ctx.cart.cart().total_amount(), Money::new(2500));
}

#[tokio::test]
async fn delivery_without_address_is_rejected_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut ctx = context(&server, "customer").await;
    fill_cart(&mut ctx).await;

    let screen = CheckoutScreen::new(ctx.api.clone());
    let err = screen
        .submit(&mut ctx.cart, &form(DeliveryMode::Delivery, "  "))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(err.to_string(), "Please enter your delivery address");
    assert_eq!(ctx.cart.cart().lines().len(), 2);
}

#[tokio::test]
async fn pickup_checkout_clears_cart_and_flags_receipt_banner() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .and(body_partial_json(json!({
            "delivery_address": "PICKUP - Customer will pick up from store",
            "payment_method": "etransfer",
            "items": [{"product_id": 1, "qty": 2}, {"product_id": 2, "qty": 1}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("pending", None)))
        .expect(1)
        .mount(&server)
        .await;

    let store = LocalStore::in_memory().await.unwrap();
    let mut ctx = AppContext::with_store(&api_url(&server), store.clone(), Some(mint_jwt("customer")))
        .await
        .unwrap();
    fill_cart(&mut ctx).await;

    let screen = CheckoutScreen::new(ctx.api.clone());
    let outcome = screen
        .submit(&mut ctx.cart, &form(DeliveryMode::Pickup, ""))
        .await
        .unwrap();

    assert_eq!(outcome.order.id, OrderId::new(7));
    assert!(outcome.show_upload_banner);
    assert!(ctx.cart.cart().is_empty());

    let reloaded = AppContext::with_store(&api_url(&server), store, None).await.unwrap();
    assert!(reloaded.cart.cart().is_empty());

    let viewer = OrderViewer::after_checkout(ctx.api.clone(), outcome.order);
    assert!(viewer.show_upload_banner());
}

#[tokio::test]
async fn placed_order_is_returned_even_if_cart_cannot_be_cleared() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("pending", None)))
        .expect(1)
        .mount(&server)
        .await;

    let store = LocalStore::in_memory().await.unwrap();
    let mut ctx = AppContext::with_store(&api_url(&server), store.clone(), Some(mint_jwt("customer")))
        .await
        .unwrap();
    fill_cart(&mut ctx).await;
    store.close().await;

    let outcome = CheckoutScreen::new(ctx.api.clone())
        .submit(&mut ctx.cart, &form(DeliveryMode::Delivery, "12 Marina Rd"))
        .await
        .unwrap();

    assert_eq!(outcome.order.id, OrderId::new(7));
    assert_eq!(ctx.cart.cart().lines().len(), 2);
}

#[tokio::test]
async fn server_rejection_is_surfaced_verbatim_and_cart_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Insufficient stock for Rice"})),
        )
        .mount(&server)
        .await;

    let mut ctx = context(&server, "customer").await;
    fill_cart(&mut ctx).await;

    let screen = CheckoutScreen::new(ctx.api.clone());
    let err = screen
        .submit(&mut ctx.cart, &form(DeliveryMode::Delivery, "12 Marina Rd"))
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail, "Insufficient stock for Rice");
        }
        other => panic!("expected api error, got {other:?}"),
    }
    assert_eq!(ctx.cart.cart().total_amount(), Money::new(2500));
    assert!(!screen.is_submitting());
}

#[tokio::test]
async fn server_failure_without_detail_uses_fallback_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let mut ctx = context(&server, "customer").await;
    fill_cart(&mut ctx).await;

    let err = CheckoutScreen::new(ctx.api.clone())
        .submit(&mut ctx.cart, &form(DeliveryMode::Delivery, "12 Marina Rd"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to place order. Please try again.");
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let api = ApiClient::new("http://127.0.0.1:1/api");
    let err = api.list_categories().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn bad_receipt_files_are_rejected_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("pending", None)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders/7/receipt"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = context(&server, "customer").await;
    let viewer = OrderViewer::new(ctx.api.clone(), OrderId::new(7));
    viewer.load().await.unwrap();
    assert_eq!(viewer.action().unwrap(), CustomerAction::UploadReceipt);

    let err = viewer
        .upload_receipt("notes.txt", "text/plain", b"hello".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid file type. Allowed: PNG, JPG, WEBP, PDF");

    let too_big = vec![0u8; 10 * 1024 * 1024 + 1];
    let err = viewer
        .upload_receipt("scan.pdf", "application/pdf", too_big)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "File too large. Maximum size: 10MB");

    let dir = tempfile::tempdir().unwrap();
    let gif = dir.path().join("receipt.gif");
    std::fs::write(&gif, b"GIF89a").unwrap();
    assert!(viewer.upload_receipt_from_path(&gif).await.unwrap_err().is_validation());

    let big = dir.path().join("statement.pdf");
    std::fs::File::create(&big)
        .unwrap()
        .set_len(10 * 1024 * 1024 + 1)
        .unwrap();
    let err = viewer.upload_receipt_from_path(&big).await.unwrap_err();
    assert_eq!(err.to_string(), "File too large. Maximum size: 10MB");

    assert_eq!(viewer.order().unwrap().receipt_state(), ReceiptState::Absent);
}

#[tokio::test]
async fn receipt_upload_refetches_the_whole_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("pending", None)))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("pending", Some("submitted"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders/7/receipt"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(receipt_json("submitted")))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server, "customer").await;
    let viewer = OrderViewer::new(ctx.api.clone(), OrderId::new(7));
    viewer.load().await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("receipt.PNG");
    std::fs::write(&file, b"\x89PNG\r\n\x1a\n").unwrap();

    let receipt = viewer.upload_receipt_from_path(&file).await.unwrap();
    assert_eq!(receipt.status, ReceiptStatus::Submitted);
    assert_eq!(
        viewer.action().unwrap(),
        CustomerAction::ReceiptBadge(ReceiptStatus::Submitted)
    );
}

#[tokio::test]
async fn failed_upload_leaves_order_as_it_was() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("pending", None)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders/7/receipt"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "Receipt already uploaded"})))
        .mount(&server)
        .await;

    let ctx = context(&server, "customer").await;
    let viewer = OrderViewer::new(ctx.api.clone(), OrderId::new(7));
    viewer.load().await.unwrap();

    let err = viewer
        .upload_receipt("r.jpg", "image/jpeg", vec![1, 2, 3])
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Receipt already uploaded");
    assert_eq!(viewer.action().unwrap(), CustomerAction::UploadReceipt);
}

#[tokio::test]
async fn accepted_upload_survives_a_failed_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("pending", None)))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/7"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders/7/receipt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(receipt_json("submitted")))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server, "customer").await;
    let viewer = OrderViewer::new(ctx.api.clone(), OrderId::new(7));
    viewer.load().await.unwrap();
    assert!(!viewer.is_stale());

    let receipt = viewer
        .upload_receipt("r.png", "image/png", vec![1, 2, 3])
        .await
        .unwrap();

    assert_eq!(receipt.id.to_string(), "5");
    assert!(viewer.is_stale());
    assert_eq!(
        viewer.action().unwrap(),
        CustomerAction::ReceiptBadge(ReceiptStatus::Submitted)
    );
}

#[tokio::test]
async fn rejected_receipt_on_pending_order_cannot_be_replaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("pending", Some("rejected"))))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders/7/receipt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(receipt_json("submitted")))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = context(&server, "customer").await;
    let viewer = OrderViewer::new(ctx.api.clone(), OrderId::new(7));
    viewer.load().await.unwrap();
    assert_eq!(
        viewer.action().unwrap(),
        CustomerAction::ReceiptBadge(ReceiptStatus::Rejected)
    );

    let err = viewer
        .upload_receipt("again.png", "image/png", vec![1, 2, 3])
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn admin_status_change_is_displayed_before_the_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("pending", None)))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/orders/7"))
        .and(body_json(json!({"status": "confirmed"})))
        .respond_with(ack("confirmed").set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server, "admin").await;
    let reviewer = OrderReviewer::new(ctx.api.clone(), OrderId::new(7));
    reviewer.load().await.unwrap();

    let mut rx = reviewer.subscribe();
    rx.borrow_and_update();

    let (result, (seen, in_flight)) = tokio::join!(reviewer.set_status(OrderStatus::Confirmed), async {
        rx.changed().await.unwrap();
        let seen = rx.borrow_and_update().as_ref().map(|o| o.status);
        (seen, reviewer.is_saving())
    });

    result.unwrap();
    assert_eq!(seen, Some(OrderStatus::Confirmed));
    assert!(in_flight, "optimistic value must be visible while the request is pending");
    assert_eq!(reviewer.order().unwrap().status, OrderStatus::Confirmed);
}

#[tokio::test]
async fn concurrent_status_change_is_refused_while_busy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("pending", None)))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/orders/7"))
        .respond_with(ack("paid").set_delay(Duration::from_millis(200)))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server, "admin").await;
    let reviewer = OrderReviewer::new(ctx.api.clone(), OrderId::new(7));
    reviewer.load().await.unwrap();

    let (first, second) = tokio::join!(
        reviewer.set_status(OrderStatus::Paid),
        reviewer.set_status(OrderStatus::Cancelled)
    );
    first.unwrap();
    assert!(matches!(second, Err(ClientError::Busy)));
    assert_eq!(reviewer.order().unwrap().status, OrderStatus::Paid);
}

#[tokio::test]
async fn refused_status_change_is_rolled_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("pending", None)))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/orders/7"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "Invalid status"})))
        .mount(&server)
        .await;

    let ctx = context(&server, "admin").await;
    let reviewer = OrderReviewer::new(ctx.api.clone(), OrderId::new(7));
    reviewer.load().await.unwrap();

    let err = reviewer.set_status(OrderStatus::Delivered).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Invalid status");
    assert_eq!(reviewer.order().unwrap().status, OrderStatus::Pending);
}

#[tokio::test]
async fn approval_is_followed_by_a_refetch_showing_approved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("pending", Some("submitted"))))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("paid", Some("approved"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/receipts/5"))
        .and(body_json(json!({"status": "approved", "admin_note": "Matches transfer"})))
        .respond_with(ack("approved"))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server, "admin").await;
    let reviewer = OrderReviewer::new(ctx.api.clone(), OrderId::new(7));
    reviewer.load().await.unwrap();
    assert_eq!(reviewer.order().unwrap().receipt_state(), ReceiptState::Submitted);

    reviewer
        .review_receipt(ReviewDecision::Approved, Some("  Matches transfer "))
        .await
        .unwrap();

    let order = reviewer.order().unwrap();
    assert_eq!(order.receipt.unwrap().status, ReceiptStatus::Approved);
    assert_eq!(order.status, OrderStatus::Paid);
}

#[tokio::test]
async fn approval_survives_a_failed_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("pending", Some("submitted"))))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/7"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/receipts/5"))
        .respond_with(ack("approved"))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server, "admin").await;
    let reviewer = OrderReviewer::new(ctx.api.clone(), OrderId::new(7));
    reviewer.load().await.unwrap();

    reviewer
        .review_receipt(ReviewDecision::Approved, Some("ok"))
        .await
        .unwrap();

    assert!(reviewer.is_stale());
    let receipt = reviewer.order().unwrap().receipt.unwrap();
    assert_eq!(receipt.status, ReceiptStatus::Approved);
    assert_eq!(receipt.admin_note.as_deref(), Some("ok"));
}

#[tokio::test]
async fn already_reviewed_receipt_is_not_reviewed_again() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("paid", Some("approved"))))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ack("x"))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = context(&server, "admin").await;
    let reviewer = OrderReviewer::new(ctx.api.clone(), OrderId::new(7));
    reviewer.load().await.unwrap();

    let err = reviewer
        .review_receipt(ReviewDecision::Rejected, None)
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "This receipt has already been approved");
}

#[tokio::test]
async fn reviewing_an_order_without_receipt_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("pending", None)))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ack("x"))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = context(&server, "admin").await;
    let reviewer = OrderReviewer::new(ctx.api.clone(), OrderId::new(7));
    reviewer.load().await.unwrap();

    let err = reviewer
        .review_receipt(ReviewDecision::Rejected, None)
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn payment_update_sends_status_and_reference() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json("pending", Some("submitted"))))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/payments/9"))
        .and(body_json(json!({"status": "verified", "reference": "TRX-001"})))
        .respond_with(ack("verified"))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server, "admin").await;
    let reviewer = OrderReviewer::new(ctx.api.clone(), OrderId::new(7));
    reviewer.load().await.unwrap();
    reviewer
        .update_payment(foodnova_orders::PaymentStatus::Verified, Some("TRX-001".into()))
        .await
        .unwrap();
}

fn products_json() -> serde_json::Value {
    json!([
        {"id": 1, "name": "Rice", "price": 1000, "stock_qty": 15, "category_id": 1, "is_active": true},
        {"id": 2, "name": "Beans", "price": 500, "stock_qty": 25, "category_id": 2, "is_active": true},
        {"id": 3, "name": "Garri", "price": 300, "stock_qty": 5, "category_id": 2, "is_active": false}
    ])
}

#[tokio::test]
async fn browse_filters_the_cached_list_locally() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("category_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "Grains"}, {"id": 2, "name": "Legumes"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/packs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Family Pack", "variants": [{"id": 10, "name": "Small", "price": 25000, "items": []}]}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctx = context(&server, "customer").await;
    let mut screen = BrowseScreen::new(ctx.api.clone());
    screen.mount().await.unwrap();
    assert_eq!(screen.visible_products().len(), 3);

    screen.select_category(Some(CategoryId::new(2))).await.unwrap();
    let ids: Vec<i64> = screen.visible_products().iter().map(|p| p.id.get()).collect();
    assert_eq!(ids, vec![2, 3]);

    screen.select_category(None).await.unwrap();
    assert_eq!(screen.visible_products().len(), 3);

    screen
        .add_variant_to_cart(&mut ctx.cart, foodnova_core::PackVariantId::new(10), 1)
        .await
        .unwrap();
    assert_eq!(ctx.cart.cart().lines()[0].name, "Family Pack - Small");

    let err = screen
        .add_product_to_cart(&mut ctx.cart, ProductId::new(3), 1)
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn browse_without_cache_fetches_each_category_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("category_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 2, "name": "Beans", "price": 500, "stock_qty": 25, "category_id": 2}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server, "customer").await;
    let mut screen = BrowseScreen::new(ctx.api.clone());
    screen.select_category(Some(CategoryId::new(2))).await.unwrap();
    screen.select_category(Some(CategoryId::new(2))).await.unwrap();
    assert_eq!(screen.visible_products().len(), 1);
}

#[tokio::test]
async fn dashboard_combines_orders_and_products() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "status": "pending", "total_amount": 1000, "created_at": "2025-05-01T08:00:00", "item_count": 1},
            {"id": 2, "status": "cancelled", "total_amount": 9000, "created_at": "2025-05-02T08:00:00", "item_count": 3},
            {"id": 3, "status": "delivered", "total_amount": 2500, "created_at": "2025-05-03T08:00:00", "item_count": 2}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json()))
        .mount(&server)
        .await;

    let ctx = context(&server, "admin").await;
    let stats = DashboardScreen::new(ctx.api.clone()).load().await.unwrap();

    assert_eq!(stats.total_orders, 3);
    assert_eq!(stats.pending_orders.len(), 1);
    assert_eq!(stats.total_revenue, Money::new(3500));
    assert_eq!(stats.active_products, 2);
    assert_eq!(stats.low_stock.len(), 1);
    assert_eq!(stats.low_stock[0].id, ProductId::new(1));
}

#[tokio::test]
async fn category_admin_validates_then_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/categories"))
        .and(body_json(json!({"name": "Spices"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "name": "Spices"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 3, "name": "Spices"}])))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server, "admin").await;
    let mut admin = CatalogAdmin::new(ctx.api.clone());

    assert!(admin.create_category("   ").await.unwrap_err().is_validation());
    admin.create_category(" Spices ").await.unwrap();
    assert_eq!(admin.categories().len(), 1);
}

#[tokio::test]
async fn accepted_category_survives_a_failed_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 3, "name": "Spices"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/categories"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server, "admin").await;
    let mut admin = CatalogAdmin::new(ctx.api.clone());

    admin.create_category("Spices").await.unwrap();
    assert!(admin.is_stale());
}

#[tokio::test]
async fn login_persists_token_and_logout_clears_it() {
    let server = MockServer::start().await;
    let token = mint_jwt("admin");
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "ada@example.com", "password": "secret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "refresh_token": "r",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "email": "ada@example.com", "full_name": "Ada", "role": "admin"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = LocalStore::in_memory().await.unwrap();
    let mut ctx = AppContext::with_store(&api_url(&server), store.clone(), None)
        .await
        .unwrap();
    assert!(ctx.require_admin("/admin").is_err());

    let profile = ctx.login("ada@example.com", "secret").await.unwrap();
    assert_eq!(profile.full_name, "Ada");
    assert!(ctx.require_admin("/admin").is_ok());

    let restored = SessionContext::load(store.clone(), None).await.unwrap();
    assert_eq!(restored.session().token(), Some(token.as_str()));
    assert!(restored.session().is_admin());

    ctx.logout().await.unwrap();
    assert!(ctx.api.token().is_none());
    assert_eq!(store.get::<String>(keys::AUTH_TOKEN).await.unwrap(), None);
}

#[tokio::test]
async fn customer_token_is_not_offered_admin_screens() {
    let server = MockServer::start().await;
    let ctx = context(&server, "customer").await;
    assert!(ctx.require_customer("/orders").is_ok());
    assert!(ctx.require_admin("/admin").is_err());
}

#[tokio::test]
async fn empty_login_form_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = LocalStore::in_memory().await.unwrap();
    let mut ctx = AppContext::with_store(&api_url(&server), store, None).await.unwrap();
    assert!(ctx.login(" ", "").await.unwrap_err().is_validation());
}
