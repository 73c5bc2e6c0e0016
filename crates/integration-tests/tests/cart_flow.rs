//! Integration tests for startup, cart mutation and persistence.
//!
//! These tests run real sessions against a catalog file and a file-backed
//! state directory in a temporary folder.

use std::fs;

use cartsim_cli::commands::cart;
use cartsim_cli::confirm::{AssumeYes, ReadConfirm};
use cartsim_cli::{CatalogSource, CliError, FileStore, SimulatorConfig};
use cartsim_core::{
    Cart, CartError, CartStore, Money, Notice, PricingResult, ProductId, SessionError,
};
use cartsim_integration_tests::TestContext;

// =============================================================================
// Startup
// =============================================================================

#[tokio::test]
async fn test_first_start_has_empty_cart_and_zero_totals() {
    let ctx = TestContext::new();
    let session = ctx.session().await;
    assert_eq!(session.catalog().len(), 4);
    assert!(session.cart().is_empty());
    assert_eq!(*session.totals(), PricingResult::ZERO);
    assert!(!ctx.cart_file().exists());
}

#[tokio::test]
async fn test_catalog_failure_blocks_session() {
    let ctx = TestContext::with_catalog("this is not json");
    let mut out = Vec::new();
    let err = cartsim_cli::app::start(&ctx.config, &mut out)
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::CatalogLoad(_)));
    assert!(String::from_utf8(out).unwrap().contains("Could not load the product catalog"));
}

#[tokio::test]
async fn test_corrupt_persisted_cart_starts_empty() {
    let ctx = TestContext::new();
    fs::create_dir_all(&ctx.config.state_dir).unwrap();
    fs::write(ctx.cart_file(), "{{{").unwrap();

    let session = ctx.session().await;
    assert!(session.cart().is_empty());
}

#[tokio::test]
async fn test_oversized_persisted_cart_starts_empty() {
    let ctx = TestContext::new();
    fs::create_dir_all(&ctx.config.state_dir).unwrap();
    fs::write(
        ctx.cart_file(),
        r#"[{"id":1,"name":"A","price":"79228162514264337593543950335","quantity":2}]"#,
    )
    .unwrap();

    let session = ctx.session().await;
    assert!(session.cart().is_empty());
    assert_eq!(*session.totals(), PricingResult::ZERO);
}

#[tokio::test]
async fn test_restores_legacy_field_names() {
    let ctx = TestContext::new();
    fs::create_dir_all(&ctx.config.state_dir).unwrap();
    fs::write(
        ctx.cart_file(),
        r#"[{"id": 1, "nombre": "Widget", "precio": 100, "cantidad": 3}]"#,
    )
    .unwrap();

    let session = ctx.session().await;
    assert_eq!(session.cart().get(ProductId::new(1)).unwrap().quantity, 3);
    assert_eq!(session.totals().subtotal, Money::whole(300));
    assert_eq!(session.totals().total, Money::whole(363));
}

// =============================================================================
// Mutations
// =============================================================================

#[tokio::test]
async fn test_widget_scenario_persists_across_sessions() {
    let ctx = TestContext::new();
    let mut session = ctx.session().await;
    session.add(ProductId::new(1)).unwrap();
    let notices = session.add(ProductId::new(1)).unwrap();
    assert!(matches!(notices.as_slice(), [Notice::Incremented { quantity: 2, .. }]));

    let totals = *session.totals();
    assert_eq!(totals.subtotal, Money::whole(200));
    assert_eq!(totals.shipping, Money::ZERO);
    assert_eq!(totals.tax_amount, Money::whole(42));
    assert_eq!(totals.total, Money::whole(242));
    drop(session);

    let session = ctx.session().await;
    assert_eq!(session.cart().len(), 1);
    assert_eq!(*session.totals(), totals);
}

#[tokio::test]
async fn test_persisted_file_is_line_array() {
    let ctx = TestContext::new();
    let mut session = ctx.session().await;
    session.add(ProductId::new(3)).unwrap();

    let raw = fs::read_to_string(ctx.cart_file()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{"id": 3, "name": "Notebook", "price": "12.5", "quantity": 1}])
    );
}

#[tokio::test]
async fn test_snapshot_price_survives_catalog_change() {
    let ctx = TestContext::new();
    let mut session = ctx.session().await;
    session.add(ProductId::new(1)).unwrap();
    drop(session);

    fs::write(
        ctx.root().join("productos.json"),
        r#"[{"id": 1, "name": "Widget", "price": 175}]"#,
    )
    .unwrap();

    let mut session = ctx.session().await;
    session.add(ProductId::new(1)).unwrap();
    let line = session.cart().get(ProductId::new(1)).unwrap();
    assert_eq!(line.price, Money::whole(100));
    assert_eq!(line.quantity, 2);
}

#[tokio::test]
async fn test_unknown_product_leaves_storage_untouched() {
    let ctx = TestContext::new();
    let mut session = ctx.session().await;
    let err = session.add(ProductId::new(99)).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Cart(CartError::UnknownProduct(id)) if id == ProductId::new(99)
    ));
    assert!(!ctx.cart_file().exists());
}

#[tokio::test]
async fn test_remove_and_clear_through_commands() {
    let ctx = TestContext::new();
    let mut session = ctx.session().await;
    let mut out = Vec::new();

    cart::add(&mut session, &mut out, ProductId::new(1)).unwrap();
    cart::add(&mut session, &mut out, ProductId::new(2)).unwrap();

    // Declined: nothing changes.
    cart::remove(
        &mut session,
        &mut out,
        &mut ReadConfirm("n\n".as_bytes()),
        ProductId::new(2),
    )
    .unwrap();
    assert_eq!(session.cart().len(), 2);

    cart::remove(
        &mut session,
        &mut out,
        &mut ReadConfirm("y\n".as_bytes()),
        ProductId::new(2),
    )
    .unwrap();
    assert_eq!(session.cart().len(), 1);
    assert_eq!(session.totals().subtotal, Money::whole(100));

    cart::clear(&mut session, &mut out, &mut AssumeYes).unwrap();
    assert!(session.cart().is_empty());
    assert!(!ctx.cart_file().exists());

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Desk Chair added!"));
    assert!(text.contains("Cancelled."));
    assert!(text.contains("Desk Chair has been removed."));
    assert!(text.contains("Cart cleared."));
}

#[tokio::test]
async fn test_remove_missing_product_does_not_prompt() {
    let ctx = TestContext::new();
    let mut session = ctx.session().await;
    let mut out = Vec::new();

    // Empty input would decline; the prompt must not be reached at all.
    cart::remove(
        &mut session,
        &mut out,
        &mut ReadConfirm("".as_bytes()),
        ProductId::new(1),
    )
    .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "[warning] Product 1 is not in the cart.\n");
}

#[test]
fn test_file_store_round_trip_matches_memory_semantics() {
    let dir = tempfile::tempdir().unwrap();
    let store = CartStore::new(FileStore::new(dir.path()));
    let cart: Cart = serde_json::from_str(
        r#"[{"id": 2, "name": "Desk Chair", "price": "9500", "quantity": 1},
            {"id": 1, "name": "Widget", "price": "100", "quantity": 4}]"#,
    )
    .unwrap();

    store.persist(&cart).unwrap();
    let restored = store.restore();
    assert_eq!(restored, cart);
    store.persist(&restored).unwrap();
    assert_eq!(store.restore(), cart);
}

#[tokio::test]
async fn test_config_overrides_point_at_context() {
    let ctx = TestContext::new();
    let config = SimulatorConfig {
        catalog: CatalogSource::File("elsewhere.json".into()),
        state_dir: "elsewhere".into(),
    }
    .with_overrides(
        ctx.config.catalog.to_string().as_str().into(),
        Some(ctx.config.state_dir.clone()),
    )
    .unwrap();

    let mut out = Vec::new();
    let session = cartsim_cli::app::start(&config, &mut out).await.unwrap();
    assert_eq!(session.catalog().len(), 4);
}
