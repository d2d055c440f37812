//! Theme preference across storefront sessions.

#![allow(clippy::unwrap_used)]

use istore_core::Theme;
use istore_integration_tests::TestContext;
use istore_storefront::{KeyValueStore, Storefront, StorefrontConfig, storage::keys};

#[test]
fn test_toggle_survives_reopen() {
    let ctx = TestContext::new();
    {
        let mut shop = ctx.open();
        assert_eq!(shop.theme(), Theme::Light);
        assert_eq!(shop.toggle_theme(), Theme::Dark);
    }

    assert_eq!(ctx.open().theme(), Theme::Dark);
    assert_eq!(
        ctx.store().get(keys::THEME).unwrap().as_deref(),
        Some("dark")
    );
}

#[test]
fn test_saved_theme_beats_preferred() {
    let ctx = TestContext::new();
    ctx.store().set(keys::THEME, "light").unwrap();

    let config = StorefrontConfig {
        preferred_theme: Theme::Dark,
        ..ctx.config()
    };
    assert_eq!(Storefront::open(config).theme(), Theme::Light);
}

#[test]
fn test_invalid_saved_theme_falls_back() {
    let ctx = TestContext::new();
    ctx.store().set(keys::THEME, "sepia").unwrap();

    let config = StorefrontConfig {
        preferred_theme: Theme::Dark,
        ..ctx.config()
    };
    let mut shop = Storefront::open(config);
    assert_eq!(shop.theme(), Theme::Dark);

    shop.set_theme(Theme::Light);
    assert_eq!(ctx.open().theme(), Theme::Light);
}

#[test]
fn test_theme_and_cart_keys_are_independent() {
    let ctx = TestContext::new();
    let mut shop = ctx.open();
    shop.add_product("iphone-se", None, None).unwrap();
    shop.toggle_theme();
    shop.clear_cart();

    let reopened = ctx.open();
    assert_eq!(reopened.theme(), Theme::Dark);
    assert!(reopened.cart_items().is_empty());
}
