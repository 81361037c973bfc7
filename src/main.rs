use std::sync::Arc;

use chrono::{Duration, Local};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use agromarket_client::config::MarketConfig;
use agromarket_client::domain::cart::CartReconciler;
use agromarket_client::domain::checkout::CheckoutComposer;
use agromarket_client::domain::delivery::{LocationInput, LocationResolver};
use agromarket_client::error::MarketError;
use agromarket_client::models::ProductRecord;
use agromarket_client::notify::BadgeSink;
use agromarket_client::remote::{
    CatalogService, MarketApi, NominatimGeocoder, UnsupportedLocator,
};

/// Badge sink that logs the counts a UI shell would render.
struct LogBadges;

impl BadgeSink for LogBadges {
    fn set_cart_count(&self, count: u32) {
        tracing::info!(count, "cart badge");
    }

    fn set_order_count(&self, count: usize) {
        tracing::info!(count, "order badge");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,agromarket_client=debug")),
        )
        .init();

    tracing::info!("🛒 Starting AgroMarket cart & checkout demo");

    // === 1. Configuration and remote collaborators ===
    let config = MarketConfig::from_env();
    tracing::info!(api = %config.api_base_url, geocoder = %config.geocoder_base_url, "configured");

    let api = Arc::new(MarketApi::new(&config)?);
    let geocoder = Arc::new(NominatimGeocoder::new(&config)?);
    let badges: Arc<dyn BadgeSink> = Arc::new(LogBadges);

    // === 2. Wire the core ===
    let cart = Arc::new(CartReconciler::new(
        api.clone(),
        badges.clone(),
        config.undo_window,
    ));
    let location = Arc::new(LocationResolver::new(
        geocoder,
        Arc::new(UnsupportedLocator),
    ));
    let checkout = CheckoutComposer::new(
        cart.clone(),
        location.clone(),
        api.clone(),
        badges.clone(),
    );

    // === 3. Pick something in stock from the catalog ===
    let products = api.list_products().await?;
    tracing::info!(count = products.len(), "catalog loaded");
    let Some(product) = products.iter().find(|p| p.stock >= 2) else {
        anyhow::bail!("no product with enough stock to demo with");
    };
    tracing::info!(product = %product.name, price = product.price, stock = product.stock, "selected demo product");

    run_demo(&cart, &location, &checkout, product).await?;

    Ok(())
}

/// The scripted storefront flow: cart lifecycle, delivery details, order.
/// Each step's module error funnels through [`MarketError`].
async fn run_demo(
    cart: &CartReconciler,
    location: &LocationResolver,
    checkout: &CheckoutComposer,
    product: &ProductRecord,
) -> Result<(), MarketError> {
    // === 4. Cart lifecycle: add, grow, remove, undo ===
    cart.refresh().await?;
    cart.add_item(product.id, 1, product.stock).await?;
    cart.set_quantity(product.id, 2).await?;
    tracing::info!(total = %cart.snapshot().await.total_display(), "cart total after update");

    cart.remove_item(product.id).await?;
    tracing::info!(empty = cart.snapshot().await.is_empty(), "after removal");
    cart.undo_removal().await?;
    tracing::info!(total = %cart.snapshot().await.total_display(), "after undo");

    // === 5. Delivery details ===
    let target = location
        .resolve(LocationInput::Search {
            query: "Red Square, Moscow".to_string(),
        })
        .await?;
    tracing::info!(address = %target.display_address, "delivery address resolved");

    checkout
        .set_date(Local::now().date_naive() + Duration::days(1))
        .await?;
    checkout.select_slot(1).await?;

    // === 6. Place the order ===
    let order = checkout.submit().await?;
    tracing::info!(order_id = order.id, "🎉 order placed");

    Ok(())
}
