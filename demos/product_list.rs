//! # Example: product_list
//!
//! A product list opened on a deep link, with a sibling detail view sharing the
//! selection.
//!
//! Demonstrates how to:
//! - Wire a [`CatalogFn`], a [`RouteChannel`] and a [`SelectionHub`] into a [`Control`].
//! - Render [`Control::views`] while sources and the peer change the selection.
//! - Shut down with a [`CancellationToken`] and wait for [`Control::stopped`].
//!
//! ## Flow
//! ```text
//! start ─► pageTitle("Products")
//!       ─► route "2"            ─► selectedProductId(2)
//!       ─► catalog (300ms)      ─► products([...])
//!       ─► peer picks 3         ─► selectedProductId(3) ─► route "3"
//!       ─► manual select 1      ─► selectedProductId(1) ─► route "1", peer 1
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=listvisor=debug cargo run --example product_list
//! ```

use std::{sync::Arc, time::Duration};

use futures::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use listvisor::{
    CatalogFn, Control, ControlConfig, FetchError, Product, ProductId, ProductListView,
    RouteChannel, SelectionHub,
};

fn render(view: &ProductListView) {
    println!("== {} ==", view.page_title);
    if !view.error.is_empty() {
        println!("  ! {}", view.error);
    }
    for p in &view.products {
        let marker = if p.is_active { '>' } else { ' ' };
        println!("{marker} #{} {} ({})", p.id, p.name, p.category);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let route = Arc::new(RouteChannel::deep_link(ProductId::new(2)));
    let hub = SelectionHub::new();
    let detail_view = hub.handle();

    let catalog = CatalogFn::arc(|| async {
        tokio::time::sleep(Duration::from_millis(300)).await;
        Ok::<_, FetchError>(vec![
            Product::new(1, "Widget", "Tools"),
            Product::new(2, "Gadget", "Tools"),
            Product::new(3, "Doohickey", "Garden"),
        ])
    });

    let control = Control::builder(ControlConfig::default())
        .with_catalog(catalog)
        .with_route(route.clone())
        .with_navigator(route.clone())
        .with_selection(Arc::new(hub.handle()))
        .build();

    let token = CancellationToken::new();
    control.start(token.clone())?;

    let mut views = control.views();
    let printer = tokio::spawn(async move {
        while let Some(view) = views.next().await {
            render(&view);
        }
    });

    tokio::time::sleep(Duration::from_millis(500)).await;
    println!("[detail view] picks #3");
    detail_view.publish(Some(ProductId::new(3)));

    tokio::time::sleep(Duration::from_millis(200)).await;
    println!("[user] clicks #1");
    control.select_product(1)?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => println!("interrupted"),
        _ = tokio::time::sleep(Duration::from_millis(300)) => {}
    }

    token.cancel();
    control.stopped().await?;
    printer.abort();

    println!(
        "route={:?} shared={:?} final={:?}",
        route.current(),
        hub.current(),
        control.state().selected_product_id
    );
    Ok(())
}
