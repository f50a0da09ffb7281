//! # Navigation collaborator.

use async_trait::async_trait;

use crate::state::ProductId;

/// Changes the addressable URL to the given product.
///
/// Implementations should be idempotent: navigating to the current product must not
/// produce a new route parameter.
#[async_trait]
pub trait Navigator: Send + Sync + 'static {
    async fn navigate_to_product(&self, id: ProductId);
}
