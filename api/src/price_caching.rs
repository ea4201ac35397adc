//! Handles the caching logic for external price provider data.

use crate::price_map::PriceMap;
use crate::price_providers::{coin_gecko::CoinGecko, PriceProvider};
use crate::ApiError;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{OnceCell, RwLock};

const CACHE_DURATION: Duration = Duration::from_secs(60);

#[derive(Clone, Debug)]
struct CachedPrices {
    price_map: PriceMap,
    last_fetched: Instant,
}

impl CachedPrices {
    fn fresh(&self) -> Option<&PriceMap> {
        (self.last_fetched.elapsed() < CACHE_DURATION).then_some(&self.price_map)
    }
}

/// Retrieves fiat prices, using a lazy, time-based cache.
///
/// The provider is only called when the cache is empty or older than `CACHE_DURATION`.
pub async fn get_cached_fiat_prices() -> Result<PriceMap, ApiError> {
    static CACHE: OnceCell<Arc<RwLock<Option<CachedPrices>>>> = OnceCell::const_new();

    let cache_lock = CACHE
        .get_or_init(|| async { Arc::new(RwLock::new(None)) })
        .await;

    if let Some(prices) = cache_lock.read().await.as_ref().and_then(CachedPrices::fresh) {
        return Ok(prices.clone());
    }

    let mut write_lock = cache_lock.write().await;

    // another task may have refreshed while we waited for the write lock.
    if let Some(prices) = write_lock.as_ref().and_then(CachedPrices::fresh) {
        return Ok(prices.clone());
    }

    let new_price_map = CoinGecko.get_prices().await?;
    dioxus_logger::tracing::debug!("refreshed fiat prices: {:?}", new_price_map);

    *write_lock = Some(CachedPrices {
        price_map: new_price_map.clone(),
        last_fetched: Instant::now(),
    });

    Ok(new_price_map)
}
