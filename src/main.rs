mod analyzer;
mod config;
mod model;
mod normalizer;
mod parser;
mod refresh;
mod source;
mod utils;
mod view;

use analyzer::{Analyzer, OfferAnalyzer};
use config::{load_config, AppConfig, HotelConfig};
use futures::future::join_all;
use model::OfferSnapshot;
use normalizer::normalize_all;
use parser::{OffersJsonParser, Parser};
use refresh::{next_wake, spawn_stdin_listener, RefreshSignals, Wake, HELP};
use source::{HttpOfferSource, OfferSource};
use std::sync::Arc;
use tokio::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use view::{render, HotelView, RETRY_HINT};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    std::panic::set_hook(Box::new(|panic_info| {
        error!("Panic occurred: {}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: Arc<AppConfig> = match load_config(&config_path) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            return;
        }
    };

    let source = match HttpOfferSource::new(&config.api_base_url, config.request_timeout_seconds) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to create offer source: {}", e);
            return;
        }
    };
    let parser = OffersJsonParser::new();
    let analyzer = OfferAnalyzer::new();

    let signals = Arc::new(RefreshSignals::default());
    spawn_stdin_listener(signals.clone());
    println!("{}", HELP);

    loop {
        info!("Refreshing offers for {} hotels...", config.hotels.len());

        let tasks: Vec<_> = config
            .hotels
            .iter()
            .map(|hotel| process_hotel(hotel, &source, &parser, &analyzer, &config))
            .collect();
        let views = join_all(tasks).await;

        let storefront = config.storefront();
        let mut failed = 0;
        for (hotel, view) in config.hotels.iter().zip(&views) {
            if view.is_failed() {
                warn!("Hotel {} has no fresh offers", view.hotel_id());
                failed += 1;
            }
            let share = hotel.share_url(storefront.as_ref());
            println!("{}", render(view, hotel.display_name(), &config.currency, share.as_ref()));
        }
        if failed > 0 {
            warn!("{} of {} hotels failed to load. {}", failed, views.len(), RETRY_HINT);
        }

        let interval = config.refresh_interval_seconds.map(Duration::from_secs);
        match next_wake(&signals, interval).await {
            Wake::Timer => info!("Timer triggered."),
            Wake::Manual => info!("Manual refresh triggered."),
            Wake::Quit => {
                info!("Shutting down.");
                break;
            }
            Wake::InputClosed => {
                info!("No command input and no refresh interval, shutting down.");
                break;
            }
        }
    }
}

/// Fetches, parses and analyzes the offers of one hotel.
/// Every outcome, including failure, ends up as a view state.
async fn process_hotel(
    hotel: &HotelConfig,
    source: &dyn OfferSource,
    parser: &OffersJsonParser,
    analyzer: &OfferAnalyzer,
    config: &AppConfig,
) -> HotelView {
    info!("Processing hotel: {}", hotel.id);

    let body = match source.fetch_offers(&hotel.id).await {
        Ok(body) => body,
        Err(e) => {
            warn!("Fetch failed for hotel {}: {}", hotel.id, e);
            return HotelView::FetchFailed {
                hotel_id: hotel.id.clone(),
                reason: e.to_string(),
            };
        }
    };

    let mut offers = match parser.parse(&body) {
        Ok(o) => o,
        Err(e) => {
            warn!("Parse error for hotel {}: {}", hotel.id, e);
            return HotelView::FetchFailed {
                hotel_id: hotel.id.clone(),
                reason: e.to_string(),
            };
        }
    };

    normalize_all(&mut offers, &config.vendor_aliases);
    let snapshot = OfferSnapshot::new(hotel.id.clone(), offers);
    info!("Hotel {}: {} offers fetched at {}", hotel.id, snapshot.offers.len(), snapshot.fetched_at);

    if snapshot.is_empty() {
        return HotelView::NoOffers {
            hotel_id: hotel.id.clone(),
            filtered: false,
        };
    }

    let comparison = analyzer.compare(&snapshot, &hotel.effective_filter());
    if comparison.is_empty() {
        info!("Hotel {}: all offers filtered out", hotel.id);
        return HotelView::NoOffers {
            hotel_id: hotel.id.clone(),
            filtered: true,
        };
    }

    if let Some(best) = comparison.ranking().next() {
        info!("Hotel {}: best vendor {}", hotel.id, best);
    }
    HotelView::Ready(comparison)
}
