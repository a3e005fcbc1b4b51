use anyhow::Context;
use searchmap::prelude::*;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::sync::{watch, Mutex};

/// Headless demo: loads a search response and facets, plays a user pan
/// against the manager, and prints what the widget would bind.
///
/// Usage: searchmap-app <results.json> <facets.json> [settings.json]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    searchmap::init_logging();

    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let results_path = args.next().context("missing results file argument")?;
    let facets_path = args.next().context("missing facets file argument")?;
    let settings = match args.next() {
        Some(path) => ManagerSettings::from_path(&path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ManagerSettings::default(),
    };

    let results = parse_results(read_json(&results_path)?);
    let facets: Facets = read_json(&facets_path)?;
    let cooldown = settings.bounds_cooldown();

    let manager = Arc::new(Mutex::new(MapManager::new(settings)));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let driver = tokio::spawn(searchmap::runtime::drive_timers(
        manager.clone(),
        Duration::from_millis(50),
        shutdown_rx,
    ));

    {
        let mut manager = manager.lock().await;
        manager.on("geofilterchanged", |event| {
            if let MapEvent::GeoFilterChanged { filter } = event {
                log::info!("geo filter is now {:?}", filter);
            }
        });
        manager.widget_ready(WidgetCapabilities { drawing: true });
        manager.attach_drawing_manager();
        manager.set_result_markers(&results, None);
        manager.set_facet_markers(&facets);
    }

    // wait out the start-up cool-down, then pan
    tokio::time::sleep(cooldown + Duration::from_millis(100)).await;
    let first_location = manager
        .lock()
        .await
        .get_markers()
        .first()
        .map(|marker| marker.location);
    if let Some(around) = first_location {
        let pan = LatLngBounds::from_coords(
            around.lat - 1.0,
            around.lng - 1.0,
            around.lat + 1.0,
            around.lng + 1.0,
        );
        manager
            .lock()
            .await
            .handle_widget_event(WidgetEvent::ViewportChanged(pan));
    }
    tokio::time::sleep(Duration::from_millis(100)).await;

    {
        let manager = manager.lock().await;
        println!("{}", serde_json::to_string_pretty(manager.config())?);
        for mode in [MarkerMode::Results, MarkerMode::Facets] {
            println!("{} markers:", mode);
            for marker in manager.markers(mode) {
                println!(
                    "  {} ({:.4}, {:.4}) {}",
                    marker.id, marker.location.lat, marker.location.lng, marker.icon
                );
            }
        }
        println!("geo filter: {:?}", manager.watch_bounds());
    }

    shutdown_tx.send(true)?;
    driver.await?;
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
}
