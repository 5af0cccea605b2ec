//! Generate static files

use anyhow::Result;
use notify::{RecursiveMode, Watcher};
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::generator::Generator;
use crate::Folio;

/// Quiet period before a burst of file events triggers a rebuild
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Generate the static site
pub fn run(folio: &Folio) -> Result<()> {
    let start = Instant::now();

    let report = Generator::new(folio)?.generate()?;
    if report.failed > 0 {
        tracing::warn!("{} post(s) could not be generated", report.failed);
    }

    tracing::info!(
        "Generated {} posts and {} pages in {:.2}s",
        report.posts,
        report.pages,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Watch the site sources and regenerate on change
pub async fn watch(folio: &Folio) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        match res {
            Ok(event) => {
                let _ = tx.send(event);
            }
            Err(e) => tracing::warn!("Watch error: {}", e),
        }
    })?;

    for dir in [
        &folio.content_dir,
        &folio.pages_dir,
        &folio.data_dir,
        &folio.static_dir,
    ] {
        if dir.is_dir() {
            watcher.watch(dir, RecursiveMode::Recursive)?;
        } else {
            tracing::debug!("Not watching missing directory {:?}", dir);
        }
    }

    // Watch config file
    let config_path = folio.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(Path::new(&config_path), RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut site = folio.clone();
    while let Some(event) = rx.recv().await {
        tracing::debug!("Change detected: {:?}", event.paths);

        // Drain the rest of the burst
        while let Ok(Some(_)) = tokio::time::timeout(DEBOUNCE, rx.recv()).await {}

        // Pick up config edits before rebuilding
        match Folio::new(&folio.base_dir) {
            Ok(reloaded) => site = reloaded,
            Err(e) => tracing::error!("Keeping previous config: {:#}", e),
        }

        tracing::info!("File changed, regenerating...");
        if let Err(e) = run(&site) {
            tracing::error!("Generation failed: {:#}", e);
        }
    }

    Ok(())
}
