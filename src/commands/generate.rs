//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::new_debouncer;
use notify_debouncer_mini::notify::RecursiveMode;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::Site;

/// Generate the static site
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let docs = ContentLoader::new(&site.content_dir).load_all()?;
    tracing::info!("Loaded {} document(s)", docs.len());

    let report = Generator::new(site).generate(&docs)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} page(s) in {:.2}s ({} draft(s) skipped, {} warning(s))",
        report.pages,
        duration.as_secs_f64(),
        report.skipped_drafts,
        report.warnings
    );

    Ok(())
}

/// Watch content and config for changes and regenerate
pub async fn watch(site: &Site) -> Result<()> {
    tracing::info!("Watching for changes. Press Ctrl+C to stop.");
    let site = site.clone();
    tokio::task::spawn_blocking(move || watch_blocking(&site, || {})).await?
}

/// Block on file events, regenerating after each debounced batch.
///
/// `on_success` runs after every rebuild that succeeded.
pub(crate) fn watch_blocking<F: Fn()>(site: &Site, on_success: F) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if site.content_dir.exists() {
        debouncer
            .watcher()
            .watch(&site.content_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", site.content_dir);
    }
    let config_path = site.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    for result in rx {
        match result {
            Ok(events) => {
                let changed: Vec<_> = events
                    .iter()
                    .filter(|e| !is_scratch_file(&e.path))
                    .collect();
                if changed.is_empty() {
                    continue;
                }
                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }

                // Config edits apply without a restart
                match Site::new(&site.base_dir).and_then(|site| run(&site)) {
                    Ok(()) => on_success(),
                    Err(e) => tracing::error!("Generation failed: {}", e),
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

/// Editor swap files and dotfiles
fn is_scratch_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.starts_with('.') || name.ends_with('~') || name.ends_with(".swp")
}
