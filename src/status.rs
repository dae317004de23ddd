// System status display — shows the active guidelines and recent decisions.

use std::sync::Arc;

use anyhow::Result;

use crate::audit::ModerationLog;
use crate::guidelines::GuidelineStore;

/// Display system status to the terminal.
pub async fn show(
    store: &GuidelineStore,
    log: &Arc<dyn ModerationLog>,
    log_display_path: &str,
) -> Result<()> {
    // Guideline counts per content type
    let set = store.snapshot().await;
    if store.path().exists() {
        println!("Guidelines: {}", store.path().display());
    } else {
        println!("Guidelines: {} (not yet written)", store.path().display());
        println!("  Run `pumice guidelines set <file>` to configure them");
    }
    println!("  text:  {} banned phrases", set.text.len());
    println!("  image: {} banned phrases", set.image.len());
    println!("  video: {} banned phrases", set.video.len());

    // Moderation log file size
    let file_size = std::fs::metadata(log_display_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "empty".to_string());
    println!("Moderation log: {} ({})", log_display_path, file_size);

    // Recent decisions
    let recent = log.recent(5).await?;
    if recent.is_empty() {
        println!("Recent decisions: none yet");
        println!("  Run `pumice moderate <file>` or start the server with `pumice serve`");
    } else {
        println!("Recent decisions: {} most recent:", recent.len());
        for line in &recent {
            println!("  {line}");
        }
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
