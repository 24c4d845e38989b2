//! Command implementations

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::adapters::toml_config::SelectionConfig;
use crate::app::{AppContainer, SaveClipRequest};
use crate::cli::args::{ListArgs, ProbeArgs, RemoveArgs, SaveArgs, ShowArgs, WindowArgs};
use crate::domain::model::{Clip, ClipId, TrimProgress, TrimRange};
use crate::domain::selection::SelectionWindow;
use crate::error::{DiaryError, DiaryResult};
use crate::utils::time::{format_clock, parse_seconds};

fn print_clip_line(clip: &Clip) {
    println!(
        "{}\t{}\t{:.2}s\t{}",
        clip.id,
        clip.name,
        clip.duration_seconds,
        clip.created_at.format("%Y-%m-%d %H:%M")
    );
}

fn parse_time(value: &str) -> DiaryResult<f64> {
    parse_seconds(value).ok_or_else(|| DiaryError::InvalidTime {
        value: value.to_string(),
    })
}

/// Execute the list command
pub async fn list(container: &dyn AppContainer, args: ListArgs) -> DiaryResult<()> {
    let clips = match container.catalog().list_all().await {
        Ok(clips) => clips,
        Err(e) if e.is_storage() => {
            warn!(error = %e, "Catalog unreadable, showing it as empty");
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&clips)?);
        return Ok(());
    }

    if clips.is_empty() {
        println!("No clips saved yet");
    }
    for clip in &clips {
        print_clip_line(clip);
    }
    Ok(())
}

/// Execute the show command
pub async fn show(container: &dyn AppContainer, args: ShowArgs) -> DiaryResult<()> {
    let id = ClipId::new(args.id);
    let Some(clip) = container.catalog().get(&id).await? else {
        println!("No clip with id {}", id);
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&clip)?);
        return Ok(());
    }

    println!("Name:        {}", clip.name);
    println!("Description: {}", clip.description);
    println!("Duration:    {} ({:.2}s)", format_clock(clip.duration_seconds), clip.duration_seconds);
    println!("Created:     {}", clip.created_at.to_rfc3339());
    println!("Video:       {}", clip.video_uri);
    if let Some(asset_id) = &clip.asset_id {
        println!("Asset:       {}", asset_id);
    }
    Ok(())
}

/// Execute the probe command
pub async fn probe(container: &dyn AppContainer, args: ProbeArgs) -> DiaryResult<()> {
    let duration = container.processing().probe_duration(&args.input).await?;
    println!("{:.2}\t{}", duration, format_clock(duration));
    Ok(())
}

/// Execute the save command
pub async fn save(container: &dyn AppContainer, args: SaveArgs) -> DiaryResult<()> {
    let range = TrimRange::new(parse_time(&args.start)?, parse_time(&args.end)?)?;
    let request = SaveClipRequest {
        source_uri: args.input,
        range,
        name: args.name,
        description: args.description,
    };

    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel::<TrimProgress>();
    let reporter = tokio::spawn(async move {
        let mut last_reported = -10.0;
        while let Some(progress) = progress_rx.recv().await {
            if progress.percent - last_reported >= 10.0 || progress.percent >= 100.0 {
                info!("Trim progress: {:.0}%", progress.percent);
                last_reported = progress.percent;
            }
        }
    });

    let result = container
        .save_interactor()
        .execute(request, Some(progress_tx))
        .await;
    // The sender is gone once execute returns, so the reporter drains and exits
    let _ = reporter.await;

    let saved = result?;
    println!("Saved clip {} -> {}", saved.id, saved.video_uri);
    Ok(())
}

/// Execute the remove command
pub async fn remove(container: &dyn AppContainer, args: RemoveArgs) -> DiaryResult<()> {
    let id = ClipId::new(args.id);
    let outcome = container.remove_interactor().execute(&id).await?;

    if !outcome.removed {
        println!("No clip with id {}", id);
        return Ok(());
    }

    println!("Removed clip {}", id);
    if let Some(e) = outcome.media_error {
        println!("Media asset was not deleted: {}", e);
    }
    Ok(())
}

/// Execute the window command
pub fn window(args: WindowArgs, defaults: &SelectionConfig) -> DiaryResult<()> {
    let track_width = args.track_width.unwrap_or(defaults.track_width);
    let max = args.max.unwrap_or(defaults.max_window_seconds);

    let mut selection = SelectionWindow::new(track_width, args.duration, max)
        .with_observer(Box::new(|range| {
            println!(
                "drag settled: {:.2}s - {:.2}s",
                range.start_seconds, range.end_seconds
            );
        }));

    for delta in &args.drag {
        selection.begin_drag();
        selection.update_drag(*delta);
        selection.end_drag();
    }

    println!(
        "window: {:.2}px - {:.2}px of {:.2}px",
        selection.start_pixel(),
        selection.end_pixel(),
        selection.track_width()
    );
    println!(
        "start: {:.2}s ({})",
        selection.start_seconds(),
        format_clock(selection.start_seconds())
    );
    println!(
        "end: {:.2}s ({})",
        selection.end_seconds(),
        format_clock(selection.end_seconds())
    );
    Ok(())
}
