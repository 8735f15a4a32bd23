use crate::CliContext;
use crate::commands;
use specwatch_core::recordings::{self, RecordingEvent, RecordingWatcher};
use std::path::PathBuf;
use tokio::task::JoinHandle;

/// Initialize the recording index and start the watcher
pub async fn init_watcher(ctx: &CliContext) -> Option<JoinHandle<()>> {
    let dir = {
        let config = ctx.config.read().await;
        PathBuf::from(&config.recording_directory)
    };

    if !dir.exists() {
        println!("Warning: Recording directory {} does not exist", dir.display());
        return None;
    }

    // Build initial index using core
    match recordings::build_index(&dir) {
        Ok((index, newest)) => {
            let file_count = index.len();

            {
                let mut index_guard = ctx.recording_index.write().await;
                *index_guard = Some(index);
            }

            println!("Indexed {} recordings", file_count);

            // Auto-load newest recording if available
            if let Some(newest_path) = newest {
                let path_str = newest_path.to_string_lossy().to_string();
                commands::load(&path_str, ctx).await;
            }
        }
        Err(e) => {
            println!("{}", e);
        }
    }

    // Create watcher
    let mut watcher = match RecordingWatcher::new(&dir) {
        Ok(w) => w,
        Err(e) => {
            println!("Failed to start directory watcher: {}", e);
            return None;
        }
    };

    println!("Watching directory: {}", dir.display());

    // Clone context for the spawned task
    let watcher_ctx = ctx.clone();
    let handle = tokio::spawn(async move {
        while let Some(event) = watcher.next_event().await {
            handle_watcher_event(event, &watcher_ctx).await;
        }
    });

    Some(handle)
}

async fn handle_watcher_event(event: RecordingEvent, ctx: &CliContext) {
    match event {
        RecordingEvent::NewFile(path) => {
            println!("New recording detected: {}", path.display());

            // Add to index
            let is_latest_file = {
                let mut index_guard = ctx.recording_index.write().await;
                if let Some(index) = &mut *index_guard {
                    index.add_file(&path);
                    index.newest_file().map(|f| f.path == path).unwrap_or(false)
                } else {
                    false
                }
            };

            if is_latest_file {
                let path_str = path.to_string_lossy().to_string();
                commands::load(&path_str, ctx).await;
            }
        }

        RecordingEvent::FileModified(path) => {
            // Growth fills in metadata for files indexed while empty
            let mut index_guard = ctx.recording_index.write().await;
            if let Some(index) = &mut *index_guard {
                index.refresh_file(&path);
            }
        }

        RecordingEvent::FileRemoved(path) => {
            let next_file = {
                // Remove from index
                {
                    let mut index_guard = ctx.recording_index.write().await;
                    if let Some(index) = &mut *index_guard {
                        index.remove_file(&path);
                    }
                }

                // Check if removed file was the active recording
                let was_active = {
                    if let Some(session) = ctx.session().await {
                        let s = session.read().await;
                        s.active_file.as_ref().map(|p| p == &path).unwrap_or(false)
                    } else {
                        false
                    }
                };

                if was_active {
                    ctx.tasks.lock().await.abort_session_tasks();
                    ctx.clear_session().await;

                    // Get newest recording to switch to
                    let index_guard = ctx.recording_index.read().await;
                    index_guard
                        .as_ref()
                        .and_then(|idx| idx.newest_file())
                        .map(|f| f.path.clone())
                } else {
                    None
                }
            };

            // Switch to new recording outside of lock
            if let Some(new_path) = next_file {
                println!(
                    "Active recording removed, switching to: {}",
                    new_path.display()
                );
                let path_str = new_path.to_string_lossy().to_string();
                commands::load(&path_str, ctx).await;
            }
        }

        RecordingEvent::Message(msg) => {
            println!("{}", msg);
        }

        RecordingEvent::Error(err) => {
            println!("Error: {}", err);
        }
    }
}
