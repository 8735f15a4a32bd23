use specwatch_core::{TimerSnapshot, load_recording};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::context::{CliContext, SessionHandle};
use crate::dir_watcher;

/// How often the announcer re-samples the session for phase changes.
const ANNOUNCE_INTERVAL: Duration = Duration::from_millis(600);

pub async fn load(path: &str, ctx: &CliContext) {
    let path = resolve_recording_path(path, ctx).await;

    // Stop any tasks still tied to the previous recording
    ctx.tasks.lock().await.abort_session_tasks();

    let session = ctx.start_session(path.clone()).await;
    let (reader, summary) = match load_recording(path.clone(), Arc::clone(&session)).await {
        Ok(loaded) => loaded,
        Err(e) => {
            println!("Failed to load {}: {}", path.display(), e);
            ctx.clear_session().await;
            return;
        }
    };

    println!(
        "parsed {} events in {}ms",
        summary.events,
        summary.elapsed.as_millis()
    );

    println!("Beginning recording tail: {}", path.display());
    let tail = tokio::spawn(async move {
        reader.tail_recording().await.ok();
    });

    let announcer = spawn_announcer(ctx, session).await;

    let mut tasks = ctx.tasks.lock().await;
    tasks.tail = Some(tail);
    tasks.announcer = announcer;
}

pub async fn status(ctx: &CliContext) {
    let Some(session) = ctx.session().await else {
        println!("No recording loaded");
        return;
    };

    let (regen_format, surge_format) = {
        let config = ctx.config.read().await;
        (config.regen_format, config.surge_format)
    };

    let guard = session.read().await;
    let state = &guard.state;

    match (state.player(), state.is_logged_in()) {
        (Some(name), true) => println!("Player: {name}"),
        (Some(name), false) => println!("Player: {name} (logged out)"),
        (None, true) => println!("Player: unknown"),
        (None, false) => println!("No session in progress"),
    }

    let Some(now) = state.last_event_at() else {
        println!("No events processed yet");
        return;
    };

    let regen = state.regen();
    let energy = match regen.energy_percent() {
        Some(percent) => format!("{percent}%"),
        None => "?".to_string(),
    };
    if regen.is_energy_full() {
        println!("Spec energy: {energy} (full)");
    } else if state.is_between_waves() {
        println!("Spec energy: {energy}, regen holding");
    } else {
        let lightbearer = if regen.is_lightbearer() {
            " [lightbearer]"
        } else {
            ""
        };
        println!(
            "Spec energy: {energy}, next regen in {}{lightbearer}",
            regen_format.render_regen(regen.display_ticks())
        );
    }

    let surge = state.surge();
    if surge.is_active(now) {
        let holding = if surge.is_paused() { " (holding)" } else { "" };
        println!(
            "Surge cooldown: {}{holding}",
            surge_format.render_surge(surge.remaining(now))
        );
    } else {
        println!("Surge potion: ready");
    }

    if let Some(wave) = state.current_wave() {
        let phase = if state.is_between_waves() {
            "between waves"
        } else {
            "in combat"
        };
        println!("Colosseum: wave {wave} ({phase})");
    } else if state.is_between_waves() {
        println!("Delve: between levels");
    }

    if state.is_inside_theatre() {
        let phase = if state.is_between_rooms() {
            "between rooms"
        } else {
            "room in progress"
        };
        println!("Theatre of Blood: {phase}");
    }
}

pub async fn list(ctx: &CliContext) {
    let index_guard = ctx.recording_index.read().await;
    let index = match &*index_guard {
        Some(idx) => idx,
        None => {
            println!("No recording index available");
            return;
        }
    };

    if index.is_empty() {
        println!("No recordings found");
        return;
    }

    println!("{:<40} Started", "Recording");
    println!("{}", "-".repeat(60));

    for entry in index.entries() {
        let empty_marker = if entry.is_empty { " (empty)" } else { "" };
        println!(
            "{:<40} {}{}",
            entry.display_name(),
            entry.formatted_datetime(),
            empty_marker
        );
    }

    println!("\nTotal: {} recordings", index.len());
}

pub async fn set_directory(new_directory: &str, ctx: &CliContext) {
    let dir = PathBuf::from(&new_directory);
    if !(dir.exists() && dir.is_dir()) {
        println!("Update failed. Invalid directory name given.");
        return;
    }

    {
        let mut config = ctx.config.write().await;
        if new_directory == config.recording_directory {
            println!("Recording directory already configured to {}", new_directory);
            return;
        }

        config.recording_directory = new_directory.to_string();
        if let Err(e) = config.save() {
            println!("Warning: {e}");
        }
    }

    // Everything below refers to the old directory
    ctx.tasks.lock().await.abort_all();
    ctx.clear_session().await;
    *ctx.recording_index.write().await = None;

    if let Some(handle) = dir_watcher::init_watcher(ctx).await {
        ctx.tasks.lock().await.watcher = Some(handle);
    }
}

pub async fn set_format(timer: &str, value: &str, ctx: &CliContext) {
    let format = match value.parse::<specwatch_core::DisplayFormat>() {
        Ok(f) => f,
        Err(e) => {
            println!("{e}");
            return;
        }
    };

    let mut config = ctx.config.write().await;
    match timer {
        "regen" => config.regen_format = format,
        "surge" => config.surge_format = format,
        other => {
            println!("Unknown timer {other:?}, expected regen or surge");
            return;
        }
    }
    if let Err(e) = config.save() {
        println!("Warning: {e}");
    }
    println!("{timer} timer now rendered as {format}");
}

pub async fn show_config(ctx: &CliContext) {
    let config = ctx.config.read().await;
    println!("Recording directory: {}", config.recording_directory);
    println!("Regen format:        {}", config.regen_format);
    println!("Surge format:        {}", config.surge_format);
    println!("Announce changes:    {}", config.announce_transitions);
}

pub fn exit() {
    write!(std::io::stdout(), "quitting...").expect("error exiting");
    std::io::stdout().flush().expect("error flushing stdout");
}

/// Bare filenames resolve against the configured recording directory.
async fn resolve_recording_path(path: &str, ctx: &CliContext) -> PathBuf {
    let given = PathBuf::from(path);
    if given.is_absolute() || given.exists() {
        return given;
    }
    PathBuf::from(&ctx.config.read().await.recording_directory).join(given)
}

/// Poll the session and print phase transitions as they happen.
/// Returns None when announcements are disabled.
async fn spawn_announcer(ctx: &CliContext, session: SessionHandle) -> Option<JoinHandle<()>> {
    if !ctx.config.read().await.announce_transitions {
        return None;
    }

    Some(tokio::spawn(async move {
        let mut previous = session.read().await.state.snapshot();
        loop {
            tokio::time::sleep(ANNOUNCE_INTERVAL).await;
            let current = session.read().await.state.snapshot();
            announce_changes(&previous, &current);
            previous = current;
        }
    }))
}

fn announce_changes(previous: &TimerSnapshot, current: &TimerSnapshot) {
    if current.logged_in != previous.logged_in {
        if current.logged_in {
            println!("Session started");
        } else {
            println!("Session ended, timers reset");
        }
    }

    if current.inside_theatre != previous.inside_theatre {
        if current.inside_theatre {
            println!("Entered the Theatre of Blood");
        } else {
            println!("Left the Theatre of Blood");
        }
    }

    if current.between_waves != previous.between_waves {
        match (current.between_waves, current.current_wave) {
            (true, Some(wave)) => println!("Wave {wave} complete, timers holding"),
            (true, None) => println!("Delve level complete, timers holding"),
            (false, Some(wave)) => println!("Wave {wave} started"),
            (false, None) => println!("Combat resumed"),
        }
    }

    if current.inside_theatre && current.between_rooms != previous.between_rooms {
        if current.between_rooms {
            println!("Room complete, surge cooldown holding");
        } else {
            println!("Room started");
        }
    }

    if current.lightbearer != previous.lightbearer {
        if current.lightbearer {
            println!("Lightbearer equipped, regen cycle halved");
        } else {
            println!("Lightbearer removed");
        }
    }

    if previous.surge_active && !current.surge_active && current.logged_in {
        println!("Surge potion ready");
    }
}
