//! floorboard host — wires a line-based event surface to the editor engine.
//!
//! The host owns nothing but translation: stdin commands become engine
//! calls, and the engine's actions become synchronizer calls and redraw
//! output. All editing semantics live in the library. Stdin is drained on a
//! dedicated thread so the runtime stays free to fire debounce timers while
//! the user is idle.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tracing::{error, info};

use floorboard::api::RoomsApi;
use floorboard::consts::{COLOR_PALETTE, SAVE_DEBOUNCE_MS};
use floorboard::engine::{Action, EditorCore, EngineConfig, ResizeClampPolicy};
use floorboard::geom::Point;
use floorboard::input::Button;
use floorboard::render;
use floorboard::sync::{ConfirmPrompt, SharedEditor, SyncConfig, Synchronizer, env_parse};

const DEFAULT_API_URL: &str = "http://localhost:8080/api/rooms";

/// Answer already collected from the user on the host surface.
struct PresetAnswer(bool);

impl ConfirmPrompt for PresetAnswer {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt::init();

    let api_url = std::env::var("ROOMS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
    let debounce_ms: u64 = env_parse("SAVE_DEBOUNCE_MS", SAVE_DEBOUNCE_MS);
    let clamp = ResizeClampPolicy::from_config(
        &std::env::var("FLOORBOARD_RESIZE_CLAMP").unwrap_or_default(),
    );

    let api = match RoomsApi::new(api_url.clone()) {
        Ok(api) => api,
        Err(e) => {
            error!(error = %e, "failed to build remote store client");
            return;
        }
    };
    let editor: SharedEditor = Arc::new(RwLock::new(EditorCore::with_config(EngineConfig {
        resize_clamp: clamp,
    })));
    let mut sync = Synchronizer::new(
        api,
        Arc::clone(&editor),
        SyncConfig { debounce: Duration::from_millis(debounce_ms) },
    );

    info!(%api_url, debounce_ms, ?clamp, "floorboard starting");
    if let Err(e) = sync.reload_all().await {
        error!(error = %e, "initial load failed; starting empty");
    }

    print_help();
    let mut lines = spawn_stdin_reader();
    while let Some(line) = lines.recv().await {
        if handle_command(line.trim(), &editor, &mut sync, &mut lines).await {
            break;
        }
    }
}

/// Drain stdin on a dedicated thread so the async loop never blocks on it.
fn spawn_stdin_reader() -> UnboundedReceiver<String> {
    let (tx, rx) = unbounded_channel();
    std::thread::spawn(move || {
        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    if tx.send(line.trim_end().to_owned()).is_err() {
                        break;
                    }
                }
            }
        }
    });
    rx
}

/// Execute one command line. Returns true when the host should quit.
async fn handle_command(
    line: &str,
    editor: &SharedEditor,
    sync: &mut Synchronizer,
    lines: &mut UnboundedReceiver<String>,
) -> bool {
    let mut parts = line.split_whitespace();
    let Some(cmd) = parts.next() else {
        return false;
    };
    match cmd {
        "quit" | "exit" => return true,
        "help" => print_help(),
        "add" => match sync.create_room().await {
            Ok(id) => println!("created {id}"),
            Err(e) => error!(error = %e, "create failed"),
        },
        "del" => {
            let selected = editor.read().await.selection().cloned();
            match selected {
                Some(id) => match sync.delete_room(&id).await {
                    Ok(()) => println!("deleted {id}"),
                    Err(e) => error!(error = %e, room = %id, "delete failed"),
                },
                None => println!("nothing selected"),
            }
        }
        "clear" => {
            let confirmed = ask(lines, "Clear all rooms? [y/N] ").await;
            match sync.clear_all(&PresetAnswer(confirmed)).await {
                Ok(true) => println!("cleared"),
                Ok(false) => println!("aborted"),
                Err(e) => error!(error = %e, "clear failed"),
            }
        }
        "reload" => match sync.reload_all().await {
            Ok(()) => println!("reloaded {} rooms", editor.read().await.store.len()),
            Err(e) => error!(error = %e, "reload failed"),
        },
        "rooms" => {
            let core = editor.read().await;
            for room in core.store.rooms() {
                let id = room.id.as_ref().map_or("-", floorboard::room::RoomId::as_str);
                println!(
                    "{id}  ({}, {}) {}x{}  {:?} {}",
                    room.x, room.y, room.w, room.h, room.label, room.color
                );
            }
        }
        "render" => {
            let core = editor.read().await;
            for command in render::render(core.store.rooms(), core.selection()) {
                println!("{command:?}");
            }
        }
        "down" => {
            if let Some(pt) = parse_point(parts.next(), parts.next()) {
                let actions = editor.write().await.on_pointer_down(pt, Button::Primary);
                dispatch(actions, editor, sync).await;
            } else {
                println!("usage: down <x> <y>");
            }
        }
        "move" => {
            if let Some(pt) = parse_point(parts.next(), parts.next()) {
                let actions = editor.write().await.on_pointer_move(pt);
                dispatch(actions, editor, sync).await;
            } else {
                println!("usage: move <x> <y>");
            }
        }
        "up" => {
            let actions = editor.write().await.on_pointer_up();
            dispatch(actions, editor, sync).await;
        }
        "rclick" => {
            if let Some(pt) = parse_point(parts.next(), parts.next()) {
                let actions = editor.write().await.on_context_menu(pt);
                dispatch(actions, editor, sync).await;
            } else {
                println!("usage: rclick <x> <y>");
            }
        }
        "rename" => {
            let label = line.strip_prefix("rename").unwrap_or_default().trim();
            let target = editor.read().await.menu().map(|m| m.target.clone());
            match target {
                Some(id) => {
                    let actions = editor.write().await.rename(&id, label);
                    dispatch(actions, editor, sync).await;
                }
                None => println!("no menu open (rclick a room first)"),
            }
        }
        "color" => {
            let Some(name) = parts.next() else {
                for (name, value) in COLOR_PALETTE {
                    println!("{name}: {value}");
                }
                return false;
            };
            let value = COLOR_PALETTE
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
                .map_or(name, |(_, v)| v);
            let target = editor.read().await.menu().map(|m| m.target.clone());
            match target {
                Some(id) => {
                    let actions = editor.write().await.recolor(&id, value);
                    dispatch(actions, editor, sync).await;
                }
                None => println!("no menu open (rclick a room first)"),
            }
        }
        other => println!("unknown command {other:?} (try 'help')"),
    }
    false
}

/// Prompt on stdout and read the answer from the line stream.
async fn ask(lines: &mut UnboundedReceiver<String>, prompt: &str) -> bool {
    print!("{prompt}");
    if io::stdout().flush().is_err() {
        return false;
    }
    matches!(
        lines.recv().await.as_deref().map(str::trim),
        Some("y" | "Y" | "yes")
    )
}

/// Forward engine actions: edits go to the synchronizer, redraws re-run the
/// renderer, cursor changes are echoed.
async fn dispatch(actions: Vec<Action>, editor: &SharedEditor, sync: &mut Synchronizer) {
    for action in actions {
        match action {
            Action::RoomEdited(id) => sync.schedule_save(&id),
            Action::SetCursor(cursor) => println!("cursor: {cursor:?}"),
            Action::RenderNeeded => {
                let core = editor.read().await;
                let commands = render::render(core.store.rooms(), core.selection());
                println!("redraw: {} commands", commands.len());
            }
        }
    }
}

fn parse_point(x: Option<&str>, y: Option<&str>) -> Option<Point> {
    Some(Point::new(parse_f64(x)?, parse_f64(y)?))
}

fn parse_f64(token: Option<&str>) -> Option<f64> {
    match token?.parse() {
        Ok(v) => Some(v),
        Err(_) => None,
    }
}

fn print_help() {
    println!("commands:");
    println!("  add | del | clear | reload | rooms | render");
    println!("  down <x> <y> | move <x> <y> | up | rclick <x> <y>");
    println!("  rename <label> | color [name|#hex] | help | quit");
}
