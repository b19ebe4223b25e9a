//! edit-replay: drive an edit window headlessly from a key script and print
//! the resulting state.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{CollectingNotifier, EditWindow, SharedText, WrapMode};
use core_config::load_from;
use core_search::Finder;
use core_state::{Clipboard, EditBuffer, TextBuffer, normalize_line_endings};
use std::cell::RefCell;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Once;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

mod script;

const LOG_FILE: &str = "edit-replay.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "edit-replay", version, about = "Replay keys against an edit window")]
struct Args {
    /// Text file to load. It is never written back.
    path: PathBuf,
    /// Key script, e.g. `C-End "text" S-Left C-x`.
    #[arg(long)]
    keys: String,
    #[arg(long, default_value_t = 80)]
    width: usize,
    #[arg(long, default_value_t = 24)]
    height: usize,
    /// Soft-wrap long lines (overrides the config file).
    #[arg(long)]
    wrap: bool,
    /// Configuration file path (overrides discovery of `edit-window.toml`).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory for `edit-replay.log`.
    #[arg(long, default_value = ".")]
    log_dir: PathBuf,
}

fn configure_logging(log_dir: &Path) -> Option<WorkerGuard> {
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn load_buffer(path: &Path) -> Result<EditBuffer> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let norm = normalize_line_endings(&content);
    if norm.mixed {
        warn!(target: "io", "mixed_line_endings_detected");
    }
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("file");
    debug!(target: "io", file = %path.display(), size_bytes = content.len(), ending = ?norm.original, "file_read_ok");
    Ok(EditBuffer::from_str(name, &norm.normalized))
}

/// Everything printed after a replay.
struct Replay {
    window: EditWindow,
    buffer: Rc<RefCell<EditBuffer>>,
    notes: CollectingNotifier,
    unbound: usize,
}

fn replay(args: &Args) -> Result<Replay> {
    let config = load_from(args.config.clone())?;
    let mut params = config.view_parameters();
    if args.wrap {
        params.wrap_mode = WrapMode::Soft;
    }
    let keys = script::parse_script(&args.keys)?;

    let buffer = Rc::new(RefCell::new(load_buffer(&args.path)?));
    let text: SharedText = buffer.clone();
    let finder = Rc::new(RefCell::new(Finder::default()));
    let mut window = EditWindow::with_parameters(text, Clipboard::new(), finder, &params);
    let notes = CollectingNotifier::new();
    window.set_notifier(Box::new(notes.clone()));
    window.resize(args.height, args.width);

    let mut unbound = 0;
    for key in &keys {
        if !window.process_key(key) {
            unbound += 1;
        }
    }
    info!(target: "runtime", keys = keys.len(), unbound, "replay_complete");
    Ok(Replay {
        window,
        buffer,
        notes,
        unbound,
    })
}

fn summary(replay: &Replay) -> String {
    let window = &replay.window;
    let viewport = window.viewport();
    let top = viewport.adapter().top();
    let cursor = window.cursor();
    let selection = window.selection();
    let mut out = String::new();
    let _ = writeln!(out, "status: {}", window.status());
    let _ = writeln!(out, "cursor: {}:{}", cursor.line, cursor.byte);
    let _ = writeln!(
        out,
        "view: top {}:{} left {} size {}x{} wrap {:?}",
        top.line,
        top.sub_line,
        viewport.adapter().left_col(),
        viewport.width(),
        viewport.height(),
        viewport.wrap_mode()
    );
    if selection.is_active() {
        let (start, end) = selection.ordered();
        let _ = writeln!(
            out,
            "selection: {:?} {}:{}-{}:{}",
            selection.mode, start.line, start.byte, end.line, end.byte
        );
    } else {
        let _ = writeln!(out, "selection: none");
    }
    let notes: Vec<String> = replay
        .notes
        .seen()
        .iter()
        .map(|n| format!("{n:?}"))
        .collect();
    let _ = writeln!(out, "notifications: [{}]", notes.join(", "));
    let _ = writeln!(out, "unbound keys: {}", replay.unbound);
    let buffer = replay.buffer.borrow();
    let _ = writeln!(out, "lines: {}", buffer.line_count());
    let _ = writeln!(out, "---");
    out.push_str(&buffer.text());
    out.push('\n');
    out
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging(&args.log_dir);
    install_panic_hook();
    info!(target: "runtime", path = %args.path.display(), "startup");
    let replay = replay(&args)?;
    print!("{}", summary(&replay));
    Ok(())
}
