//! hotchat - standalone driver.
//!
//! Loads a TOML config, binds its messages to an in-memory trigger host and
//! fires them from commands read on stdin.

use hotchat::config::Config;
use hotchat::plugin::{Activate, ChatSpam};
use hotchat::trigger::{EntryId, MemoryHost};
use std::io::{self, BufRead, Write};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// One line of stdin input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    /// Fire the message at this position.
    Fire(usize),
    /// Fire every message bound to this key.
    Key(String),
    Say,
    Reload,
    List,
    Save,
    Quit,
    Blank,
}

impl Input {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "" => Self::Blank,
            "say" => Self::Say,
            "reload" => Self::Reload,
            "list" => Self::List,
            "save" => Self::Save,
            "quit" | "exit" => Self::Quit,
            _ => match line.parse() {
                Ok(position) => Self::Fire(position),
                Err(_) => Self::Key(line.to_string()),
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "hotchat.toml".to_string());

    let config = Config::load_validated(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        messages = config.settings.messages.len(),
        "Starting hotchat"
    );

    let mut plugin = ChatSpam::new(&config, MemoryHost::from_slots(&config.hotkeys))?;
    plugin.on_settings_changed(&config.settings);

    let result = run(&mut plugin, &config_path);
    plugin.on_unload();
    result
}

fn run(plugin: &mut ChatSpam<MemoryHost>, config_path: &str) -> anyhow::Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        match Input::parse(&line?) {
            Input::Blank => {}
            Input::Quit => break,
            Input::Fire(position) => match plugin.registry().entry_at(position).map(|e| e.id()) {
                Some(id) => fire(plugin, id),
                None => warn!(position, "no message at that position"),
            },
            Input::Key(key) => {
                let entries = plugin.host().entries_for_key(&key);
                if entries.is_empty() {
                    warn!(%key, "unknown command or unbound key");
                }
                for id in entries {
                    fire(plugin, id);
                }
            }
            Input::Say => plugin.send_chat_text(),
            Input::Reload => match Config::load_validated(config_path) {
                Ok(config) => plugin.on_settings_changed(&config.settings),
                Err(e) => error!(path = %config_path, error = %e, "Reload failed"),
            },
            Input::List => list(plugin)?,
            Input::Save => {
                plugin.on_save();
                let mut table = toml::map::Map::new();
                table.insert(
                    "hotkeys".to_string(),
                    toml::Value::try_from(plugin.host().export_slots())?,
                );
                print!("{}", toml::to_string(&table)?);
                io::stdout().flush()?;
            }
        }
    }
    Ok(())
}

/// Press and release, the way a host reports a key stroke.
fn fire(plugin: &mut ChatSpam<MemoryHost>, id: EntryId) {
    plugin.on_activate(id, true);
    plugin.on_activate(id, false);
}

fn list(plugin: &ChatSpam<MemoryHost>) -> io::Result<()> {
    let mut out = io::stdout().lock();
    for entry in plugin.registry().entries() {
        let key = entry
            .binding()
            .and_then(|binding| plugin.host().key_of(binding))
            .filter(|key| !key.is_unassigned())
            .map_or("-", |key| key.0.as_str());
        writeln!(out, "{:>3}  {:<16} {}", entry.position(), key, entry.text())?;
    }
    out.flush()
}
