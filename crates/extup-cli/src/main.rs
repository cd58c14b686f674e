use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use extup_core::{ExtensionKey, ExtensionKind};
use extup_store::{default_user_state_dir, FileLedgerStore, StateLayout};

mod render;

use render::{current_output_style, render_heading, render_version_line, OutputStyle};

#[derive(Parser, Debug)]
#[command(name = "extup")]
#[command(about = "Inspect the extension upgrade-routine ledger", long_about = None)]
struct Cli {
    /// State directory holding the ledger (defaults to the per-user one).
    #[arg(long)]
    state_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every extension with recorded upgrade routines.
    List,
    /// Show the applied routines for one extension.
    Status {
        /// Extension kind: plugin or theme.
        #[arg(long)]
        kind: String,
        /// Extension id (a plugin file path or a theme slug).
        #[arg(long)]
        id: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let root = match cli.state_dir {
        Some(dir) => dir,
        None => default_user_state_dir()?,
    };
    let store = FileLedgerStore::open(StateLayout::new(root))?;
    let style = current_output_style();

    match cli.command {
        Commands::List => {
            for line in format_list_lines(&store)? {
                println!("{line}");
            }
        }
        Commands::Status { kind, id } => {
            let kind = ExtensionKind::parse(&kind)?;
            let key = ExtensionKey::new(kind, id);
            for line in format_status_lines(&store, &key, style)? {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn format_list_lines(store: &FileLedgerStore) -> Result<Vec<String>> {
    let document = store.snapshot()?;
    let mut lines = Vec::new();
    for (kind, by_id) in &document {
        for (id, applied) in by_id {
            lines.push(format!("{kind} {id} ({} applied)", applied.len()));
        }
    }
    if lines.is_empty() {
        lines.push("No recorded upgrade routines".to_string());
    }
    Ok(lines)
}

fn format_status_lines(
    store: &FileLedgerStore,
    key: &ExtensionKey,
    style: OutputStyle,
) -> Result<Vec<String>> {
    use extup_core::LedgerStore;

    let applied = store.get(key)?;
    if applied.is_empty() {
        return Ok(vec![format!("No recorded upgrade routines for {key}")]);
    }

    let mut lines = vec![render_heading(style, &key.to_string())];
    for (version, routines) in applied.by_version() {
        lines.push(render_version_line(style, version.as_str(), routines.len()));
        for routine in routines {
            lines.push(format!("    - {routine}"));
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests;
