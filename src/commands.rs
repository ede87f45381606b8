use anyhow::Result;
use std::io::Write;

use crate::cli::Command;
use crate::manager::HostManager;
use crate::models::{HostRecord, DEFAULT_PORT};
use crate::transfer;

pub fn execute(command: Command, manager: &HostManager, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Add(args) => {
            let record = manager.add(args.into(), false)?;
            writeln!(out, "  [Adding] {} -> {}", record.host, record.hostname)?;
        }
        Command::Modify(args) => {
            let record = manager.add(args.into(), true)?;
            writeln!(out, "  [Modifying] {} -> {}", record.host, record.hostname)?;
        }
        Command::Delete { host } => {
            manager.delete(&host)?;
            writeln!(out, "  [Deleting] {}", host)?;
        }
        Command::List { json } => {
            let records = manager.list()?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &records)?;
                writeln!(out)?;
            } else {
                for line in format_listing(&records) {
                    writeln!(out, "{}", line)?;
                }
            }
        }
        Command::Empty => {
            manager.clear()?;
            writeln!(out, "  [Emptying] Done.")?;
        }
        Command::Export => {
            for line in transfer::export_lines(&manager.list()?) {
                writeln!(out, "{}", line)?;
            }
        }
        Command::Import { file } => {
            transfer::import_file(manager, &file, |record| {
                writeln!(out, "  [Adding] {} -> {}", record.host, record.hostname)
            })?;
        }
    }

    Ok(())
}

/// Human listing: hosts right-aligned two columns past the longest one.
pub fn format_listing(records: &[HostRecord]) -> Vec<String> {
    let pad = records
        .iter()
        .map(|r| r.host.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = vec![format!("Listing {} config(s):", records.len())];
    for record in records {
        let user = match record.user.as_deref() {
            Some(user) if !user.is_empty() => format!("{}@", user),
            _ => String::new(),
        };
        let port = record
            .port
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PORT);

        lines.push(format!(
            "{:>width$} -> {}{}:{}",
            record.host,
            user,
            record.hostname,
            port,
            width = pad + 2
        ));
    }
    lines
}
