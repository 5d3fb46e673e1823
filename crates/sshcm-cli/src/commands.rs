//! Command implementations

use crate::cli::FieldArgs;
use crate::error::{CliError, Result};
use colored::Colorize;
use sshcm_core::{HostFields, HostRecord, SafeWriter};
use std::io::Write;

pub fn run_print(writer: &SafeWriter) -> Result<()> {
    let doc = writer.read()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    doc.print_to(&mut out, &writer.settings().indent)?;
    out.flush()?;
    Ok(())
}

pub fn run_list(writer: &SafeWriter) -> Result<()> {
    let doc = writer.read()?;
    for name in doc.host_names() {
        println!("{}", name);
    }
    Ok(())
}

pub fn run_export(writer: &SafeWriter) -> Result<()> {
    let doc = writer.read()?;
    println!("{}", serde_json::to_string_pretty(&doc.export())?);
    Ok(())
}

pub fn run_version(writer: &SafeWriter) -> Result<()> {
    let doc = writer.read()?;
    println!("{}", doc.file_version());
    Ok(())
}

pub fn run_add(writer: &SafeWriter, name: &str, args: FieldArgs) -> Result<()> {
    let doc = writer.read()?;
    if doc.find_by_name(name).is_some() {
        return Err(CliError::user(format!("Host '{}' already exists", name)));
    }

    let record = HostRecord::new(apply(HostFields::new(name), args))?;
    let backup = writer.add_host(record)?;
    report("Added", name, &backup);
    Ok(())
}

pub fn run_set(writer: &SafeWriter, name: &str, args: FieldArgs) -> Result<()> {
    let doc = writer.read()?;
    let current = doc
        .find_by_name(name)
        .ok_or_else(|| CliError::user(format!("Host '{}' not found", name)))?;

    let record = HostRecord::new(apply(current.fields(), args))?;
    if record == *current {
        println!("{} {} unchanged", "=".dimmed(), name);
        return Ok(());
    }

    let backup = writer.update_host(current.identity(), record)?;
    report("Updated", name, &backup);
    Ok(())
}

pub fn run_remove(writer: &SafeWriter, name: &str) -> Result<()> {
    let doc = writer.read()?;
    let current = doc
        .find_by_name(name)
        .ok_or_else(|| CliError::user(format!("Host '{}' not found", name)))?;

    let backup = writer.remove_host(current.identity())?;
    report("Removed", name, &backup);
    Ok(())
}

/// Overlay command-line values on existing fields. An empty value clears.
fn apply(mut fields: HostFields, args: FieldArgs) -> HostFields {
    let overlay = |slot: &mut Option<String>, value: Option<String>| {
        if let Some(value) = value {
            *slot = (!value.trim().is_empty()).then_some(value);
        }
    };
    overlay(&mut fields.host_name, args.hostname);
    overlay(&mut fields.port, args.port);
    overlay(&mut fields.user, args.user);
    overlay(&mut fields.identity_file, args.identity_file);
    fields.other_lines.extend(args.lines);
    fields
}

fn report(action: &str, name: &str, backup: &std::path::Path) {
    println!("{} {} {}", "✓".green(), action, name.bold());
    println!("  previous config saved to {}", backup.display());
}
