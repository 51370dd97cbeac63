//! PaperSmith - Main Entry Point
//!
//! Command-line front end for the markdown editing core.

mod cli;

use chrono::Local;
use clap::Parser;
use cli::{CliArgs, Command};
use log::{error, info};
use papersmith::config::{get_config_file_path, load_config, update_config, Settings};
use papersmith::error::{Error, Result};
use papersmith::export::{export_html, resolve_export_path, suggested_filename, PageLayout};
use papersmith::markdown::plan_repairs;
use papersmith::preview::{render_preview, PreviewOptions};
use papersmith::state::{Document, EditorState};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let settings = load_config();

    match run(args.command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Fix { file, in_place } => fix(&file, in_place),
        Command::Preview { file, output } => preview(&file, output.as_deref(), settings),
        Command::Export { file, output, open } => export(&file, output, open, settings),
        Command::Config { path, set } if set.is_empty() => show_config(path, settings),
        Command::Config { set, .. } => change_config(&set),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

fn fix(file: &Path, in_place: bool) -> Result<()> {
    let mut document = Document::open(file)?;
    let plan = plan_repairs(document.content());

    if plan.is_empty() {
        info!("{}: spacing already correct", file.display());
    } else {
        info!("{}: inserting {} blank line(s)", file.display(), plan.len());
        let (text, caret) = plan.apply(document.content(), document.caret());
        document.apply(EditorState::new(text, caret));
    }

    if in_place {
        if document.is_modified() {
            document.save()?;
        }
    } else {
        print!("{}", document.content());
    }
    Ok(())
}

fn preview(file: &Path, output: Option<&Path>, settings: &Settings) -> Result<()> {
    let document = Document::open(file)?;
    let html = render_preview(document.content(), &PreviewOptions::from(settings))?;
    write_or_print(output, &html)
}

fn export(file: &Path, output: Option<PathBuf>, open_after: bool, settings: &Settings) -> Result<()> {
    let document = Document::open(file)?;

    let target = output.unwrap_or_else(|| {
        let name = suggested_filename(
            document.path.as_deref(),
            document.content(),
            "html",
            Local::now().naive_local(),
        );
        resolve_export_path(settings, &name)
    });

    let written = export_html(document.content(), &target, &PageLayout::from(settings))?;
    println!("{}", written.display());

    if open_after {
        open::that(&written).map_err(|e| {
            Error::Application(format!("Failed to open '{}': {}", written.display(), e))
        })?;
    }
    Ok(())
}

fn show_config(path_only: bool, settings: &Settings) -> Result<()> {
    let path = get_config_file_path()?;
    if path_only {
        println!("{}", path.display());
    } else {
        println!("# {}", path.display());
        println!("{}", serde_json::to_string_pretty(settings)?);
    }
    Ok(())
}

fn change_config(assignments: &[String]) -> Result<()> {
    let settings = update_config(assignments)?;
    show_config(false, &settings)
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, content).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        }),
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}
