//! `stickynote` command-line view over the core note store.
//!
//! # Responsibility
//! - Resolve configuration and start logging once per process.
//! - Load one `NoteStore`, forward the requested action, render results.

mod config;
mod view;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use config::{CliConfig, ConfigOverrides};
use log::{info, warn};
use std::path::PathBuf;
use std::process::ExitCode;
use stickynote_core::db::open_db;
use stickynote_core::{Draft, NoteColor, NoteStore, SaveOutcome, SqliteSlotRepository};

#[derive(Parser)]
#[command(name = "stickynote")]
#[command(about = "Create, edit, delete and search colored sticky notes", version)]
struct Cli {
    /// Database file (overrides STICKYNOTE_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log directory (overrides STICKYNOTE_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes, newest first
    List {
        /// Case-insensitive filter on title or content
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Add a new note
    Add(NoteFields),
    /// Update an existing note; omitted fields keep their value
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditFields,
    },
    /// Delete a note by id
    Delete { id: String },
    /// Show the color palette
    Colors,
}

#[derive(Args)]
struct NoteFields {
    #[arg(short, long)]
    title: String,
    #[arg(short, long, default_value = "")]
    content: String,
    /// Palette name or hex value
    #[arg(long, value_parser = NoteColor::parse, default_value = "gray")]
    color: NoteColor,
}

#[derive(Args)]
struct EditFields {
    #[arg(short, long)]
    title: Option<String>,
    #[arg(short, long)]
    content: Option<String>,
    #[arg(long, value_parser = NoteColor::parse)]
    color: Option<NoteColor>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    if matches!(cli.command, Commands::Colors) {
        println!("{}", view::render_palette());
        return Ok(ExitCode::SUCCESS);
    }

    let config = CliConfig::resolve(ConfigOverrides {
        db_path: cli.db,
        log_dir: cli.log_dir,
        log_level: cli.log_level,
    })
    .context("failed to resolve configuration")?;

    if let Err(err) = stickynote_core::init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    if let Some(dir) = config.db_dir() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create data directory `{}`", dir.display()))?;
    }
    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let repo = SqliteSlotRepository::try_new(&conn)?;
    let mut store = NoteStore::open(repo);
    info!(
        "event=cli_command module=cli status=start db_path={} notes={}",
        config.db_path.display(),
        store.len()
    );

    match cli.command {
        Commands::List { search } => {
            store.search(search);
            println!(
                "{}",
                view::render_notes(&store.visible_notes(), store.search_term())
            );
        }
        Commands::Add(fields) => {
            let draft = Draft::new(fields.title, fields.content, fields.color);
            return report_save(store.save_draft(draft)?);
        }
        Commands::Edit { id, fields } => {
            let Some(note) = store.find(&id).cloned() else {
                bail!("note not found: {id}");
            };
            store.begin_edit(&note);
            if let Some(title) = fields.title {
                store.set_draft_title(title);
            }
            if let Some(content) = fields.content {
                store.set_draft_content(content);
            }
            if let Some(color) = fields.color {
                store.set_draft_color(color);
            }
            return report_save(store.save()?);
        }
        Commands::Delete { id } => {
            if store.delete(&id)? {
                println!("Note deleted.");
            } else {
                println!("No note with id {id}.");
            }
        }
        Commands::Colors => {}
    }

    Ok(ExitCode::SUCCESS)
}

fn report_save(outcome: SaveOutcome) -> Result<ExitCode> {
    match outcome {
        SaveOutcome::Created(note) => {
            println!("Note added.");
            println!("{}", view::render_note(&note));
        }
        SaveOutcome::Updated(note) => {
            println!("Note updated.");
            println!("{}", view::render_note(&note));
        }
        SaveOutcome::EditTargetMissing(id) => {
            warn!("event=cli_command module=cli status=skip reason=edit_target_missing note_id={id}");
            println!("No note with id {id}; nothing updated.");
            return Ok(ExitCode::FAILURE);
        }
        SaveOutcome::Ignored => {
            eprintln!("Note title cannot be empty.");
            return Ok(ExitCode::FAILURE);
        }
    }
    Ok(ExitCode::SUCCESS)
}
