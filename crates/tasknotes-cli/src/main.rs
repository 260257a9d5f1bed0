use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use relative_path::{RelativePath, RelativePathBuf};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tasknotes_config::{ArchiveSettings, Config};
use tasknotes_engine::editing::{Cmd, Document};
use tasknotes_engine::{ArchiveOptions, invariants, io, snapshot};

/// Notes with checklists that file completed tasks away on their own
#[derive(Parser, Debug)]
#[command(name = "tasknotes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Notes folder, instead of the one in the config file
    #[arg(long, global = true, env = "TASKNOTES_DIR")]
    notes_dir: Option<PathBuf>,

    /// Leave ticked tasks where they are
    #[arg(long, global = true)]
    no_archive: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the notes in the notes folder
    List,

    /// Print the outline of a note
    Show {
        /// Note path relative to the notes folder
        note: String,
    },

    /// List the tasks of a note with their positions
    Tasks { note: String },

    /// Tick or untick the task at a position and save the note
    Toggle { note: String, pos: usize },

    /// Report notes whose task structure is broken
    Check {
        /// Only check this note
        note: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let (notes_path, settings) = resolve_settings(&cli)?;
    let options = ArchiveOptions {
        enabled: settings.auto_archive && !cli.no_archive,
        expand_new_section: settings.expand_new_section,
    };
    log::debug!("notes folder {}, {options:?}", notes_path.display());

    let output = run(&cli.command, &notes_path, options)?;
    print!("{output}");
    Ok(())
}

/// Work out the notes folder and archive settings from the command line and
/// the config file.
fn resolve_settings(cli: &Cli) -> Result<(PathBuf, ArchiveSettings)> {
    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) if cli.notes_dir.is_some() => {
            log::warn!("Ignoring config file: {e}");
            None
        }
        Err(e) => return Err(e).context("Failed to load config file"),
    };
    let settings = config
        .as_ref()
        .map(|c| c.archive.clone())
        .unwrap_or_default();

    let (notes_path, source) = match (&cli.notes_dir, config) {
        (Some(dir), _) => (dir.clone(), String::new()),
        (None, Some(config)) => (
            config.notes_path,
            format!(" from config file '{}'", config_path.display()),
        ),
        (None, None) => bail!(
            "No notes folder given and no config file found. Pass --notes-dir or create {}",
            config_path.display()
        ),
    };

    io::validate_notes_dir(&notes_path)
        .with_context(|| format!("Notes path '{}'{source} is invalid", notes_path.display()))?;
    Ok((notes_path, settings))
}

fn run(command: &Command, notes_root: &Path, options: ArchiveOptions) -> Result<String> {
    let mut out = String::new();
    match command {
        Command::List => {
            for note in note_paths(notes_root)? {
                writeln!(out, "{note}")?;
            }
        }
        Command::Show { note } => {
            let tree = io::read_tree(RelativePath::new(note), notes_root)?;
            writeln!(out, "{}", snapshot::outline(&tree))?;
        }
        Command::Tasks { note } => {
            let note = io::read_note(RelativePath::new(note), notes_root)?;
            for task in note.tasks() {
                let mark = if task.checked { "x" } else { " " };
                let place = if task.archived { " (completed)" } else { "" };
                writeln!(out, "{:>5} [{mark}] {}{place}", task.pos, task.text)?;
            }
        }
        Command::Toggle { note: path, pos } => {
            let path = RelativePath::new(path);
            let tree = io::read_tree(path, notes_root)?;
            let mut note = Document::with_archive_options(tree, options)?;
            let patch = note
                .apply(Cmd::ToggleTask { at: *pos })
                .with_context(|| format!("Cannot toggle task at {pos} in {path}"))?;
            io::write_note(path, notes_root, &note)?;
            if patch.replaced {
                log::info!("{path}: tasks were filed after toggling {pos}");
            }
            writeln!(out, "{}", snapshot::outline(note.tree()))?;
        }
        Command::Check { note } => {
            let notes = match note {
                Some(note) => vec![RelativePathBuf::from(note.as_str())],
                None => note_paths(notes_root)?,
            };
            let mut broken = 0;
            for note in notes {
                let tree = io::read_tree(&note, notes_root)?;
                let problems = invariants::violations(&tree);
                if !problems.is_empty() {
                    broken += 1;
                }
                for problem in problems {
                    writeln!(out, "{note}: {problem}")?;
                }
            }
            if broken > 0 {
                bail!("{broken} note(s) with problems:\n{out}");
            }
            writeln!(out, "all notes ok")?;
        }
    }
    Ok(out)
}

fn note_paths(notes_root: &Path) -> Result<Vec<RelativePathBuf>> {
    io::scan_notes(notes_root)?
        .iter()
        .map(|path| -> Result<RelativePathBuf> {
            Ok(RelativePathBuf::from_path(path.strip_prefix(notes_root)?)?)
        })
        .collect()
}
