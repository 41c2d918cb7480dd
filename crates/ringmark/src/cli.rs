//! Command line host for the bookmark commands.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::app::commands::{BookmarkCommands, CursorProvider, Status, StatusLevel};
use crate::domain::model::{Bookmark, Position};
use crate::infra::config::Config;
use crate::infra::picker::{FixedPicker, LinePicker};
use crate::infra::workspace;

#[derive(Debug, Parser)]
#[command(author, version, about = "Project-local bookmarks with ring navigation", long_about = None)]
pub struct Cli {
    /// Workspace root holding the bookmark file. Defaults to the enclosing git work tree.
    #[arg(long, global = true, env = "RINGMARK_WORKSPACE")]
    pub workspace: Option<PathBuf>,
    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Bookmark a position
    Add(PositionArgs),
    /// Bookmark a position, or remove the bookmark already there
    Toggle(PositionArgs),
    /// Print the bookmark after a position, wrapping around
    Next(PositionArgs),
    /// Print the bookmark before a position, wrapping around
    Previous(PositionArgs),
    /// Choose a bookmark and print it
    Goto(PickArgs),
    /// Choose a bookmark and delete it
    Delete(PickArgs),
    /// Delete every bookmark in the workspace
    DeleteAll,
    /// List bookmarks in navigation order
    List {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Zero-based cursor position, as stored in the bookmark file.
#[derive(Debug, Clone, Args)]
pub struct PositionArgs {
    pub file: String,
    pub line: u32,
    pub character: u32,
}

impl From<PositionArgs> for Position {
    fn from(args: PositionArgs) -> Self {
        Position::new(args.file, args.line, args.character)
    }
}

#[derive(Debug, Clone, Args)]
pub struct PickArgs {
    /// 0-based index into the stored list instead of prompting
    #[arg(long)]
    pub index: Option<usize>,
}

/// Cursor backed by command line arguments; jumps are printed to stdout.
struct PrintingCursor {
    position: Option<Position>,
}

impl CursorProvider for PrintingCursor {
    fn position(&self) -> Option<Position> {
        self.position.clone()
    }

    fn jump_to(&mut self, bookmark: &Bookmark) -> Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{bookmark}").context("failed to write jump target")?;
        self.position = Some(Position::new(
            bookmark.file.clone(),
            bookmark.line,
            bookmark.character,
        ));
        Ok(())
    }
}

/// Parse arguments from the process and run the selected command.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    crate::init(cli.verbose);
    execute(cli)
}

/// Run an already parsed command line.
pub fn execute(cli: Cli) -> Result<ExitCode> {
    if let Commands::Completions { shell } = cli.command {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let cwd = std::env::current_dir().context("unable to determine working directory")?;
    let root = match workspace::resolve(cli.workspace.as_deref(), &cwd) {
        Ok(root) => root,
        Err(err) => {
            eprintln!("{err}");
            return Ok(ExitCode::FAILURE);
        }
    };
    let config = Config::load(&root)?;
    let commands = BookmarkCommands::from_config(&root, &config);
    tracing::debug!(store = %commands.store().path().display(), "using bookmark store");

    let status = match cli.command {
        Commands::Add(args) => commands.add(&cursor_at(args)),
        Commands::Toggle(args) => commands.toggle(&cursor_at(args)),
        Commands::Next(args) => commands.next(&mut cursor_at(args))?,
        Commands::Previous(args) => commands.previous(&mut cursor_at(args))?,
        Commands::Goto(args) => {
            let mut cursor = PrintingCursor { position: None };
            match args.index {
                Some(index) => commands.goto(&mut FixedPicker::new(index), &mut cursor)?,
                None => commands.goto(&mut prompt_picker(), &mut cursor)?,
            }
        }
        Commands::Delete(args) => match args.index {
            Some(index) => commands.delete(&mut FixedPicker::new(index))?,
            None => commands.delete(&mut prompt_picker())?,
        },
        Commands::DeleteAll => Some(commands.delete_all()),
        Commands::List { json } => {
            print_list(&commands.list(), json)?;
            None
        }
        Commands::Completions { .. } => None,
    };

    Ok(report(status))
}

fn cursor_at(args: PositionArgs) -> PrintingCursor {
    PrintingCursor {
        position: Some(args.into()),
    }
}

fn prompt_picker() -> LinePicker<io::StdinLock<'static>, io::Stderr> {
    LinePicker::new(io::stdin().lock(), io::stderr())
}

fn print_list(bookmarks: &[Bookmark], json: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        let data =
            serde_json::to_string_pretty(bookmarks).context("failed to serialize bookmarks")?;
        writeln!(stdout, "{data}")?;
    } else {
        for bookmark in bookmarks {
            writeln!(stdout, "{bookmark}")?;
        }
    }
    Ok(())
}

fn report(status: Option<Status>) -> ExitCode {
    match status {
        Some(status) => {
            eprintln!("{}", status.text);
            if status.level == StatusLevel::Error {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        None => ExitCode::SUCCESS,
    }
}
