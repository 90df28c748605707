use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use j2k_cli::{
    CommentMode, J2kConfig, format_json, format_text, init_tracing, read_units, render_units,
};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "j2k",
    version,
    about = "Render resolved Java-to-Kotlin expression trees as Kotlin source"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Project root used to find .j2k/config.toml
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render unit files (JSON) as Kotlin
    Render {
        /// Unit files: a single unit or { "units": [...] }
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Emit [{ "name", "text" }] instead of plain text
        #[arg(long)]
        json: bool,

        /// What to do with comments attached to the tree
        #[arg(long, value_enum)]
        comments: Option<CommentMode>,

        /// Render on a dedicated pool of N threads
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Render units one after another on the current thread
        #[arg(long, conflicts_with = "threads")]
        sequential: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = J2kConfig::load(&cli.root).context("failed to load configuration")?;

    let output = match cli.command {
        Command::Render {
            files,
            json,
            comments,
            threads,
            sequential,
        } => {
            if comments.is_some() {
                config.render.comments = comments;
            }
            if threads.is_some() {
                config.batch.threads = threads;
                config.batch.parallel = Some(true);
            }
            if sequential {
                config.batch.parallel = Some(false);
            }

            let mut units = Vec::new();
            for file in &files {
                units.extend(read_units(file)?);
            }
            let comments = config.render.comments().converter();
            let rendered = render_units(&units, comments, &config.batch)?;
            if json {
                format_json(&rendered)?
            } else {
                format_text(&rendered)
            }
        }
        Command::Config => {
            toml::to_string(&config.resolved()).context("failed to encode configuration")?
        }
    };

    std::io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .context("failed to write output")?;
    Ok(())
}
