use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "blogdoc")]
#[command(version)]
#[command(about = "Render and inspect rich-text blog documents")]
#[command(
    long_about = "blogdoc - Validate, render and analyze rich-text blog documents stored as JSON.\n\n\
    Reads an editor document (or a whole blog post with a `content` field) and prints\n\
    HTML by default. Use flags to list heading anchors, build a table of contents,\n\
    estimate reading time or emit the fully composed article page.\n\n\
    Examples:\n  \
    blogdoc post.json               # Render HTML\n  \
    blogdoc -l post.json            # List heading anchors\n  \
    blogdoc --page -o json post.json\n  \
    cat post.json | blogdoc --read-time"
)]
pub struct Cli {
    /// JSON file to read, or '-' for stdin
    ///
    /// If no file is specified and stdin is piped, input is read from stdin.
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// List heading anchors in document order
    ///
    /// Each heading is shown with the id it receives in the rendered HTML.
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Print the table-of-contents navigation markup
    #[arg(long = "toc")]
    pub toc: bool,

    /// Print the estimated reading time
    #[arg(long = "read-time")]
    pub read_time: bool,

    /// Only validate the input; exits with status 1 if it is rejected
    #[arg(long = "validate")]
    pub validate: bool,

    /// Print the document as JSON with heading ids embedded
    #[arg(long = "anchor")]
    pub anchor: bool,

    /// Print the composed page (HTML, TOC, headings, read time) as JSON
    #[arg(long = "page")]
    pub page: bool,

    /// Count headings by level
    #[arg(long = "count")]
    pub count: bool,

    /// Output format for --list, --count and --read-time
    #[arg(short = 'o', long = "output", default_value = "plain")]
    pub output: OutputFormat,

    /// Reading speed in words per minute (overrides config)
    #[arg(long = "wpm", value_name = "N")]
    pub wpm: Option<u32>,

    /// Omit styling classes from rendered HTML (overrides config)
    #[arg(long = "no-classes")]
    pub no_classes: bool,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Write a config file with default settings
    ///
    /// Creates the platform config file if it does not exist yet and prints its path.
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// JSON output
    Json,
}
