//! # blogdoc
//!
//! Command-line front end for the blogdoc document pipeline.
//!
//! Render a stored document:
//! ```sh
//! blogdoc post.json
//! ```
//!
//! List heading anchors:
//! ```sh
//! blogdoc -l post.json
//! ```
//!
//! Validate a submission before saving it:
//! ```sh
//! blogdoc --validate post.json
//! ```

mod cli;

use blogdoc::Config;
use blogdoc::document::Document;
use blogdoc::headings::{HeadingDescriptor, anchor_headings, extract_headings, level_counts};
use blogdoc::input::{InputSource, load_document};
use blogdoc::page::{PageOptions, compose};
use blogdoc::reading::{ReadTimeEstimator, word_count};
use blogdoc::render::{HtmlRenderer, render_toc_html};
use clap::Parser;
use cli::{Cli, Command, OutputFormat};
use color_eyre::Result;
use serde_json::json;
use std::process;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    let config = Config::load();
    init_logging(&config);

    if let Some(Command::InitConfig { force }) = args.command {
        return init_config(&config, force);
    }

    let source = match InputSource::from_arg(args.file.as_deref()) {
        Some(source) => source,
        None => {
            eprintln!("Error: no input file given");
            eprintln!("Pass a JSON file, or '-' to read from stdin.");
            process::exit(1);
        }
    };

    let doc = match load_document(&source) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let options = page_options(&config, &args);

    if args.validate {
        println!("valid");
    } else if args.page {
        let page = compose(&doc, &options);
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else if args.anchor {
        let mut anchored = doc;
        anchor_headings(&mut anchored);
        println!("{}", serde_json::to_string_pretty(&anchored)?);
    } else if args.list {
        print_headings(&extract_headings(&doc), args.output)?;
    } else if args.count {
        print_heading_counts(&extract_headings(&doc), args.output)?;
    } else if args.toc {
        println!("{}", render_toc_html(&extract_headings(&doc)));
    } else if args.read_time {
        print_read_time(&doc, options.words_per_minute, args.output)?;
    } else {
        let mut anchored = doc;
        anchor_headings(&mut anchored);
        println!("{}", HtmlRenderer::with_options(options.render).render(&anchored));
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Config values with command-line overrides applied
fn page_options(config: &Config, args: &Cli) -> PageOptions {
    let mut options = config.page_options();
    if let Some(wpm) = args.wpm {
        options.words_per_minute = wpm;
    }
    if args.no_classes {
        options.render.classes = false;
    }
    options
}

fn init_config(config: &Config, force: bool) -> Result<()> {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: could not determine config directory");
        process::exit(1);
    };
    if path.exists() && !force {
        eprintln!("Config already exists at {}", path.display());
        eprintln!("Use --force to overwrite it.");
        process::exit(1);
    }
    config.save_to(&path)?;
    println!("{}", path.display());
    Ok(())
}

fn print_headings(headings: &[HeadingDescriptor], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            for heading in headings {
                let prefix = "#".repeat(usize::from(heading.level));
                println!("{} {} (#{})", prefix, heading.text, heading.id);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(headings)?),
    }
    Ok(())
}

fn print_heading_counts(headings: &[HeadingDescriptor], format: OutputFormat) -> Result<()> {
    let counts = level_counts(headings);

    match format {
        OutputFormat::Plain => {
            println!("Heading counts:");
            for (level, count) in &counts {
                let prefix = "#".repeat(usize::from(*level));
                println!("  {}: {}", prefix, count);
            }
            println!("\nTotal: {}", headings.len());
        }
        OutputFormat::Json => {
            let output = json!({ "levels": counts, "total": headings.len() });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn print_read_time(doc: &Document, words_per_minute: u32, format: OutputFormat) -> Result<()> {
    let words = word_count(doc);
    let read_time = ReadTimeEstimator::new(words_per_minute).for_words(words);

    match format {
        OutputFormat::Plain => println!("{}", read_time),
        OutputFormat::Json => {
            let output = json!({ "minutes": read_time, "words": words });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
