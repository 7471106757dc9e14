//! # CLI Layer
//!
//! The **only** place that knows about terminal I/O, logging setup, and how
//! flags map onto library types.
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap turns shell arguments into [`Cli`]
//! 2. **Logging**: `tracing-subscriber` on stderr, filtered by `WEBNOTES_LOG`
//!    or `-v`
//! 3. **Context Setup**: [`initialize`] wires the API for `--root`
//! 4. **Translation**: [`SelectArgs`] to a `Selection`, [`ValueArgs`] to
//!    `SectionValues`
//! 5. **Dispatch and Output**: call the API method, hand the result to
//!    `render`

use super::render::{print_duplicates, print_messages, print_sections, print_sections_json};
use super::setup::{Cli, Commands, FileArgs, SelectArgs, ValueArgs};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use webnotesapp::commands::clear::ClearTargets;
use webnotesapp::commands::helpers::{FileSelector, Selection};
use webnotesapp::commands::{CmdResult, SectionValues};
use webnotesapp::api::WebnotesApi;
use webnotesapp::enrich::{Enrichment, Fetcher};
use webnotesapp::init::initialize;
use webnotesapp::matcher::{parse_assignment, Matcher, SelectionCriteria};
use webnotesapp::model::{AUTHOR, DATE, DESCRIPTION, TITLE};
use webnotesapp::store::StorageBackend;
use webnotesapp::tags::parse_tag_list;

pub const LOG_ENV: &str = "WEBNOTES_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = match &cli.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    let ctx = initialize(&root)
        .with_context(|| format!("could not open collection at {}", root.display()))?;
    let api = &ctx.api;

    let result = match cli.command {
        Commands::Add {
            out,
            note,
            url,
            values,
        } => {
            let values = section_values(api, &values)?;
            api.add(&out, note.as_deref(), url.as_deref(), &values)?
        }
        Commands::Append { select, values } => {
            api.append(&selection(&select)?, &section_values(api, &values)?)?
        }
        Commands::Set { select, values } => {
            api.set(&selection(&select)?, &section_values(api, &values)?)?
        }
        Commands::Fill { select, values } => {
            api.fill(&selection(&select)?, &section_values(api, &values)?)?
        }
        Commands::Clear {
            select,
            fields,
            body,
            all,
        } => {
            let targets = ClearTargets { fields, body, all };
            api.clear(&selection(&select)?, &targets)?
        }
        Commands::Tag { select, tags } => api.tag(&selection(&select)?, &tags)?,
        Commands::Untag { select, tags } => api.untag(&selection(&select)?, &tags)?,
        Commands::Matches { select, json } => {
            let result = api.matches(&selection(&select)?)?;
            if json {
                print_sections_json(&result.listed_sections)?;
            } else {
                print_sections(api.store().serializer(), &result.listed_sections);
            }
            return Ok(());
        }
        Commands::Duplicates { select } => {
            let result = api.duplicates(&selection(&select)?)?;
            print_duplicates(&result.duplicates);
            result
        }
        Commands::Copy { select, out } => api.copy(&selection(&select)?, &out)?,
        Commands::Move { select, out } => api.move_sections(&selection(&select)?, &out)?,
        Commands::Delete { select } => api.delete(&selection(&select)?)?,
        Commands::Format { files } => api.format(&file_selector(&files)?)?,
        Commands::Head { select } => api.head(&selection(&select)?)?,
        Commands::Index => api.index()?,
        Commands::Html {
            select,
            out,
            link_prefix,
        } => return write_html(api.html(&selection(&select)?, &link_prefix)?, out),
    };

    print_messages(&result.messages);
    Ok(())
}

/// Logs go to stderr so `matches` and `html` output stays clean.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn file_selector(files: &FileArgs) -> Result<FileSelector> {
    Ok(FileSelector::new(files.dir.as_deref(), files.file.as_deref())?)
}

fn selection(select: &SelectArgs) -> Result<Selection> {
    let files = FileSelector::new(select.dir.as_deref(), select.file.as_deref())?;
    let criteria = SelectionCriteria {
        notes_only: select.notes,
        bookmarks_only: select.bookmarks,
        equals: select
            .equals
            .iter()
            .map(|s| parse_assignment(s))
            .collect::<webnotesapp::error::Result<_>>()?,
        patterns: select
            .patterns
            .iter()
            .map(|s| parse_assignment(s))
            .collect::<webnotesapp::error::Result<_>>()?,
        any_tags: parse_tag_list(select.any_tag.as_deref().unwrap_or_default())?,
        all_tags: parse_tag_list(select.all_tags.as_deref().unwrap_or_default())?,
    };
    Ok(Selection::new(files, Matcher::build(&criteria)?))
}

fn section_values<B: StorageBackend, F: Fetcher>(
    api: &WebnotesApi<B, F>,
    args: &ValueArgs,
) -> Result<SectionValues> {
    let mut values = SectionValues {
        tags: parse_tag_list(args.tags.as_deref().unwrap_or_default())?,
        body: args.body.clone(),
        enrichment: Enrichment {
            capture: args.capture.map(Into::into),
            fetch_title: args.fetch_title,
        },
        ..Default::default()
    };
    for (name, value) in [
        (TITLE, &args.title),
        (DESCRIPTION, &args.description),
        (AUTHOR, &args.author),
        (DATE, &args.date),
    ] {
        if let Some(value) = value {
            values = values.with_field(name, value.clone());
        }
    }
    if args.today {
        values = api.with_today(values)?;
    }
    Ok(values)
}

fn write_html(result: CmdResult, out: Option<PathBuf>) -> Result<()> {
    let page = result.html.unwrap_or_default();
    match out {
        Some(path) => {
            std::fs::write(&path, page)
                .with_context(|| format!("could not write {}", path.display()))?;
            print_messages(&result.messages);
        }
        None => print!("{}", page),
    }
    Ok(())
}
