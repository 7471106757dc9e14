use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use webnotesapp::enrich::Capture;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "webnotes",
    bin_name = "webnotes",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Plain-text notes and annotated bookmarks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Root of the collection (default: current directory)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub root: Option<PathBuf>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

/// Which files and sections a verb operates on.
#[derive(Args, Debug, Default, Clone)]
pub struct SelectArgs {
    /// Only files directly inside this directory
    #[arg(long, value_name = "DIR", conflicts_with = "file", help_heading = "Selection")]
    pub dir: Option<PathBuf>,

    /// Only this file
    #[arg(long, value_name = "FILE", help_heading = "Selection")]
    pub file: Option<PathBuf>,

    /// Only notes
    #[arg(long, conflicts_with = "bookmarks", help_heading = "Selection")]
    pub notes: bool,

    /// Only bookmarks
    #[arg(long, help_heading = "Selection")]
    pub bookmarks: bool,

    /// Equality test, e.g. author=Ann or host=example.com (repeatable)
    #[arg(long = "eq", value_name = "DIM=VALUE", help_heading = "Selection")]
    pub equals: Vec<String>,

    /// Regex test, e.g. title=^Rust or body=TODO (repeatable)
    #[arg(long = "match", value_name = "DIM=REGEX", help_heading = "Selection")]
    pub patterns: Vec<String>,

    /// Sections with at least one of these tags
    #[arg(long, value_name = "TAGS", help_heading = "Selection")]
    pub any_tag: Option<String>,

    /// Sections with all of these tags
    #[arg(long, value_name = "TAGS", help_heading = "Selection")]
    pub all_tags: Option<String>,
}

/// Which files a verb operates on, for verbs without section selection.
#[derive(Args, Debug, Default, Clone)]
pub struct FileArgs {
    /// Only files directly inside this directory
    #[arg(long, value_name = "DIR", conflicts_with = "file")]
    pub dir: Option<PathBuf>,

    /// Only this file
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum CaptureArg {
    Images,
    Links,
    #[value(alias = "paragraphs")]
    P,
    Text,
}

impl From<CaptureArg> for Capture {
    fn from(arg: CaptureArg) -> Self {
        match arg {
            CaptureArg::Images => Capture::Images,
            CaptureArg::Links => Capture::Links,
            CaptureArg::P => Capture::Paragraphs,
            CaptureArg::Text => Capture::Text,
        }
    }
}

/// Values written into sections.
#[derive(Args, Debug, Default, Clone)]
pub struct ValueArgs {
    #[arg(long, help_heading = "Values")]
    pub title: Option<String>,

    #[arg(long, help_heading = "Values")]
    pub description: Option<String>,

    #[arg(long, help_heading = "Values")]
    pub author: Option<String>,

    #[arg(long, conflicts_with = "today", help_heading = "Values")]
    pub date: Option<String>,

    /// Set the date to today
    #[arg(long, help_heading = "Values")]
    pub today: bool,

    /// Comma-separated tags
    #[arg(long, help_heading = "Values")]
    pub tags: Option<String>,

    /// Body text; newlines separate body lines
    #[arg(long, help_heading = "Values")]
    pub body: Option<String>,

    /// Fetch the bookmark and use part of the page as the body
    #[arg(long, value_enum, help_heading = "Values")]
    pub capture: Option<CaptureArg>,

    /// Fetch the bookmark and use the page title
    #[arg(long, help_heading = "Values")]
    pub fetch_title: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a note or bookmark to a file
    #[command(display_order = 1)]
    Add {
        /// File to add to (created if missing)
        #[arg(long, value_name = "FILE")]
        out: PathBuf,

        /// Note text (whitespace becomes underscores)
        #[arg(long, conflicts_with = "url", required_unless_present = "url")]
        note: Option<String>,

        /// Bookmark url
        #[arg(long)]
        url: Option<String>,

        #[command(flatten)]
        values: ValueArgs,
    },

    /// Merge values into sections without overwriting
    #[command(display_order = 2)]
    Append {
        #[command(flatten)]
        select: SelectArgs,

        #[command(flatten)]
        values: ValueArgs,
    },

    /// Replace values on sections
    #[command(display_order = 3)]
    Set {
        #[command(flatten)]
        select: SelectArgs,

        #[command(flatten)]
        values: ValueArgs,
    },

    /// Write values only where missing
    #[command(display_order = 4)]
    Fill {
        #[command(flatten)]
        select: SelectArgs,

        #[command(flatten)]
        values: ValueArgs,
    },

    /// Remove fields, the body, or both
    #[command(display_order = 5)]
    Clear {
        #[command(flatten)]
        select: SelectArgs,

        /// Field to remove (repeatable)
        #[arg(long = "field", value_name = "NAME")]
        fields: Vec<String>,

        /// Remove the body
        #[arg(long)]
        body: bool,

        /// Remove every field and the body
        #[arg(long)]
        all: bool,
    },

    /// Add tags to sections
    #[command(display_order = 6)]
    Tag {
        #[command(flatten)]
        select: SelectArgs,

        /// Comma-separated tags
        tags: String,
    },

    /// Remove tags from sections
    #[command(display_order = 7)]
    Untag {
        #[command(flatten)]
        select: SelectArgs,

        /// Comma-separated tags
        tags: String,
    },

    /// Print matching sections
    #[command(alias = "ls", display_order = 10)]
    Matches {
        #[command(flatten)]
        select: SelectArgs,

        /// Print JSON instead of webnote text
        #[arg(long)]
        json: bool,
    },

    /// Print ids found in more than one file
    #[command(display_order = 11)]
    Duplicates {
        #[command(flatten)]
        select: SelectArgs,
    },

    /// Copy sections to another file
    #[command(display_order = 12)]
    Copy {
        #[command(flatten)]
        select: SelectArgs,

        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },

    /// Move sections to another file
    #[command(name = "move", display_order = 13)]
    Move {
        #[command(flatten)]
        select: SelectArgs,

        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },

    /// Delete sections
    #[command(alias = "rm", display_order = 14)]
    Delete {
        #[command(flatten)]
        select: SelectArgs,
    },

    /// Rewrite files in canonical form
    #[command(display_order = 20)]
    Format {
        #[command(flatten)]
        files: FileArgs,
    },

    /// Check that bookmarks respond
    #[command(display_order = 21)]
    Head {
        #[command(flatten)]
        select: SelectArgs,
    },

    /// Rebuild the index by author, host and tag
    #[command(display_order = 22)]
    Index,

    /// Render sections as an HTML page
    #[command(display_order = 23)]
    Html {
        #[command(flatten)]
        select: SelectArgs,

        /// Write the page here instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Prefix for links to other webnote files
        #[arg(long, default_value = webnotesapp::markdown::DEFAULT_LINK_PREFIX)]
        link_prefix: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("webnotes").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_selection_flags() {
        let cli = parse(&[
            "matches",
            "--bookmarks",
            "--eq",
            "host=example.com",
            "--match",
            "title=^Rust",
            "--any-tag",
            "a,b",
        ]);
        match cli.command {
            Commands::Matches { select, json } => {
                assert!(select.bookmarks);
                assert!(!json);
                assert_eq!(select.equals, vec!["host=example.com"]);
                assert_eq!(select.patterns, vec!["title=^Rust"]);
                assert_eq!(select.any_tag.as_deref(), Some("a,b"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_notes_and_bookmarks_conflict() {
        assert!(Cli::try_parse_from(["webnotes", "delete", "--notes", "--bookmarks"]).is_err());
    }

    #[test]
    fn test_add_requires_identity() {
        assert!(Cli::try_parse_from(["webnotes", "add", "--out", "a.wn"]).is_err());
        assert!(Cli::try_parse_from([
            "webnotes", "add", "--out", "a.wn", "--note", "n", "--url", "https://x.com"
        ])
        .is_err());
    }

    #[test]
    fn test_capture_values() {
        let cli = parse(&["set", "--capture", "p", "--fetch-title"]);
        match cli.command {
            Commands::Set { values, .. } => {
                assert_eq!(values.capture, Some(CaptureArg::P));
                assert!(values.fetch_title);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["index", "--root", "/tmp/notes", "-vv"]);
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/notes")));
        assert_eq!(cli.verbose, 2);
    }
}
