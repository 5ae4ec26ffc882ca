use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use quill_index::HomeSort;

/// Query a collection of notes exported as a JSON array.
#[derive(Debug, Parser)]
#[command(name = "quill", version, about)]
pub struct Cli {
    /// JSON file holding the notes.
    #[arg(long, short = 'n', value_name = "FILE")]
    pub notes: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Rank notes by title and body match.
    Search {
        #[arg(allow_hyphen_values = true)]
        query: String,
        #[arg(long)]
        limit: Option<usize>,
        /// Only match titles.
        #[arg(long, default_value_t = false)]
        titles: bool,
    },
    /// Autocomplete a `[[` link, from a query or from text and a caret.
    Suggest {
        #[arg(allow_hyphen_values = true)]
        query: Option<String>,
        /// Editor text containing an open `[[`.
        #[arg(long, conflicts_with = "query")]
        text: Option<String>,
        /// Caret position in `--text`, in chars. Defaults to the end.
        #[arg(long, requires = "text")]
        cursor: Option<usize>,
    },
    /// Notes most similar to a note.
    Similar {
        id: String,
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Notes linking to a note.
    Backlinks { id: String },
    /// Links of a note and whether their targets exist.
    Links { id: String },
    /// Most recently updated notes.
    Recent {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Overview of all notes.
    Home {
        #[arg(long, value_enum, default_value_t = SortArg::Updated)]
        sort: SortArg,
        #[arg(long, default_value_t = false)]
        pinned: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Updated,
    Alpha,
}

impl From<SortArg> for HomeSort {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Updated => HomeSort::Updated,
            SortArg::Alpha => HomeSort::Alpha,
        }
    }
}
