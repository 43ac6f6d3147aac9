use std::{ffi::OsString, path::PathBuf};

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Reorder book CSV columns to Title, Author, Year, ISBN",
    long_about = "Reads a CSV file whose columns are Title, ISBN, Author, Year, discards its \
                  header row and writes the rows to stdout as Title, Author, Year, ISBN."
)]
pub struct Cli {
    /// Input CSV file to reorder
    pub input: Option<PathBuf>,
    /// Anything after the input path is accepted and ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub ignored: Vec<OsString>,
}
