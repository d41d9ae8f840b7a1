use std::path::PathBuf;

use _model::{Category, SortBy};

/// Everything a run needs besides the search client itself.
#[derive(Clone, Debug)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    pub categories: Vec<Category>,
    pub limit: u32,
    pub sort_by: SortBy,
}

impl Config {
    pub fn new(input: PathBuf, output: PathBuf) -> Self {
        Self {
            input,
            output,
            report: None,
            categories: Category::defaults(),
            limit: 12,
            sort_by: SortBy::Distance,
        }
    }
}
