use clap::ValueEnum;

mod business;
mod category;
mod neighborhood;

pub use business::Business;
pub use category::Category;
pub use neighborhood::Neighborhood;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortBy {
    Distance,
    BestMatch,
    Rating,
    ReviewCount,
}

impl SortBy {
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::BestMatch => "best_match",
            Self::Rating => "rating",
            Self::ReviewCount => "review_count",
        }
    }
}
