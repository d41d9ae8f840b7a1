use serde::Serialize;

use crate::Category;

/// One accepted search result, in output column order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Business {
    pub name: String,
    pub phone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub info: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub address: String,
    pub url: String,
}

impl Business {
    pub fn info(rating: &str, review_count: &str) -> String {
        format!("Yelp Rating: {rating} Reviews: {review_count}")
    }
}
