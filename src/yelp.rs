use _model::{Category, SortBy};
use anyhow::{bail, Context, Result};
use geo::Point;
use itertools::Itertools;
use serde_json::Value;
use ureq::Agent;

use crate::{config::Config, utils::agent};

const SEARCH_URL: &str = "https://api.yelp.com/v3/businesses/search";

// "$" and "$$" only
const RESTAURANT_PRICE_TIERS: [u8; 2] = [1, 2];

/// Something that can answer a business search.
///
/// `Ok(None)` is an empty or absent result; errors abort the run.
pub trait Search {
    fn search(&self, query: &Query) -> Result<Option<Vec<Value>>>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    pub category: Category,
    pub point: Point,
    pub limit: u32,
    pub sort_by: SortBy,
    pub price: Option<String>,
}

impl Query {
    pub fn new(category: &Category, point: Point, config: &Config) -> Self {
        let price = category
            .is_restaurants()
            .then(|| RESTAURANT_PRICE_TIERS.iter().join(","));

        Self {
            category: category.clone(),
            point,
            limit: config.limit,
            sort_by: config.sort_by,
            price,
        }
    }
}

pub struct Yelp {
    agent: Agent,
    api_key: String,
    url: String,
}

impl Yelp {
    pub fn new(api_key: String) -> Self {
        Self::with_url(api_key, SEARCH_URL.to_string())
    }

    pub fn with_url(api_key: String, url: String) -> Self {
        Self {
            agent: agent(),
            api_key,
            url,
        }
    }
}

impl Search for Yelp {
    fn search(&self, query: &Query) -> Result<Option<Vec<Value>>> {
        let mut request = self
            .agent
            .get(&self.url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .query("categories", query.category.as_str())
            .query("latitude", &query.point.y().to_string())
            .query("longitude", &query.point.x().to_string())
            .query("limit", &query.limit.to_string())
            .query("sort_by", query.sort_by.slug());
        if let Some(price) = &query.price {
            request = request.query("price", price);
        }

        let body: Value = match request.call() {
            Ok(response) => response
                .into_json()
                .context("Failed to decode search response")?,
            Err(ureq::Error::Status(code, response)) => {
                let text = response.into_string().unwrap_or_default();
                bail!("Search for {} returned {code}: {text}", query.category)
            }
            Err(e) => return Err(e).context("Search request failed"),
        };

        businesses(body)
    }
}

fn businesses(body: Value) -> Result<Option<Vec<Value>>> {
    match body {
        Value::Null => Ok(None),
        Value::Object(mut map) => {
            if map.is_empty() {
                return Ok(None);
            }
            match map.remove("businesses") {
                Some(Value::Array(x)) => Ok(Some(x)),
                Some(x) => bail!("Expected businesses to be an array, got: {x}"),
                None => bail!("Search response has no businesses"),
            }
        }
        x => bail!("Unexpected search response: {x}"),
    }
}
