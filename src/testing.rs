use std::{cell::RefCell, collections::HashMap};

use anyhow::{bail, Result};
use serde_json::{json, Value};

use crate::yelp::{Query, Search};

/// Answers searches from fixed json, optionally per latitude.
#[derive(Default)]
pub struct Canned {
    responses: HashMap<(String, Option<u64>), Value>,
    failing: Vec<String>,
    queries: RefCell<Vec<Query>>,
}

impl Canned {
    pub fn with(mut self, category: &str, businesses: Value) -> Self {
        self.responses
            .insert((category.to_string(), None), businesses);
        self
    }

    pub fn at(mut self, latitude: f64, category: &str, businesses: Value) -> Self {
        self.responses
            .insert((category.to_string(), Some(latitude.to_bits())), businesses);
        self
    }

    pub fn failing(mut self, category: &str) -> Self {
        self.failing.push(category.to_string());
        self
    }

    pub fn queries(&self) -> Vec<Query> {
        self.queries.borrow().clone()
    }

    pub fn entry(name: &str, phone: &str) -> Value {
        let slug: String = name
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == ' ')
            .collect();
        json!({
            "id": slug,
            "name": name,
            "phone": phone,
            "rating": 4.5,
            "review_count": 120,
            "coordinates": { "latitude": 41.88, "longitude": -87.62 },
            "location": { "address1": "565 W Jackson Blvd", "city": "Chicago" },
            "url": format!("https://www.yelp.com/biz/{}", slug.replace(' ', "-")),
        })
    }
}

impl Search for Canned {
    fn search(&self, query: &Query) -> Result<Option<Vec<Value>>> {
        self.queries.borrow_mut().push(query.clone());

        let category = query.category.to_string();
        if self.failing.contains(&category) {
            bail!("401 Unauthorized");
        }

        let response = self
            .responses
            .get(&(category.clone(), Some(query.point.y().to_bits())))
            .or_else(|| self.responses.get(&(category, None)));
        Ok(match response {
            Some(Value::Array(x)) => Some(x.clone()),
            _ => None,
        })
    }
}
