use std::{collections::HashSet, fmt};

use _model::{Business, Category};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::yelp::{Query, Search};

/// Accepted rows plus every entry that was turned away.
#[derive(Debug, Default)]
pub struct Listings {
    pub businesses: Vec<Business>,
    pub skipped: Vec<Skipped>,
}

impl Listings {
    pub fn append(&mut self, mut other: Listings) {
        self.businesses.append(&mut other.businesses);
        self.skipped.append(&mut other.skipped);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Skipped {
    pub category: Category,
    pub name: Option<String>,
    pub reason: Rejection,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Rejection {
    Malformed(String),
    Missing(Field),
    Empty(Field),
    DuplicatePhone(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(x) => write!(f, "malformed entry ({x})"),
            Self::Missing(x) => write!(f, "missing {x}"),
            Self::Empty(x) => write!(f, "empty {x}"),
            Self::DuplicatePhone(x) => write!(f, "duplicate phone {x}"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Latitude,
    Longitude,
    Phone,
    Rating,
    ReviewCount,
    Address,
    Url,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Latitude => write!(f, "coordinates.latitude"),
            Self::Longitude => write!(f, "coordinates.longitude"),
            Self::Phone => write!(f, "phone"),
            Self::Rating => write!(f, "rating"),
            Self::ReviewCount => write!(f, "review_count"),
            Self::Address => write!(f, "location.address1"),
            Self::Url => write!(f, "url"),
        }
    }
}

/// Runs one search and keeps the complete, first-seen-by-phone entries in
/// response order.
pub fn extract(search: &dyn Search, query: &Query) -> Result<Listings> {
    let entries = search
        .search(query)
        .with_context(|| format!("Failed to search {}", query.category))?;
    let Some(entries) = entries else {
        debug!(category = %query.category, "no results");
        return Ok(Listings::default());
    };

    let mut output = Listings::default();
    let mut phones = HashSet::new();
    for entry in entries {
        let name = entry.get("name").and_then(Value::as_str).map(String::from);
        let reason = match RawBusiness::read(entry) {
            Ok(x) if phones.contains(&x.phone) => Rejection::DuplicatePhone(x.phone),
            Ok(x) => match x.empty_field() {
                Some(field) => Rejection::Empty(field),
                None => {
                    phones.insert(x.phone.clone());
                    output.businesses.push(x.refine(&query.category));
                    continue;
                }
            },
            Err(reason) => reason,
        };

        match &reason {
            Rejection::Malformed(_) | Rejection::Missing(_) => {
                warn!(category = %query.category, name = ?name, "skipping entry: {reason}")
            }
            _ => debug!(category = %query.category, name = ?name, "skipping entry: {reason}"),
        }
        output.skipped.push(Skipped {
            category: query.category.clone(),
            name,
            reason,
        });
    }

    debug!(
        category = %query.category,
        accepted = output.businesses.len(),
        skipped = output.skipped.len(),
        "extracted"
    );
    Ok(output)
}

#[derive(Deserialize)]
struct RawEntry {
    name: Option<String>,
    coordinates: Option<RawCoordinates>,
    phone: Option<String>,
    rating: Option<Value>,
    review_count: Option<Value>,
    location: Option<RawLocation>,
    url: Option<String>,
}

#[derive(Deserialize)]
struct RawCoordinates {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Deserialize)]
struct RawLocation {
    address1: Option<String>,
}

/// An entry with every field present, not yet checked for blanks.
struct RawBusiness {
    name: String,
    latitude: f64,
    longitude: f64,
    phone: String,
    rating: String,
    review_count: String,
    address: String,
    url: String,
}

impl RawBusiness {
    fn read(entry: Value) -> Result<Self, Rejection> {
        let raw: RawEntry =
            serde_json::from_value(entry).map_err(|e| Rejection::Malformed(e.to_string()))?;
        let coordinates = raw.coordinates.as_ref();

        Ok(Self {
            name: raw.name.ok_or(Rejection::Missing(Field::Name))?,
            latitude: coordinates
                .and_then(|x| x.latitude)
                .ok_or(Rejection::Missing(Field::Latitude))?,
            longitude: coordinates
                .and_then(|x| x.longitude)
                .ok_or(Rejection::Missing(Field::Longitude))?,
            phone: raw.phone.ok_or(Rejection::Missing(Field::Phone))?,
            rating: raw
                .rating
                .and_then(scalar)
                .ok_or(Rejection::Missing(Field::Rating))?,
            review_count: raw
                .review_count
                .and_then(scalar)
                .ok_or(Rejection::Missing(Field::ReviewCount))?,
            address: raw
                .location
                .and_then(|x| x.address1)
                .ok_or(Rejection::Missing(Field::Address))?,
            url: raw.url.ok_or(Rejection::Missing(Field::Url))?,
        })
    }

    fn empty_field(&self) -> Option<Field> {
        [
            (Field::Name, &self.name),
            (Field::Phone, &self.phone),
            (Field::Rating, &self.rating),
            (Field::ReviewCount, &self.review_count),
            (Field::Address, &self.address),
            (Field::Url, &self.url),
        ]
        .into_iter()
        .find(|(_, x)| x.is_empty())
        .map(|(field, _)| field)
    }

    fn refine(self, category: &Category) -> Business {
        Business {
            info: Business::info(&self.rating, &self.review_count),
            name: self.name,
            phone: self.phone,
            latitude: self.latitude,
            longitude: self.longitude,
            category: category.clone(),
            address: self.address,
            url: self.url,
        }
    }
}

// numbers keep their json spelling, so a rating of 4.0 stays "4.0"
fn scalar(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(x) => Some(x),
        x => Some(x.to_string()),
    }
}
