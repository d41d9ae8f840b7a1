use _model::Neighborhood;
use anyhow::Result;
use tracing::debug;

use crate::{
    config::Config,
    extract::{extract, Listings},
    yelp::{Query, Search},
};

/// Searches every configured category around one neighborhood, in category
/// order. Duplicates across categories are left for the dataset to resolve.
pub fn collect(
    search: &dyn Search,
    neighborhood: &Neighborhood,
    config: &Config,
) -> Result<Listings> {
    let mut output = Listings::default();
    for category in &config.categories {
        let query = Query::new(category, neighborhood.point, config);
        output.append(extract(search, &query)?);
    }

    debug!(
        businesses = output.businesses.len(),
        skipped = output.skipped.len(),
        "collected"
    );
    Ok(output)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::testing::Canned;

    fn loop_area() -> Neighborhood {
        Neighborhood::new("LOOP".to_string(), 41.881832, -87.623177).unwrap()
    }

    fn names(listings: &Listings) -> Vec<(&str, &str)> {
        listings
            .businesses
            .iter()
            .map(|x| (x.category.as_str(), x.name.as_str()))
            .collect()
    }

    #[test]
    fn concatenates_in_category_order() {
        let search = Canned::default()
            .with(
                "restaurants",
                json!([Canned::entry("r1", "1"), Canned::entry("r2", "2")]),
            )
            .with("food", json!([Canned::entry("f1", "3")]))
            .with("health", json!([Canned::entry("h1", "4")]))
            .with("transport", json!([Canned::entry("t1", "5")]));
        let config = Config::new("in.csv".into(), "out.csv".into());

        let output = collect(&search, &loop_area(), &config).unwrap();
        assert_eq!(
            names(&output),
            vec![
                ("restaurants", "r1"),
                ("restaurants", "r2"),
                ("food", "f1"),
                ("health", "h1"),
                ("transport", "t1"),
            ]
        );

        let queries = search.queries();
        assert_eq!(
            queries
                .iter()
                .map(|x| (x.category.as_str(), x.price.is_some()))
                .collect::<Vec<_>>(),
            vec![
                ("restaurants", true),
                ("food", false),
                ("health", false),
                ("transport", false),
            ]
        );
        assert!(queries.iter().all(|x| x.point == loop_area().point));
    }

    #[test]
    fn empty_category_contributes_nothing() {
        let search = Canned::default()
            .with("restaurants", json!([Canned::entry("r1", "1")]))
            .with("food", json!(null))
            .with("transport", json!([Canned::entry("t1", "5")]));
        let config = Config::new("in.csv".into(), "out.csv".into());

        let output = collect(&search, &loop_area(), &config).unwrap();
        assert_eq!(
            names(&output),
            vec![("restaurants", "r1"), ("transport", "t1")]
        );
        assert!(output.skipped.is_empty());
        assert_eq!(search.queries().len(), 4);
    }

    #[test]
    fn keeps_cross_category_duplicates() {
        let search = Canned::default()
            .with("restaurants", json!([Canned::entry("Diner", "+13125550100")]))
            .with("food", json!([Canned::entry("Diner", "+13125550100")]));
        let mut config = Config::new("in.csv".into(), "out.csv".into());
        config.categories = vec!["restaurants".parse().unwrap(), "food".parse().unwrap()];

        let output = collect(&search, &loop_area(), &config).unwrap();
        assert_eq!(
            names(&output),
            vec![("restaurants", "Diner"), ("food", "Diner")]
        );
    }

    #[test]
    fn stops_at_first_failure() {
        let search = Canned::default()
            .with("restaurants", json!([Canned::entry("r1", "1")]))
            .failing("food");
        let config = Config::new("in.csv".into(), "out.csv".into());

        assert!(collect(&search, &loop_area(), &config).is_err());
        assert_eq!(search.queries().len(), 2);
    }
}
