//! Grouping of cached cocktails by insertion day.

use std::collections::HashMap;

use super::model::CocktailDisplay;

/// Cocktails added on the same local day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup {
    /// Day label, as in [`CocktailDisplay::insertion_day`].
    pub day: String,
    /// Cocktails of that day, in listing order.
    pub cocktails: Vec<CocktailDisplay>,
}

/// Buckets cocktails by insertion day.
///
/// Groups appear in the order their first cocktail appears in `cocktails`,
/// and each group keeps the relative order of its cocktails. With a listing
/// sorted most recent first, both the groups and their contents are most
/// recent first.
#[must_use]
pub fn group_by_day(cocktails: &[CocktailDisplay]) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for cocktail in cocktails {
        if let Some(&slot) = index.get(cocktail.insertion_day.as_str()) {
            groups[slot].cocktails.push(cocktail.clone());
        } else {
            index.insert(cocktail.insertion_day.as_str(), groups.len());
            groups.push(DayGroup {
                day: cocktail.insertion_day.clone(),
                cocktails: vec![cocktail.clone()],
            });
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cocktail(id: &str, day: &str) -> CocktailDisplay {
        CocktailDisplay {
            id: id.to_string(),
            name: format!("Drink {id}"),
            category: String::new(),
            alcoholic: String::new(),
            glass: String::new(),
            instructions: String::new(),
            thumbnail: String::new(),
            insertion_day: day.to_string(),
        }
    }

    #[test]
    fn test_empty_listing() {
        assert!(group_by_day(&[]).is_empty());
    }

    #[test]
    fn test_two_days() {
        let listing = vec![
            cocktail("3", "02/01/2024"),
            cocktail("2", "01/01/2024"),
            cocktail("1", "01/01/2024"),
        ];

        let groups = group_by_day(&listing);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].day, "02/01/2024");
        assert_eq!(groups[0].cocktails.len(), 1);
        assert_eq!(groups[1].day, "01/01/2024");
        let ids: Vec<&str> = groups[1].cocktails.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
    }

    #[test]
    fn test_groups_follow_first_appearance() {
        let listing = vec![
            cocktail("a", "05/05/2024"),
            cocktail("b", "01/01/2024"),
            cocktail("c", "05/05/2024"),
        ];

        let days: Vec<String> = group_by_day(&listing).into_iter().map(|g| g.day).collect();
        assert_eq!(days, ["05/05/2024", "01/01/2024"]);
    }

    proptest! {
        #[test]
        fn prop_grouping_is_a_stable_partition(days in prop::collection::vec(0u8..5, 0..40)) {
            let listing: Vec<CocktailDisplay> = days
                .iter()
                .enumerate()
                .map(|(i, d)| cocktail(&i.to_string(), &format!("0{d}/01/2024")))
                .collect();

            let groups = group_by_day(&listing);

            // Every cocktail lands in exactly one group.
            let total: usize = groups.iter().map(|g| g.cocktails.len()).sum();
            prop_assert_eq!(total, listing.len());

            // Day labels are unique and every member carries its group's day.
            let mut seen = std::collections::HashSet::new();
            for group in &groups {
                prop_assert!(seen.insert(group.day.clone()));
                for c in &group.cocktails {
                    prop_assert_eq!(&c.insertion_day, &group.day);
                }
            }

            // Within a group, listing order is kept.
            for group in &groups {
                let positions: Vec<usize> = group
                    .cocktails
                    .iter()
                    .map(|c| listing.iter().position(|l| l.id == c.id).unwrap_or(usize::MAX))
                    .collect();
                prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}
