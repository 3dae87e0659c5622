//! Plain-text rendering of cached cocktails.

use std::fmt::Write;

use mixology_core::{CocktailDisplay, DayGroup};

/// Full description of one cocktail.
pub fn cocktail(cocktail: &CocktailDisplay) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", cocktail.name, cocktail.id);
    let _ = writeln!(out, "  Category:  {}", cocktail.category);
    let _ = writeln!(out, "  Alcoholic: {}", cocktail.alcoholic);
    let _ = writeln!(out, "  Glass:     {}", cocktail.glass);
    let _ = writeln!(out, "  Added:     {}", cocktail.insertion_day);
    if !cocktail.thumbnail.is_empty() {
        let _ = writeln!(out, "  Image:     {}", cocktail.thumbnail);
    }
    if !cocktail.instructions.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", cocktail.instructions);
    }
    out
}

/// History grouped by day, followed by the total.
pub fn listing(groups: &[DayGroup], total_count: u64) -> String {
    let mut out = String::new();
    if groups.is_empty() {
        out.push_str("No cocktails yet. Run `mixology add` to discover one.\n");
        return out;
    }

    for group in groups {
        let _ = writeln!(out, "{}", group.day);
        for cocktail in &group.cocktails {
            let _ = writeln!(
                out,
                "  {:<8} {} - {}",
                cocktail.id, cocktail.name, cocktail.category
            );
        }
    }
    let noun = if total_count == 1 { "cocktail" } else { "cocktails" };
    let _ = writeln!(out, "{total_count} {noun}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixology_core::group_by_day;

    fn display(id: &str, name: &str, day: &str) -> CocktailDisplay {
        CocktailDisplay {
            id: id.to_string(),
            name: name.to_string(),
            category: "Ordinary Drink".to_string(),
            alcoholic: "Alcoholic".to_string(),
            glass: "Highball glass".to_string(),
            instructions: String::new(),
            thumbnail: String::new(),
            insertion_day: day.to_string(),
        }
    }

    #[test]
    fn test_listing_groups_and_total() {
        let cocktails = vec![
            display("2", "Mojito", "02/01/2024"),
            display("1", "Paloma", "01/01/2024"),
        ];
        let out = listing(&group_by_day(&cocktails), 2);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "02/01/2024");
        assert!(lines[1].contains("Mojito"));
        assert_eq!(lines[2], "01/01/2024");
        assert_eq!(lines[4], "2 cocktails");
    }

    #[test]
    fn test_empty_listing() {
        assert!(listing(&[], 0).starts_with("No cocktails yet"));
    }

    #[test]
    fn test_cocktail_skips_empty_fields() {
        let out = cocktail(&display("11007", "Margarita", "03/01/2024"));

        assert!(out.starts_with("Margarita (11007)"));
        assert!(out.contains("Added:     03/01/2024"));
        assert!(!out.contains("Image:"));
    }
}
