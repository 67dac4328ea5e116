//! Static food catalog: read-only reference data for manual search and for
//! resolving identification labels.

use std::sync::OnceLock;

use crate::models::{FoodItem, NutritionInfo};

static CATALOG: OnceLock<Vec<FoodItem>> = OnceLock::new();

pub fn all() -> &'static [FoodItem] {
    CATALOG.get_or_init(build_catalog)
}

/// Case-insensitive substring search over name and localized name.
pub fn search(query: &str) -> Vec<&'static FoodItem> {
    all().iter().filter(|food| food.matches(query)).collect()
}

pub fn find_by_id(id: &str) -> Option<&'static FoodItem> {
    all().iter().find(|food| food.id == id)
}

/// Exact (case-insensitive) name lookup, used after photo identification.
pub fn find_by_label(label: &str) -> Option<&'static FoodItem> {
    all().iter().find(|food| food.matches_label(label))
}

fn build_catalog() -> Vec<FoodItem> {
    vec![
        FoodItem::new(
            "apple",
            "Apple",
            "1 medium",
            NutritionInfo::new(95.0, 0.5, 25.0, 0.3).with_fiber(4.4),
            "fruit",
        )
        .with_localized_name("Elma"),
        FoodItem::new(
            "banana",
            "Banana",
            "1 medium",
            NutritionInfo::new(105.0, 1.3, 27.0, 0.4).with_fiber(3.1),
            "fruit",
        )
        .with_localized_name("Muz"),
        FoodItem::new(
            "grilled-chicken",
            "Grilled Chicken Breast",
            "100 g",
            NutritionInfo::new(165.0, 31.0, 0.0, 3.6),
            "protein",
        )
        .with_localized_name("Izgara Tavuk"),
        FoodItem::new(
            "boiled-egg",
            "Boiled Egg",
            "1 large",
            NutritionInfo::new(78.0, 6.3, 0.6, 5.3),
            "protein",
        )
        .with_localized_name("Haşlanmış Yumurta"),
        FoodItem::new(
            "lentil-soup",
            "Lentil Soup",
            "1 bowl",
            NutritionInfo::new(180.0, 9.0, 30.0, 2.5).with_fiber(8.0),
            "soup",
        )
        .with_localized_name("Mercimek Çorbası"),
        FoodItem::new(
            "rice-pilaf",
            "Rice Pilaf",
            "1 cup",
            NutritionInfo::new(205.0, 4.3, 45.0, 0.4).with_fiber(0.6),
            "grain",
        )
        .with_localized_name("Pirinç Pilavı"),
        FoodItem::new(
            "white-bread",
            "White Bread",
            "1 slice",
            NutritionInfo::new(80.0, 2.7, 15.0, 1.0).with_fiber(0.8),
            "grain",
        )
        .with_localized_name("Beyaz Ekmek"),
        FoodItem::new(
            "yogurt",
            "Yogurt",
            "1 cup",
            NutritionInfo::new(150.0, 8.5, 11.4, 8.0),
            "dairy",
        )
        .with_localized_name("Yoğurt"),
        FoodItem::new(
            "menemen",
            "Menemen",
            "1 portion",
            NutritionInfo::new(220.0, 10.0, 9.0, 16.0).with_fiber(2.0),
            "breakfast",
        ),
        FoodItem::new(
            "doner",
            "Doner Kebab",
            "1 wrap",
            NutritionInfo::new(550.0, 28.0, 45.0, 28.0).with_fiber(3.0),
            "fast_food",
        )
        .with_localized_name("Döner"),
        FoodItem::new(
            "simit",
            "Simit",
            "1 piece",
            NutritionInfo::new(290.0, 9.0, 55.0, 4.0).with_fiber(2.2),
            "bakery",
        ),
        FoodItem::new(
            "baklava",
            "Baklava",
            "1 piece",
            NutritionInfo::new(245.0, 3.5, 26.0, 15.0).with_fiber(1.0),
            "dessert",
        ),
        FoodItem::new(
            "green-salad",
            "Green Salad",
            "1 bowl",
            NutritionInfo::new(35.0, 1.5, 6.0, 0.5).with_fiber(2.5),
            "vegetable",
        )
        .with_localized_name("Yeşil Salata"),
        FoodItem::new(
            "grilled-salmon",
            "Grilled Salmon",
            "100 g",
            NutritionInfo::new(208.0, 20.0, 0.0, 13.0),
            "protein",
        )
        .with_localized_name("Izgara Somon"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<_> = all().iter().map(|food| food.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), all().len());
    }

    #[test]
    fn test_search_matches_name_substring() {
        let results = search("grilled");
        assert!(results.iter().any(|f| f.id == "grilled-chicken"));
        assert!(results.iter().any(|f| f.id == "grilled-salmon"));
    }

    #[test]
    fn test_search_matches_localized_name() {
        let results = search("mercimek");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "lentil-soup");
    }

    #[test]
    fn test_search_no_match_is_empty() {
        assert!(search("pizza with pineapple").is_empty());
    }

    #[test]
    fn test_find_by_id() {
        assert!(find_by_id("apple").is_some());
        assert!(find_by_id("missing").is_none());
    }

    #[test]
    fn test_find_by_label_exact_only() {
        assert!(find_by_label("apple").is_some());
        assert!(find_by_label("Elma").is_some());
        assert!(find_by_label("app").is_none());
    }
}
