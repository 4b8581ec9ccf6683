use recipe_gateway::parse::parse_recipe;
use recipe_gateway::presenter::{
    export_file_name, to_clipboard_summary, to_plain_text_document, TextExport,
};

const ALL_OPTIONAL: &str = r#"{
    "title": "Lemon Garlic Salmon",
    "cookingTime": "25 minutes",
    "servings": 2,
    "ingredients": ["2 salmon fillets", "1 lemon", "3 cloves garlic"],
    "steps": ["Preheat oven to 200C.", "Season the salmon.", "Bake 12 minutes."],
    "tips": "Do not overcook the fish.",
    "nutrition": {"calories": "410 kcal", "protein": "34g", "fat": "22g", "carbs": "6g"},
    "pairing": "Chablis"
}"#;

const NO_OPTIONAL: &str = r#"{
    "title": "Lemon Garlic Salmon",
    "cookingTime": "25 minutes",
    "servings": 2,
    "ingredients": ["2 salmon fillets", "1 lemon", "3 cloves garlic"],
    "steps": ["Preheat oven to 200C.", "Season the salmon.", "Bake 12 minutes."]
}"#;

#[test]
fn test_absent_sections_are_omitted() {
    let recipe = parse_recipe(NO_OPTIONAL, 2).unwrap();
    let doc = to_plain_text_document(&recipe);

    assert!(!doc.contains("CHEF'S TIPS"));
    assert!(!doc.contains("WINE PAIRING"));
    assert!(!doc.contains("NUTRITION"));
    assert!(doc.ends_with("3. Bake 12 minutes."));
    assert!(!doc.contains("\n\n\n"));
}

#[test]
fn test_present_sections_are_verbatim() {
    let recipe = parse_recipe(ALL_OPTIONAL, 2).unwrap();
    let doc = to_plain_text_document(&recipe);

    assert!(doc.starts_with("Lemon Garlic Salmon\n===================\n\n"));
    assert!(doc.contains("Cooking Time: 25 minutes\nServings: 2"));
    assert!(doc.contains("INGREDIENTS:\n1. 2 salmon fillets\n2. 1 lemon\n3. 3 cloves garlic"));
    assert!(doc.contains("STEPS:\n1. Preheat oven to 200C.\n2. Season the salmon.\n3. Bake 12 minutes."));
    assert!(doc.contains("CHEF'S TIPS:\nDo not overcook the fish."));
    assert!(doc.contains("WINE PAIRING:\nChablis"));
    assert!(doc.contains("Calories: 410 kcal\nProtein: 34g\nFat: 22g\nCarbs: 6g"));
}

#[test]
fn test_document_is_stable_under_reparse() {
    for raw in [ALL_OPTIONAL, NO_OPTIONAL] {
        let first = to_plain_text_document(&parse_recipe(raw, 2).unwrap());
        let second = to_plain_text_document(&parse_recipe(raw, 2).unwrap());
        assert_eq!(first, second);
    }
}

#[test]
fn test_clipboard_has_no_numbering() {
    let recipe = parse_recipe(ALL_OPTIONAL, 2).unwrap();
    let summary = to_clipboard_summary(&recipe);

    assert!(summary.starts_with("Lemon Garlic Salmon\n\nCooking Time: 25 minutes\nServings: 2\n\n"));
    assert!(summary.contains("Ingredients:\n2 salmon fillets\n1 lemon\n3 cloves garlic\n\n"));
    assert!(summary.ends_with("Steps:\nPreheat oven to 200C.\nSeason the salmon.\nBake 12 minutes."));
    assert!(!summary.contains("1. "));
    assert!(!summary.contains("Chablis"));
}

#[test]
fn test_file_names_are_safe() {
    let titles = [
        "Mediterranean Herb Chicken!",
        "Mom's BEST Lasagna (v2)",
        "  spaced  out  ",
        "Pão de Queijo",
        "100% Rye / Sourdough",
    ];
    for title in titles {
        let name = export_file_name(title);
        let stem = name.strip_suffix(".txt").unwrap();
        assert!(!stem.is_empty());
        assert!(stem
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
    }
    assert_eq!(
        export_file_name("Mediterranean Herb Chicken!"),
        "mediterranean_herb_chicken_.txt"
    );
}

#[test]
fn test_text_export() {
    let recipe = parse_recipe(ALL_OPTIONAL, 2).unwrap();
    let export = TextExport::from_recipe(&recipe);
    assert_eq!(export.file_name, "lemon_garlic_salmon.txt");
    assert_eq!(export.mime_type, "text/plain");
    assert_eq!(export.content, to_plain_text_document(&recipe));
}
