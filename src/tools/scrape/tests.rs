#[cfg(test)]
mod tests {
    use crate::tools::scrape::*;
    use serde_json::json;

    #[test]
    fn test_scrape_jsonld_skips_broken_blocks() {
        let html = r#"
            <html><head>
                <script type="application/ld+json">{ not json at all</script>
                <script type="application/ld+json">{"@type": "WebSite", "name": "Site"}</script>
                <script type="application/ld+json">{"@type": "Recipe", "name": "Salmon"}</script>
            </head><body></body></html>
        "#;

        let blocks = scrape_jsonld(html);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0]["@type"], "WebSite");
        assert_eq!(blocks[1]["name"], "Salmon");
    }

    #[test]
    fn test_scrape_jsonld_flattens_graph_and_arrays() {
        let html = r#"
            <script type="application/ld+json">
                {"@context": "https://schema.org", "@graph": [
                    {"@type": "Organization", "name": "Org"},
                    {"@type": "Recipe", "name": "Curry"}
                ]}
            </script>
            <script type="application/ld+json">[{"@type": "Recipe", "name": "Later"}]</script>
        "#;

        let blocks = scrape_jsonld(html);
        let names: Vec<&str> = blocks.iter().filter_map(|b| b["name"].as_str()).collect();
        assert_eq!(names, vec!["Org", "Curry", "Later"]);
    }

    #[test]
    fn test_find_recipe_returns_first_match() {
        let jsonld = vec![
            json!({"@type": "BreadcrumbList"}),
            json!({"@type": "Recipe", "name": "First"}),
            json!({"@type": "Recipe", "name": "Second"}),
        ];
        let recipe = find_recipe(&jsonld).unwrap();
        assert_eq!(recipe["name"], "First");
    }

    #[test]
    fn test_has_schema_type_accepts_type_arrays() {
        assert!(has_schema_type(&json!({"@type": ["Recipe", "HowTo"]}), "Recipe"));
        assert!(!has_schema_type(&json!({"@type": "HowTo"}), "Recipe"));
        assert!(!has_schema_type(&json!({"name": "untyped"}), "Recipe"));
    }

    #[test]
    fn test_parse_block_retries_comma_separated_objects() {
        let values = parse_jsonld_block(r#"{"@type": "A"}, {"@type": "B"}"#).unwrap();
        assert_eq!(values.len(), 2);
        assert!(parse_jsonld_block("   ").is_none());
    }

    #[test]
    fn test_no_recipe_when_none_declared() {
        let jsonld = scrape_jsonld("<html><body><h1>Nothing here</h1></body></html>");
        assert!(jsonld.is_empty());
        assert!(find_recipe(&jsonld).is_none());
    }
}
