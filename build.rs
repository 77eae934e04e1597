use std::path::Path;

const CATALOG_PATH: &str = "catalogs/bakery.json";
const KINDS: [&str; 3] = ["ingredients", "products", "recipes"];

fn main() {
    validate_catalog_file(Path::new(CATALOG_PATH));
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the catalog file before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    assert!(
        catalog.get("version").and_then(|v| v.as_str()).is_some(),
        "\n\nCATALOG BUILD ERROR: Missing 'version' string field\n"
    );

    let mut total = 0;
    for kind in KINDS {
        let Some(entries) = catalog.get(kind) else {
            continue;
        };
        let entries = entries.as_array().unwrap_or_else(|| {
            panic!(
                "\n\nCATALOG BUILD ERROR: '{kind}' must be an array\n\
                 Got: {entries}\n"
            );
        });
        validate_entries(kind, entries);
        total += entries.len();
    }

    println!("cargo:warning=Validated catalog: {total} entries");
}

fn validate_entries(kind: &str, entries: &[serde_json::Value]) {
    let mut seen = std::collections::HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        let id = match entry.get("id") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => panic!(
                "\n\nCATALOG BUILD ERROR: {kind} entry at index {index} missing string or numeric 'id'\n"
            ),
        };

        assert!(
            entry.get("name").and_then(|v| v.as_str()).is_some(),
            "\n\nCATALOG BUILD ERROR: {kind} entry '{id}' (index {index}) missing 'name' field\n"
        );

        if let Some(code) = entry.get("code") {
            assert!(
                code.is_string(),
                "\n\nCATALOG BUILD ERROR: {kind} entry '{id}' has a non-string 'code'\n"
            );
        }

        assert!(
            seen.insert(id.clone()),
            "\n\nCATALOG BUILD ERROR: duplicate {kind} id '{id}'\n"
        );
    }
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed={CATALOG_PATH}");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
