use std::fs;
use std::path::Path;

use cfglang_core::{json, parse_config};
use walkdir::WalkDir;

#[test]
fn samples_match_their_json() {
    let mut count = 0;

    for entry in WalkDir::new("samples").into_iter()
                                        .filter_map(Result::ok)
                                        .filter(|e| e.path().extension().is_some_and(|ext| ext == "cfg"))
    {
        let path = entry.path();
        let source = fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("json");
        let expected = read_json(&expected_path);

        let value = parse_config(&source).unwrap_or_else(|e| panic!("{path:?} failed to parse: {e}"));
        let actual = json::to_json_value(&value).unwrap();
        assert_eq!(actual, expected, "{path:?} does not match {expected_path:?}");
        count += 1;
    }

    assert!(count > 0, "No samples found in samples/");
}

#[test]
fn sample_key_order_is_preserved() {
    let source = fs::read_to_string("samples/server.cfg").unwrap();
    let value = parse_config(&source).unwrap();
    let keys: Vec<&String> = value.as_dict().unwrap().keys().collect();
    assert_eq!(keys, vec!["server_host", "server_port", "admin_port"]);
}

fn read_json(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path).unwrap_or_else(|e| panic!("Missing expectation {path:?}: {e}"));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("Invalid JSON in {path:?}: {e}"))
}
