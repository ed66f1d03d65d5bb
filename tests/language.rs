use cfglang_core::{json, parse_config, parse_config_with, ErrorKind, ParseOptions, Value};
use serde_json::json;

fn to_json(src: &str) -> serde_json::Value {
    let value = parse_config(src).unwrap_or_else(|e| panic!("failed to parse {src:?}: {e}"));
    json::to_json_value(&value).unwrap()
}

fn assert_kind(src: &str, kind: ErrorKind) {
    match parse_config(src) {
        Ok(v) => panic!("{src:?} should fail, got {v}"),
        Err(e) => assert_eq!(e.kind, kind, "{src:?}: {e}"),
    }
}

#[test]
fn single_pair_dictionary() {
    assert_eq!(to_json("@{ k = 'v'; }"), json!({"k": "v"}));
}

#[test]
fn top_level_array() {
    assert_eq!(to_json("[1 2 3 'four']"), json!([1, 2, 3, "four"]));
}

#[test]
fn output_keys_match_declared_keys() {
    let value = parse_config("@{ a = 1; b = 'x'; c = [1]; d = @{ }; }").unwrap();
    let keys: Vec<&String> = value.as_dict().unwrap().keys().collect();
    assert_eq!(keys, vec!["a", "b", "c", "d"]);
    assert_eq!(value.get("c"), Some(&Value::Array(vec![Value::Integer(1)])));
}

#[test]
fn constants_resolve_in_declaration_order() {
    assert_eq!(to_json("set A = 1; set B = $A + 1$; @{ x = $B$; }"), json!({"x": 2}));
    assert_eq!(to_json("set B = $A + 1$; set A = 1; @{ x = $B$; }"), json!({"x": "A1"}));
}

#[test]
fn constants_add_across_declarations() {
    let src = "
        set BASE = 8000;
        set OFFSET = 80;

        @{
            port = $BASE + OFFSET$;
        }
    ";
    assert_eq!(to_json(src), json!({"port": 8080}));
}

#[test]
fn len_agrees_with_counts() {
    assert_eq!(to_json("@{ n = $len('hello')$; }"), json!({"n": 5}));
    assert_eq!(to_json("@{ n = $len(['a' 'b' 'c'])$; }"), json!({"n": 3}));
}

#[test]
fn string_coercing_addition() {
    assert_eq!(to_json("set S = 'x'; @{ v = $5 + S$; w = $S + 5$; }"), json!({"v": "5x", "w": "x5"}));
}

#[test]
fn nested_dictionaries() {
    assert_eq!(
        to_json("@{ db = @{ host = 'localhost'; port = 5432; }; }"),
        json!({"db": {"host": "localhost", "port": 5432}})
    );
}

#[test]
fn comments_never_reach_the_grammar() {
    let src = "
        /#
        a multi-line
        comment with @{ broken = ; } inside
        #/
        @{
            key = 'value';  /# inline #/
            url = 'http://x/#anchor#/';
        }
    ";
    assert_eq!(to_json(src), json!({"key": "value", "url": "http://x/#anchor#/"}));
}

#[test]
fn malformed_input_is_a_syntax_error() {
    let err = parse_config("@{ port = ; }").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    assert!(err.position.is_some());
    assert_eq!(err.to_string(), "syntax error at line 1, column 11: expected a value, found ';'");
}

#[test]
fn error_kinds() {
    assert_kind("@{ a = 'unterminated; }", ErrorKind::Syntax);
    assert_kind("@{ a = [1 2; }", ErrorKind::Syntax);
    assert_kind("@{ a = $len('a' 'b')$; }", ErrorKind::Syntax);
    assert_kind("@{ a = $upper('a')$; }", ErrorKind::UnknownFunction);
    assert_kind("set N = 1; @{ a = $len(N)$; }", ErrorKind::UnsupportedOperation);
    assert_kind("set L = [1]; @{ a = $L + 1$; }", ErrorKind::UnsupportedOperation);
    assert_kind("@{ a = $9223372036854775807 + 1$; }", ErrorKind::UnsupportedOperation);
}

#[test]
fn strict_mode_is_opt_in() {
    assert_eq!(to_json("@{ flag = on; }"), json!({"flag": "on"}));
    let err = parse_config_with("@{ flag = on; }", &ParseOptions::strict()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownVariable);
}

#[test]
fn last_dictionary_wins() {
    assert_eq!(to_json("@{ a = 1; } @{ b = 2; }"), json!({"b": 2}));
}

#[test]
fn reparsing_is_idempotent() {
    let src = "set A = 'x'; set B = $A + len(A)$; @{ v = $B$; list = [A B]; }";
    let first = parse_config(src).unwrap();
    let second = parse_config(src).unwrap();
    assert_eq!(first, second);
    assert_eq!(json::to_json_string(&first, false).unwrap(), r#"{"v":"x1","list":["x","x1"]}"#);
}
