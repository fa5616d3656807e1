use objutil_core::{get, get_or, remove, set, to_path, AccessError, Path, PathSegment, Value, MAX_ARRAY_GAP};
use proptest::prop_assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn json(text: &str) -> Value {
    Value::from_json_str(text).unwrap()
}

#[test]
fn get_reads_nested_entry() {
    init_tracing();
    let src = json("{\"foo\":{\"bar\":\"none\"}}");
    assert_eq!(get(&Path::from(["foo", "bar"]), &src), Some(&Value::from("none")));
}

#[test]
fn get_with_custom_delimiter() {
    let src = json("{\"this\":{\"and\":{\"that\":true}}}");
    let delimiter = regex::Regex::new("[:;]").unwrap();
    let path = to_path("this;and:that", Some(&delimiter));
    assert_eq!(get(&path, &src), Some(&Value::from(true)));
    assert_eq!(get(&to_path("this.and/that", None), &src), Some(&Value::from(true)));
}

#[test]
fn get_stops_at_leaves_and_falsy_nodes() {
    let src = json("{\"name\":\"abc\",\"zero\":0,\"none\":null}");
    assert_eq!(get(&Path::parse("name.length"), &src), None);
    assert_eq!(get(&Path::parse("name.0"), &src), None);
    assert_eq!(get(&Path::parse("zero.x"), &src), None);
    assert_eq!(get(&Path::parse("none.x"), &src), None);
    assert_eq!(get(&Path::parse("zero"), &src), Some(&Value::from(0)));
    assert_eq!(get(&Path::parse("none"), &src), Some(&Value::Null));
}

#[test]
fn get_skips_empty_segments() {
    let src = json("{\"a\":{\"b\":1}}");
    assert_eq!(get(&Path::parse("a..b/"), &src), Some(&Value::from(1)));
    assert_eq!(get(&Path::parse(""), &src), Some(&src));
}

#[test]
fn get_or_falls_back_on_missing_and_undefined() {
    let src = Value::object([("gone", Value::Undefined), ("here", Value::from("x"))]);
    let fallback = Value::from("default");
    assert_eq!(get_or(&Path::parse("gone"), &src, &fallback), &fallback);
    assert_eq!(get_or(&Path::parse("missing.deep"), &src, &fallback), &fallback);
    assert_eq!(get_or(&Path::parse("here"), &src, &fallback), &Value::from("x"));
}

#[test]
fn set_creates_intermediate_objects() {
    init_tracing();
    let src = json("{\"foo\":\"bar\"}");
    let out = set(&Path::from(["test", "child"]), &src, Value::from("value")).unwrap();
    assert_eq!(out, json("{\"foo\":\"bar\",\"test\":{\"child\":\"value\"}}"));
    assert_eq!(src, json("{\"foo\":\"bar\"}"));
}

#[test]
fn set_overwrites_existing_entries() {
    let src = json("{\"foo\":{\"some\":\"bar\",\"bar\":\"none\"}}");
    let out = set(&Path::parse("foo.some"), &src, Value::from("value")).unwrap();
    assert_eq!(out, json("{\"foo\":{\"some\":\"value\",\"bar\":\"none\"}}"));
}

#[test]
fn set_into_arrays() {
    let src = json("{\"foo\":\"bar\",\"test\":[0,1,2]}");
    let out = set(&Path::parse("test.3"), &src, Value::from(3)).unwrap();
    assert_eq!(out, json("{\"foo\":\"bar\",\"test\":[0,1,2,3]}"));

    let out = set(&Path::parse("test/5"), &src, Value::from(5)).unwrap();
    let Some(Value::Array(items)) = get(&Path::parse("test"), &out) else {
        panic!("expected an array");
    };
    assert_eq!(items.len(), 6);
    assert!(items[3].is_undefined() && items[4].is_undefined());
    assert_eq!(out.to_json_value().unwrap()["test"], serde_json::json!([0, 1, 2, null, null, 5]));
}

#[test]
fn set_into_object_nested_in_array() {
    let src = json("{\"list\":[{\"a\":1},{\"a\":2}]}");
    let path = Path::new().with_segment("list").with_segment(PathSegment::index(1)).with_segment("b");
    let out = set(&path, &src, Value::from(true)).unwrap();
    assert_eq!(out, json("{\"list\":[{\"a\":1},{\"a\":2,\"b\":true}]}"));
}

#[test]
fn set_replaces_scalars_on_the_way() {
    let src = json("{\"a\":\"text\",\"b\":0}");
    let out = set(&Path::parse("a.x"), &src, Value::from(1)).unwrap();
    let out = set(&Path::parse("b.y"), &out, Value::from(2)).unwrap();
    assert_eq!(out, json("{\"a\":{\"x\":1},\"b\":{\"y\":2}}"));
}

#[test]
fn set_reports_bad_paths() {
    let src = json("{\"list\":[1,2]}");
    assert_eq!(set(&Path::parse(""), &src, Value::Null), Err(AccessError::EmptyPath));
    assert_eq!(set(&Path::parse("./"), &src, Value::Null), Err(AccessError::EmptyPath));

    let err = set(&Path::parse("list.name"), &src, Value::Null).unwrap_err();
    assert_eq!(err, AccessError::NotAnIndex { segment: "name".into(), path: Path::from(["list"]) });
    assert_eq!(err.to_string(), "segment \"name\" at [list] is not an array index");
}

#[test]
fn set_refuses_huge_array_indices() {
    let src = json("{\"list\":[0]}");
    for key in ["list.18446744073709551615", "list.100000000000"] {
        let err = set(&Path::parse(key), &src, Value::from(1)).unwrap_err();
        let AccessError::IndexOutOfRange { len, path, .. } = &err else {
            panic!("unexpected error for {key}: {err:?}");
        };
        assert_eq!((*len, path), (1, &Path::from(["list"])));
    }

    let err = set(&Path::parse("18446744073709551615"), &json("[0]"), Value::from(1)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "index 18446744073709551615 at [] is too far past the end of an array of length 1"
    );

    let far = (MAX_ARRAY_GAP + 1).to_string();
    assert!(set(&Path::from(["list", far.as_str()]), &src, Value::from(1)).is_ok());
}

#[test]
fn remove_embedded_array_value() {
    init_tracing();
    let src = json("{\"foo\":{\"bar\":[0,1,2]}}");
    let out = remove(&Path::from(["foo", "bar", "1"]), &src);
    assert_eq!(out, json("{\"foo\":{\"bar\":[0,2]}}"));
    assert_eq!(src, json("{\"foo\":{\"bar\":[0,1,2]}}"));
}

#[test]
fn remove_top_level_and_nested_keys() {
    let src = json("{\"foo\":\"bar\",\"nested\":{\"a\":1,\"b\":2}}");
    assert_eq!(remove(&Path::parse("foo"), &src), json("{\"nested\":{\"a\":1,\"b\":2}}"));
    assert_eq!(remove(&Path::parse("nested.a"), &src), json("{\"foo\":\"bar\",\"nested\":{\"b\":2}}"));
}

#[test]
fn remove_inside_array_element() {
    let src = json("[{\"a\":1,\"b\":2},{\"a\":3}]");
    assert_eq!(remove(&Path::parse("0.b"), &src), json("[{\"a\":1},{\"a\":3}]"));
}

#[test]
fn remove_along_missing_paths_copies() {
    let src = json("{\"list\":[1,2],\"s\":\"x\"}");
    for key in ["missing", "list.5", "list.name", "s.inner", ""] {
        assert_eq!(remove(&Path::parse(key), &src), src, "{key:?}");
    }
}

fn arb_json_value() -> impl proptest::strategy::Strategy<Value = serde_json::Value> {
    use proptest::{collection::btree_map, collection::vec, prelude::*, string::string_regex};

    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        (-1000i32..1000).prop_map(serde_json::Value::from),
        string_regex("[a-zA-Z0-9]{0,6}").unwrap().prop_map(serde_json::Value::String),
    ];

    leaf.prop_recursive(3, 6, 4, move |inner| {
        prop_oneof![
            vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
            btree_map(string_regex("[a-d]{1,2}").unwrap(), inner, 0..4).prop_map(|map| {
                let mut object = serde_json::Map::new();
                for (k, v) in map {
                    object.insert(k, v);
                }
                serde_json::Value::Object(object)
            }),
        ]
    })
}

fn arb_key_path() -> impl proptest::strategy::Strategy<Value = Vec<String>> {
    use proptest::{collection::vec, string::string_regex};

    vec(string_regex("[a-d]{1,2}").unwrap(), 1..4)
}

proptest::proptest! {
    #[test]
    fn get_returns_what_set_installed(src in arb_json_value(), keys in arb_key_path(), v in arb_json_value()) {
        let src = Value::from_json_value(src).unwrap();
        let v = Value::from_json_value(v).unwrap();
        let path = Path::from(keys);
        match set(&path, &src, v.clone()) {
            Ok(out) => prop_assert_eq!(get(&path, &out), Some(&v)),
            Err(err) => proptest::prop_assert!(
                matches!(err, AccessError::NotAnIndex { .. }),
                "unexpected error: {:?}",
                err
            ),
        }
    }

    #[test]
    fn remove_after_set_leaves_nothing(src in arb_json_value(), keys in arb_key_path()) {
        let src = Value::from_json_value(src).unwrap();
        let path = Path::from(keys);
        if let Ok(out) = set(&path, &src, Value::from("leaf")) {
            let removed = remove(&path, &out);
            prop_assert_eq!(get(&path, &removed), None);
        }
    }

    #[test]
    fn writes_leave_the_source_unchanged(src in arb_json_value(), keys in arb_key_path()) {
        let src = Value::from_json_value(src).unwrap();
        let snapshot = src.clone();
        let path = Path::from(keys);
        let _ = set(&path, &src, Value::Null);
        let _ = remove(&path, &src);
        prop_assert_eq!(src, snapshot);
    }
}
