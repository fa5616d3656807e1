use objutil_core::{deep_equals, merge, remove, set, stringify, underscore_keys, Path, Value};

#[test]
fn objutil_core_readme_example() -> Result<(), Box<dyn std::error::Error>> {
    let defaults = Value::from_json_str("{\"logLevel\":\"info\",\"listen\":{\"port\":80}}")?;
    let overrides = Value::from_yaml_str("listen:\n  host: 0.0.0.0\n")?;

    let config = merge([&defaults, &overrides]);
    let config = set(&Path::parse("listen.port"), &config, Value::from(8080))?;
    let config = remove(&Path::parse("logLevel"), &config);

    let rendered = stringify(&underscore_keys(&config), None, None).expect("root is defined");
    println!("{rendered}");
    assert_eq!(rendered, "{\"LISTEN\":{\"HOST\":\"0.0.0.0\",\"PORT\":8080}}");

    let reparsed = Value::from_json_str(&rendered)?;
    assert!(deep_equals(&reparsed, &underscore_keys(&config)));
    Ok(())
}
