// tests/test_records.rs
//
// Foo/Bar records: field round trips, schema shape, JSON and validation

use datamap_bench::{
    build_records, codec, validate, Bar, DataMap, Foo, GetMode, RecordTemplate, SetMode,
    TemplateError, Value,
};

#[test]
fn test_set_then_get_int() {
    for value in [54, 0, -1, i32::MIN, i32::MAX] {
        let mut bar = Bar::new();
        bar.set_int(value).unwrap();
        assert_eq!(bar.int().unwrap(), value);
    }
}

#[test]
fn test_foo_returns_attached_bar() {
    let foo = build_records(54).unwrap();
    let bar = foo.record().unwrap().expect("record is set");
    assert_eq!(bar.int().unwrap(), 54);
    assert_eq!(bar, {
        let mut b = Bar::new();
        b.set_int(54).unwrap();
        b
    });
}

#[test]
fn test_replacing_record() {
    let mut foo = build_records(1).unwrap();
    let mut other = Bar::new();
    other.set_int(2).unwrap();
    foo.set_record(other).unwrap();
    assert_eq!(foo.record().unwrap().unwrap().int().unwrap(), 2);
}

#[test]
fn test_foo_rejects_null_record() {
    let mut foo = Foo::new();
    let err = foo
        .put_wrapped::<Bar>("record", None, SetMode::DisallowNull)
        .unwrap_err();
    assert_eq!(err.to_string(), "cannot set field \"record\" of record Foo to null");
}

#[test]
fn test_wrapped_type_mismatch() {
    // Foo stored under Foo.record has the wrong record type
    let mut foo = Foo::new();
    let err = foo
        .put_wrapped("record", Some(Foo::new()), SetMode::DisallowNull)
        .unwrap_err();
    assert!(matches!(err, TemplateError::TypeMismatch { .. }));

    let mut data = DataMap::new();
    data.insert("record", 7);
    let broken = Foo::from_data(data);
    assert!(matches!(
        broken.obtain_wrapped::<Bar>("record", GetMode::Strict),
        Err(TemplateError::TypeMismatch { .. })
    ));
}

#[test]
fn test_records_encode_and_validate() {
    let foo = build_records(54).unwrap();
    let text = codec::to_json(foo.data()).unwrap();
    assert_eq!(text, r#"{"record":{"int":54}}"#);

    let decoded = codec::from_json(&text).unwrap();
    assert!(validate(&decoded, Foo::schema()).is_valid());
    assert_eq!(Foo::from_data(decoded), foo);
}

#[test]
fn test_empty_foo_fails_validation() {
    let result = validate(Foo::new().data(), Foo::schema());
    assert!(!result.is_valid());
    assert_eq!(result.messages()[0].path, "/record");

    let mut bar_data = DataMap::new();
    bar_data.insert("int", Value::Long(1 << 40));
    let mut foo_data = DataMap::new();
    foo_data.insert("record", bar_data);
    let result = validate(&foo_data, Foo::schema());
    assert_eq!(result.messages()[0].to_string(), "/record/int :: long is not backed by a int");
}

#[test]
fn test_schema_json_round_trip() {
    let json = Foo::schema().to_json();
    let reparsed = datamap_bench::parse_record_schema(&json.to_string()).unwrap();
    assert_eq!(&reparsed, Foo::schema());
}
