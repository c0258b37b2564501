use super::*;

const PERSON_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<test-data>
  <class name="engine::Person">
    <field name="id"/>
    <field name="name" length="5"/>
  </class>
</test-data>"#;

#[test]
fn test_configured_fields_replace_discovery() {
    assert_eq!(std::any::type_name::<Person>(), "engine::Person");
    let populator = seeded(60);
    populator.configure_xml(PERSON_XML).unwrap();

    let fields = populator.fields_of::<Person>().unwrap();
    let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["id", "name"]);
    assert_eq!(fields[1].max_length(), Length(5));

    for _ in 0..30 {
        let value = populator.create(&Person::type_desc()).unwrap();
        let record = value.as_record().unwrap();
        assert!(record.contains("id"));
        assert!(!record.contains("surname"));
        let person = Person::from_value(value).unwrap();
        assert!((1..=5).contains(&person.name.chars().count()));
        assert!(person.surname.is_empty());
        assert_eq!(person.email, None);
    }
}

#[test]
fn test_clearing_configuration_restores_discovery() {
    let populator = Populator::new();
    populator.configure_xml(PERSON_XML).unwrap();
    populator.clear_configuration();
    assert_eq!(populator.fields_of::<Person>().unwrap().len(), 4);
}

#[test]
fn test_programmatic_configuration() {
    let populator = seeded(61);
    populator.configure(
        FieldConfig::new()
            .with_field(std::any::type_name::<Person>(), "surname", Some(2))
            .with_field(std::any::type_name::<Person>(), "created", None),
    );
    for _ in 0..30 {
        let person: Person = populator.new_instance().unwrap();
        assert!(person.name.is_empty());
        assert!((1..=2).contains(&person.surname.chars().count()));
    }
}

#[test]
fn test_unknown_configured_field_fails_on_use() {
    let populator = Populator::new();
    populator
        .configure_xml(
            r#"<test-data><class name="engine::Person"><field name="nickname"/></class></test-data>"#,
        )
        .unwrap();
    let err = populator.new_instance::<Person>().unwrap_err();
    assert!(matches!(err, PopulateError::InvalidConfig { .. }));
    // Other types are unaffected.
    let _: String = populator.new_instance().unwrap();
}

#[test]
fn test_malformed_documents_are_rejected() {
    let populator = Populator::new();
    for document in [
        "<test-data><class name=\"a::B\"><field name=\"x\" length=\"-1\"/></class></test-data>",
        "<test-data><field name=\"x\"/></test-data>",
        "<test-data><class name=\"a::B\"></test-data>",
    ] {
        let err = populator.configure_xml(document).unwrap_err();
        assert!(matches!(err, PopulateError::InvalidConfig { .. }), "{document}");
    }
}

#[test]
fn test_configuration_from_file() {
    let path = std::env::temp_dir().join(format!("populate-fields-{}.xml", std::process::id()));
    std::fs::write(&path, PERSON_XML).unwrap();
    let populator = Populator::new();
    populator.configure_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(populator.fields_of::<Person>().unwrap().len(), 2);

    let err = populator.configure_file(&path).unwrap_err();
    assert!(matches!(err, PopulateError::InvalidConfig { .. }));
}
