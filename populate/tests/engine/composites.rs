use super::*;

#[test]
fn test_mutable_fields_are_populated() {
    let populator = seeded(10);
    for _ in 0..20 {
        let value = populator.create(&Person::type_desc()).unwrap();
        let record = value.as_record().unwrap();
        for field in ["name", "surname", "age", "email"] {
            assert!(record.get(field).is_some(), "{field} missing");
        }
        assert!(!record.contains("id"));
        assert!(!record.contains("created"));
    }
}

#[test]
fn test_identity_and_immutable_fields_keep_defaults() {
    let populator = seeded(11);
    for _ in 0..20 {
        let person: Person = populator.new_instance().unwrap();
        assert_eq!(person.id, 0);
        assert_eq!(person.created, 0);
        assert!(!person.name.is_empty());
        assert!(person.email.is_some());
    }
}

#[test]
fn test_fields_of_lists_discovered_fields() {
    let populator = Populator::new();
    let fields = populator.fields_of::<Person>().unwrap();
    let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["name", "surname", "age", "email"]);
    assert!(fields.iter().all(|f| f.max_length().is_default()));
}

#[test]
fn test_free_functions_use_thread_populator() {
    let person: Person = new_instance().unwrap();
    assert_eq!(person.id, 0);
}
