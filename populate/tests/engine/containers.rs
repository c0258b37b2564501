use super::*;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

#[test]
fn test_collections_stay_below_limit() {
    let populator = seeded(30);
    let element = TypeDesc::Scalar(ScalarKind::String);
    for kind in [
        CollectionKind::Collection,
        CollectionKind::List,
        CollectionKind::Deque,
        CollectionKind::Set,
        CollectionKind::SortedSet,
    ] {
        for _ in 0..30 {
            let value = populator.new_collection(kind, &element).unwrap();
            let Value::Collection(container, items) = value else {
                panic!("expected a collection");
            };
            assert_eq!(container, kind.implementation());
            assert!(items.len() < 10);
            assert!(items.iter().all(|item| item.as_str().is_some()));
        }
    }
}

#[test]
fn test_maps_stay_below_limit() {
    let populator = seeded(31);
    for _ in 0..30 {
        let value = populator
            .new_map(
                MapKind::Map,
                &TypeDesc::Scalar(ScalarKind::U32),
                &Person::type_desc(),
            )
            .unwrap();
        let entries = value.entries().unwrap();
        assert!(entries.len() < 10);
        assert!(entries.iter().all(|(_, v)| v.as_record().is_some()));
    }
}

#[test]
fn test_typed_containers() {
    let populator = seeded(32);
    for _ in 0..20 {
        let list: Vec<Person> = populator.new_instance().unwrap();
        assert!(list.len() < 10);
        let deque: VecDeque<u8> = populator.new_instance().unwrap();
        assert!(deque.len() < 10);
        let set: BTreeSet<bool> = populator.new_instance().unwrap();
        assert!(set.len() <= 2);
        let map: HashMap<String, Vec<i32>> = populator.new_instance().unwrap();
        assert!(map.len() < 10);
        let by_day: HashMap<Weekday, u8> = populator.new_instance().unwrap();
        assert!(by_day.len() <= 5);
        let sorted: BTreeMap<u8, String> = populator.new_instance().unwrap();
        assert!(sorted.len() < 10);
        let array: Box<[u16]> = populator.new_instance().unwrap();
        assert!(array.len() < 10);
    }
}

#[test]
fn test_non_parameterized_containers_are_rejected() {
    let populator = Populator::new();
    let err = populator
        .create(&TypeDesc::raw_collection(CollectionKind::List))
        .unwrap_err();
    assert!(matches!(err, PopulateError::InvalidArgument { .. }));
    assert_eq!(err.to_string(), "Non-parameterized collections are not supported");

    let err = populator.create(&TypeDesc::raw_map(MapKind::SortedMap)).unwrap_err();
    assert!(matches!(err, PopulateError::InvalidArgument { .. }));
}

#[test]
fn test_container_limit_is_configurable() {
    let populator = Populator::with_config(Config::default().with_container_limit(2));
    populator.reseed(33);
    for _ in 0..30 {
        let list: Vec<String> = populator.new_instance().unwrap();
        assert!(list.len() < 2);
    }
}

#[derive(Populate, Debug, Clone, Default)]
struct Diary {
    #[populate(max_length = 30)]
    days: Vec<chrono::NaiveDate>,
    #[populate(max_length = 10)]
    links: Vec<url::Url>,
    #[populate(max_length = 2)]
    paths: Box<[std::path::PathBuf]>,
    #[populate(max_length = 3)]
    tags: Vec<String>,
}

#[test]
fn test_container_field_length_does_not_reach_elements() {
    let populator = seeded(34);
    let mut longest_tag = 0;
    for _ in 0..50 {
        let diary: Diary = populator.new_instance().unwrap();
        assert!(diary.days.len() < 10);
        assert!(diary.links.len() < 10);
        assert!(diary.paths.len() < 10);
        for tag in &diary.tags {
            longest_tag = longest_tag.max(tag.chars().count());
        }
    }
    assert!(longest_tag > 3);
}

#[test]
fn test_configured_container_length_does_not_reach_elements() {
    let populator = seeded(35);
    populator
        .configure_xml(
            r#"<test-data>
                 <class name="engine::containers::Diary">
                   <field name="days" length="4"/>
                   <field name="links" length="5"/>
                 </class>
               </test-data>"#,
        )
        .unwrap();
    for _ in 0..50 {
        let diary: Diary = populator.new_instance().unwrap();
        assert!(diary.tags.is_empty());
        assert!(diary.paths.is_empty());
    }
}

#[test]
fn test_length_hint_on_top_level_containers_is_ignored() {
    let populator = seeded(36);
    for _ in 0..30 {
        let days = populator
            .new_instance_with_length::<Vec<chrono::NaiveDate>>(Length(5))
            .unwrap()
            .unwrap();
        assert!(days.len() < 10);
        let times = populator
            .new_instance_with_length::<Box<[chrono::NaiveTime]>>(Length(5))
            .unwrap()
            .unwrap();
        assert!(times.len() < 10);
        let set = populator
            .new_instance_with_length::<BTreeSet<std::path::PathBuf>>(Length(1))
            .unwrap()
            .unwrap();
        assert!(set.len() < 10);
        let by_date = populator
            .new_instance_with_length::<BTreeMap<String, chrono::NaiveDate>>(Length(2))
            .unwrap()
            .unwrap();
        assert!(by_date.len() < 10);
    }
}
