use super::*;

#[test]
fn test_every_scalar_kind_matches_request() {
    let populator = seeded(1);
    let kinds = [
        ScalarKind::Bool,
        ScalarKind::Char,
        ScalarKind::I8,
        ScalarKind::I16,
        ScalarKind::I32,
        ScalarKind::I64,
        ScalarKind::I128,
        ScalarKind::Isize,
        ScalarKind::U8,
        ScalarKind::U16,
        ScalarKind::U32,
        ScalarKind::U64,
        ScalarKind::U128,
        ScalarKind::Usize,
        ScalarKind::F32,
        ScalarKind::F64,
        ScalarKind::String,
    ];
    for kind in kinds {
        for _ in 0..20 {
            let value = populator.create(&TypeDesc::Scalar(kind)).unwrap();
            let expected = match kind {
                ScalarKind::String => "string",
                other => other.name(),
            };
            assert_eq!(value.kind(), expected);
        }
    }
}

#[test]
fn test_typed_scalars() {
    let populator = seeded(2);
    let _: bool = populator.new_instance().unwrap();
    let _: char = populator.new_instance().unwrap();
    let x: f64 = populator.new_instance().unwrap();
    assert!(x.is_finite());
    let s: String = populator.new_instance().unwrap();
    assert!((1..=45).contains(&s.chars().count()));
}

#[test]
fn test_string_length_hint() {
    let populator = seeded(3);
    for max in [1, 2, 10] {
        for _ in 0..50 {
            let s = populator
                .new_instance_with_length::<String>(Length(max))
                .unwrap()
                .unwrap();
            assert!((1..=max).contains(&s.chars().count()), "{s:?}");
        }
    }
}

#[test]
fn test_full_range_integers() {
    let populator = seeded(4);
    let values: Vec<i64> = (0..200)
        .map(|_| populator.new_instance().unwrap())
        .collect();
    assert!(values.iter().any(|&x| x < 0));
    assert!(values.iter().any(|&x| x > i64::from(i32::MAX)));
}

#[test]
fn test_enum_constants_are_uniformish() {
    let populator = seeded(5);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        seen.insert(populator.new_instance::<Weekday>().unwrap());
    }
    assert_eq!(seen.len(), 5);
}

#[test]
fn test_config_string_length() {
    let populator = Populator::with_config(Config::default().with_string_length(3));
    for _ in 0..50 {
        let s: String = populator.new_instance().unwrap();
        assert!(s.chars().count() <= 3);
    }
}

#[test]
fn test_reseed_is_reproducible() {
    let populator = Populator::new();
    populator.reseed(99);
    let first: Person = populator.new_instance().unwrap();
    populator.reseed(99);
    let second: Person = populator.new_instance().unwrap();
    assert_eq!(first, second);
}
