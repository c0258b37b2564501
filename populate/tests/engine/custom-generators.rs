use super::*;
use std::path::PathBuf;
use url::Url;

#[derive(Populate, Debug, Clone, Default, PartialEq)]
pub struct Money {
    pub currency: String,
    pub cents: i64,
}

/// Always euros, a hundred at most.
#[derive(Default)]
struct SmallEuros;

impl RandomValue for SmallEuros {
    fn value(&self, ctx: &mut Context<'_>, _length: Length) -> Result<Value> {
        use rand::Rng;
        let cents = ctx.rng().gen_range(0..=10_000);
        Ok(Value::Custom(CustomValue::new(Money {
            currency: "EUR".to_string(),
            cents,
        })))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Isbn(String);

impl Reflect for Isbn {
    fn type_desc() -> TypeDesc {
        TypeDesc::opaque::<Self>()
    }

    fn from_value(value: Value) -> Result<Self> {
        value.into_custom()
    }
}

#[derive(Default)]
struct RandomIsbn;

impl RandomValue for RandomIsbn {
    fn value(&self, ctx: &mut Context<'_>, _length: Length) -> Result<Value> {
        // Nested requests go through the context like any other.
        let digits: Vec<u8> = (0..13)
            .map(|_| ctx.instance::<u8>(Length::DEFAULT))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .flatten()
            .map(|d| d % 10)
            .collect();
        let text: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
        Ok(Value::Custom(CustomValue::new(Isbn(text))))
    }
}

#[test]
fn test_builtin_url_generator() {
    let populator = seeded(50);
    for limit in [20, 25, 60, 128] {
        for _ in 0..30 {
            let url = populator
                .new_instance_with_length::<Url>(Length(limit))
                .unwrap()
                .unwrap();
            assert!(url.as_str().len() <= limit, "{url}");
        }
    }
    let url: Url = populator.new_instance().unwrap();
    assert!(url.as_str().len() <= 128);
}

#[test]
fn test_short_url_limit_is_rejected() {
    let populator = Populator::new();
    let err = populator
        .new_instance_with_length::<Url>(Length(19))
        .unwrap_err();
    assert!(matches!(err, PopulateError::InvalidArgument { .. }));
}

#[test]
fn test_builtin_path_and_time_zone_generators() {
    let populator = seeded(51);
    for _ in 0..30 {
        let path: PathBuf = populator.new_instance().unwrap();
        let segments = path.components().count() - 1;
        assert!((2..=10).contains(&segments));
        assert!(path.as_os_str().len() <= 128);
        let zone: chrono_tz::Tz = populator.new_instance().unwrap();
        assert!(!zone.name().is_empty());
    }
}

#[test]
fn test_registered_generator_overrides_composite() {
    let populator = seeded(52);
    let money: Money = populator.new_instance().unwrap();
    assert_ne!(money.currency, "EUR");

    populator.register::<Money, SmallEuros>();
    for _ in 0..20 {
        let money: Money = populator.new_instance().unwrap();
        assert_eq!(money.currency, "EUR");
        assert!((0..=10_000).contains(&money.cents));
    }

    assert!(populator.unregister::<Money>());
    let value = populator.create(&Money::type_desc()).unwrap();
    assert!(value.as_record().is_some());
}

#[test]
fn test_opaque_type_needs_registration() {
    let populator = seeded(53);
    let err = populator.new_instance::<Isbn>().unwrap_err();
    assert!(matches!(err, PopulateError::UnsupportedType { .. }));

    populator.register::<Isbn, RandomIsbn>();
    let Isbn(text) = populator.new_instance().unwrap();
    assert_eq!(text.len(), 13);
    assert!(text.bytes().all(|b| b.is_ascii_digit()));

    populator.unregister::<Isbn>();
    let err = populator.new_instance::<Isbn>().unwrap_err();
    assert!(err.to_string().starts_with("No random generator for"));
}

#[test]
fn test_typed_registration_sees_descriptor() {
    fn build(ty: &TypeDesc) -> Box<dyn RandomValue> {
        let name = ty.to_string();
        assert!(name.ends_with("Isbn"));
        Box::new(|_ctx: &mut Context<'_>, _length: Length| -> Result<Value> {
            Ok(Value::Custom(CustomValue::new(Isbn("9780000000000".into()))))
        })
    }

    let populator = Populator::new();
    populator.register_typed::<Isbn>(build);
    assert_eq!(
        populator.new_instance::<Isbn>().unwrap(),
        Isbn("9780000000000".into())
    );
}

#[test]
fn test_builtins_can_be_unregistered() {
    let populator = Populator::new();
    assert!(populator.is_registered::<Url>());
    assert!(populator.unregister::<Url>());
    assert!(populator.new_instance::<Url>().is_err());
    populator.register::<Url, RandomUrl>();
    assert!(populator.new_instance::<Url>().is_ok());
}
