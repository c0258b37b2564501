use super::*;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn upper_bound() -> DateTime<Utc> {
    "2300-03-15T14:20:00Z".parse().unwrap()
}

#[test]
fn test_dates_fall_between_epoch_and_bound() {
    let populator = seeded(40);
    for _ in 0..100 {
        let instant: DateTime<Utc> = populator.new_instance().unwrap();
        assert!(instant >= DateTime::<Utc>::UNIX_EPOCH && instant < upper_bound());

        let naive: NaiveDateTime = populator.new_instance().unwrap();
        assert!(naive < upper_bound().naive_utc());

        let date: NaiveDate = populator.new_instance().unwrap();
        assert!(date >= NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
        assert!(date <= upper_bound().date_naive());

        let _: NaiveTime = populator.new_instance().unwrap();

        let system: SystemTime = populator.new_instance().unwrap();
        let millis = system.duration_since(UNIX_EPOCH).unwrap();
        assert!(millis < Duration::from_millis(10_420_150_800_000));
    }
}

#[test]
fn test_dates_reject_length() {
    let populator = Populator::new();
    let err = populator
        .new_instance_with_length::<NaiveDate>(Length(10))
        .unwrap_err();
    assert!(matches!(err, PopulateError::InvalidArgument { .. }));
    assert_eq!(err.to_string(), "Random date does not support maximum length.");
}

#[test]
fn test_unrecognized_date_kind_is_unsupported() {
    let populator = Populator::new();
    let err = populator
        .new_instance::<DateTime<FixedOffset>>()
        .unwrap_err();
    assert!(matches!(err, PopulateError::UnsupportedType { .. }));
    assert!(err.to_string().starts_with("No random generator for"));
}
