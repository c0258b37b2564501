//! Primitive, enumeration and date generators.

use super::RandomValue;
use crate::context::Context;
use crate::corpus;
use crate::data::Length;
use crate::error::{PopulateError, Result};
use crate::types::{DateKind, EnumDesc, ScalarKind};
use crate::value::{DateValue, EnumValue, Value};
use chrono::DateTime;
use rand::Rng;
use std::time::{Duration, UNIX_EPOCH};

/// Exclusive upper bound of generated instants: 2300-03-15T14:20:00Z.
pub const MAX_DATE_MILLIS: i64 = 10_420_150_800_000;

/// Full-range numbers, booleans, characters and strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomPrimitive {
    kind: ScalarKind,
}

impl RandomPrimitive {
    pub fn new(kind: ScalarKind) -> Self {
        RandomPrimitive { kind }
    }
}

impl RandomValue for RandomPrimitive {
    fn value(&self, ctx: &mut Context<'_>, length: Length) -> Result<Value> {
        let max_chars = length.or(ctx.config().string_length);
        let mut rng = ctx.rng();
        let value = match self.kind {
            ScalarKind::Bool => Value::Bool(rng.gen()),
            ScalarKind::Char => Value::Char(rng.gen()),
            ScalarKind::I8 => Value::I8(rng.gen()),
            ScalarKind::I16 => Value::I16(rng.gen()),
            ScalarKind::I32 => Value::I32(rng.gen()),
            ScalarKind::I64 => Value::I64(rng.gen()),
            ScalarKind::I128 => Value::I128(rng.gen()),
            ScalarKind::Isize => Value::Isize(rng.gen()),
            ScalarKind::U8 => Value::U8(rng.gen()),
            ScalarKind::U16 => Value::U16(rng.gen()),
            ScalarKind::U32 => Value::U32(rng.gen()),
            ScalarKind::U64 => Value::U64(rng.gen()),
            ScalarKind::U128 => Value::U128(rng.gen()),
            ScalarKind::Usize => Value::Usize(rng.gen()),
            ScalarKind::F32 => Value::F32(signed_unit(&mut *rng) as f32 * f32::MAX),
            ScalarKind::F64 => Value::F64(signed_unit(&mut *rng) * f64::MAX),
            ScalarKind::String => Value::String(corpus::text(&mut *rng, max_chars)),
        };
        Ok(value)
    }
}

// Uniform in (-1, 1).
fn signed_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let magnitude: f64 = rng.gen();
    if rng.gen() {
        magnitude
    } else {
        -magnitude
    }
}

/// Uniform pick among the declared constants of an enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomEnum {
    desc: EnumDesc,
}

impl RandomEnum {
    pub fn new(desc: EnumDesc) -> Self {
        RandomEnum { desc }
    }
}

impl RandomValue for RandomEnum {
    fn value(&self, ctx: &mut Context<'_>, _length: Length) -> Result<Value> {
        let constants = self.desc.constants();
        if constants.is_empty() {
            return Err(PopulateError::invalid_argument(format!(
                "Enumeration {} has no constants.",
                self.desc.key()
            )));
        }
        let index = ctx.rng().gen_range(0..constants.len());
        Ok(Value::Enum(EnumValue {
            key: self.desc.key(),
            index,
            name: constants[index],
        }))
    }
}

/// Uniform instant between the Unix epoch and [`MAX_DATE_MILLIS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomDate {
    kind: DateKind,
}

impl RandomDate {
    pub fn new(kind: DateKind) -> Self {
        RandomDate { kind }
    }
}

impl RandomValue for RandomDate {
    fn value(&self, ctx: &mut Context<'_>, length: Length) -> Result<Value> {
        if !length.is_default() {
            return Err(PopulateError::invalid_argument(
                "Random date does not support maximum length.",
            ));
        }
        if let DateKind::Other(key) = self.kind {
            return Err(PopulateError::unsupported(key.name()));
        }

        let millis = ctx.rng().gen_range(0..MAX_DATE_MILLIS);
        let instant = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
            PopulateError::internal(format!("{millis} ms is outside the supported date range"))
        })?;
        let date = match self.kind {
            DateKind::Utc => DateValue::Utc(instant),
            DateKind::NaiveDateTime => DateValue::NaiveDateTime(instant.naive_utc()),
            DateKind::NaiveDate => DateValue::NaiveDate(instant.date_naive()),
            DateKind::NaiveTime => DateValue::NaiveTime(instant.time()),
            DateKind::SystemTime => {
                DateValue::SystemTime(UNIX_EPOCH + Duration::from_millis(millis as u64))
            }
            DateKind::Other(key) => return Err(PopulateError::unsupported(key.name())),
        };
        Ok(Value::Date(date))
    }
}
