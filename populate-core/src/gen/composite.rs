//! Composite (struct-like) population.

use super::RandomValue;
use crate::context::Context;
use crate::data::Length;
use crate::error::Result;
use crate::types::StructDesc;
use crate::value::{Record, Value};

/// Fills the resolved fields of a struct, one recursive request per field.
///
/// A field that comes back absent is recorded as such and keeps its
/// default value when the record is converted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomComposite {
    desc: StructDesc,
}

impl RandomComposite {
    pub fn new(desc: StructDesc) -> Self {
        RandomComposite { desc }
    }
}

impl RandomValue for RandomComposite {
    fn value(&self, ctx: &mut Context<'_>, _length: Length) -> Result<Value> {
        let fields = ctx.fields(&self.desc)?;
        let mut record = Record::new(self.desc.key());
        for field in fields.iter() {
            let value = ctx.create(field.ty(), field.max_length())?;
            record.set(field.name(), value);
        }
        Ok(Value::Record(record))
    }
}
