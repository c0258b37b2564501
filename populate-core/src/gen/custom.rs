//! Built-in registered generators: URLs, file paths and time zones.

use super::RandomValue;
use crate::context::Context;
use crate::corpus::{self, TLDS};
use crate::data::Length;
use crate::error::{PopulateError, Result};
use crate::value::{CustomValue, Value};
use rand::seq::SliceRandom;
use rand::Rng;
use std::path::{PathBuf, MAIN_SEPARATOR_STR};
use url::Url;

const SCHEMES: &[&str] = &["http", "ftp"];

/// Shortest URL limit accepted.
pub const MIN_URL_LENGTH: usize = 20;

/// Shortest file path limit accepted: a root and two one-character segments.
pub const MIN_PATH_LENGTH: usize = 4;

const MAX_LABEL_LENGTH: usize = 63;

/// Random `http` or `ftp` URL with a host of one to four labels under a real
/// top-level domain.
///
/// The serialized URL, including the `/` path the parser adds, fits within
/// the requested length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomUrl;

impl RandomValue for RandomUrl {
    fn value(&self, ctx: &mut Context<'_>, length: Length) -> Result<Value> {
        if !length.is_default() && length.get() < MIN_URL_LENGTH {
            return Err(PopulateError::invalid_argument(
                "URL can't have less than 20 chars.",
            ));
        }
        let limit = length.or(ctx.config().url_length).max(MIN_URL_LENGTH);

        let mut rng = ctx.rng();
        let scheme = SCHEMES[rng.gen_range(0..SCHEMES.len())];
        let prefix = format!("{scheme}://");
        let budget = limit - prefix.len() - 1;
        let host = host(&mut *rng, budget)?;

        let url = Url::parse(&format!("{prefix}{host}"))
            .map_err(|err| PopulateError::internal_with(format!("bad URL host {host}"), err))?;
        Ok(Value::Custom(CustomValue::new(url)))
    }
}

fn host<R: Rng + ?Sized>(rng: &mut R, budget: usize) -> Result<String> {
    let mut labels = rng.gen_range(1..=4usize);
    // Each label takes at least one character and one dot.
    let tld = loop {
        let fits: Vec<&String> = TLDS
            .iter()
            .filter(|tld| tld.len() + 2 * labels <= budget)
            .collect();
        if let Some(&tld) = fits.choose(rng) {
            break tld.as_str();
        }
        if labels == 1 {
            return Err(PopulateError::internal(format!(
                "no top-level domain fits in {budget} characters"
            )));
        }
        labels -= 1;
    };

    let label_length = ((budget - tld.len() - labels) / labels).min(MAX_LABEL_LENGTH);
    let mut parts = Vec::with_capacity(labels + 1);
    for _ in 0..labels {
        let mut label = corpus::name(rng, label_length);
        while label.starts_with("xn--") {
            label = corpus::name(rng, label_length);
        }
        parts.push(label);
    }
    parts.push(tld.to_owned());
    Ok(parts.join("."))
}

/// Random absolute file path of two to ten segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomFile;

impl RandomValue for RandomFile {
    fn value(&self, ctx: &mut Context<'_>, length: Length) -> Result<Value> {
        let limit = length.or(ctx.config().path_length);
        if limit < MIN_PATH_LENGTH {
            return Err(PopulateError::invalid_argument(format!(
                "File path can't have less than {MIN_PATH_LENGTH} chars."
            )));
        }

        let mut rng = ctx.rng();
        let segments = rng.gen_range(2..=10usize).min(limit / 2);
        let segment_length = limit / segments - 1;
        let path: String = (0..segments)
            .map(|_| format!("{MAIN_SEPARATOR_STR}{}", corpus::name(&mut *rng, segment_length)))
            .collect();
        Ok(Value::Custom(CustomValue::new(PathBuf::from(path))))
    }
}

/// Uniform pick among the time zones of the IANA database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomTimeZone;

impl RandomValue for RandomTimeZone {
    fn value(&self, ctx: &mut Context<'_>, _length: Length) -> Result<Value> {
        let zone = chrono_tz::TZ_VARIANTS
            .choose(&mut *ctx.rng())
            .copied()
            .ok_or_else(|| PopulateError::internal("time zone database is empty"))?;
        Ok(Value::Custom(CustomValue::new(zone)))
    }
}
