// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report rendering
//!
//! Reports are rendered with Jinja-style templates. The report itself is the
//! template context and a fixed set of helpers is registered alongside the
//! minijinja builtins:
//!
//! | helper | result |
//! |---|---|
//! | `format_time(ts)` | `YYYY-MM-DD HH:MM:SS` |
//! | `format_date(ts)` | `January 15, 2024` |
//! | `short_hash(id)` | first 8 characters of a commit id |
//! | `join(seq, sep)` | items joined with `sep` |
//! | `add(a, b)`, `sub(a, b)` | integer arithmetic |
//! | `sorted_keys(map)` | keys in lexicographic order |
//! | `sorted_file_types(map)` | `"label: count"`, most frequent first |
//!
//! The one-argument helpers are also available as filters, so
//! `{{ commit.timestamp | format_time }}` works too. Undefined values are
//! errors; test optional fields with `is defined`.

use std::fs;
use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use minijinja::value::ValueKind;
use minijinja::{Environment, Error, ErrorKind, UndefinedBehavior, Value};
use tracing::debug;
use worklog_git::commit::short_id;

use crate::error::TemplateError;
use crate::report::Report;

/// Template used when none is supplied: a numbered list of commit messages
pub const DEFAULT_TEMPLATE: &str = "\
{% for commit in commits %}
# {{ loop.index }}. {{ commit.message }}
{% endfor %}
";

/// A parsed report template with its helper environment
pub struct Renderer {
    env: Environment<'static>,
    source: String,
}

impl Renderer {
    /// Load the template at `path`, or the built-in default when `None`
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Read` if the file cannot be read and
    /// `TemplateError::Syntax` if it is not a valid template.
    pub fn new(path: Option<&Path>) -> Result<Self, TemplateError> {
        match path {
            Some(path) => {
                let source = fs::read_to_string(path).map_err(|source| TemplateError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                debug!(path = %path.display(), "loaded report template");
                Self::from_source(source)
            }
            None => Self::from_source(DEFAULT_TEMPLATE),
        }
    }

    /// Build a renderer from template text
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Syntax` if the text is not a valid template.
    pub fn from_source(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        let env = environment();
        env.template_from_str(&source)
            .map_err(TemplateError::from_minijinja)?;
        Ok(Self { env, source })
    }

    /// Render a report
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Render` if evaluation fails; nothing is
    /// returned in that case.
    pub fn render(&self, report: &Report) -> Result<String, TemplateError> {
        self.env
            .render_str(&self.source, report)
            .map_err(TemplateError::from_minijinja)
    }
}

/// Render a report with the template at `path`, or the built-in default
///
/// # Errors
///
/// Returns `TemplateError` if the template cannot be loaded or evaluated.
pub fn render(report: &Report, path: Option<&Path>) -> Result<String, TemplateError> {
    Renderer::new(path)?.render(report)
}

fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_trim_blocks(true);
    env.set_keep_trailing_newline(true);

    env.add_function("format_time", format_time);
    env.add_function("format_date", format_date);
    env.add_function("short_hash", short_hash);
    env.add_function("join", join);
    env.add_function("add", add);
    env.add_function("sub", sub);
    env.add_function("sorted_keys", sorted_keys);
    env.add_function("sorted_file_types", sorted_file_types);

    env.add_filter("format_time", format_time);
    env.add_filter("format_date", format_date);
    env.add_filter("short_hash", short_hash);
    env.add_filter("sorted_keys", sorted_keys);
    env.add_filter("sorted_file_types", sorted_file_types);
    env
}

/// Parse a serialized timestamp; plain dates are taken as midnight UTC
fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, Error> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::default()).and_utc().fixed_offset())
        .map_err(|e| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("'{value}' is not a timestamp: {e}"),
            )
        })
}

fn format_time(value: &str) -> Result<String, Error> {
    Ok(parse_timestamp(value)?
        .format("%Y-%m-%d %H:%M:%S")
        .to_string())
}

fn format_date(value: &str) -> Result<String, Error> {
    Ok(parse_timestamp(value)?.format("%B %-d, %Y").to_string())
}

fn short_hash(id: &str) -> String {
    short_id(id).to_string()
}

fn join(items: Vec<String>, separator: &str) -> String {
    items.join(separator)
}

fn add(a: i64, b: i64) -> i64 {
    a.saturating_add(b)
}

fn sub(a: i64, b: i64) -> i64 {
    a.saturating_sub(b)
}

fn map_keys(map: &Value) -> Result<Vec<Value>, Error> {
    if map.kind() != ValueKind::Map {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("expected a mapping, got {}", map.kind()),
        ));
    }
    Ok(map.try_iter()?.collect())
}

fn sorted_keys(map: Value) -> Result<Vec<String>, Error> {
    let mut keys: Vec<String> = map_keys(&map)?.iter().map(ToString::to_string).collect();
    keys.sort();
    Ok(keys)
}

fn sorted_file_types(map: Value) -> Result<Vec<String>, Error> {
    let mut entries = map_keys(&map)?
        .into_iter()
        .map(|key| {
            let count = i64::try_from(map.get_item(&key)?)?;
            Ok((key.to_string(), count))
        })
        .collect::<Result<Vec<(String, i64)>, Error>>()?;
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(entries
        .into_iter()
        .map(|(label, count)| format!("{label}: {count}"))
        .collect())
}
