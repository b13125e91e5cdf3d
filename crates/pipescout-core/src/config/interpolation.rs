//! `${VAR}` and `${VAR:-default}` expansion for config values

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterpolationError {
    #[error("Required environment variable not found: {0}")]
    RequiredVarNotFound(String),

    #[error("Recursive interpolation limit exceeded")]
    RecursionLimit,
}

pub type InterpolationResult<T> = Result<T, InterpolationError>;

const MAX_DEFAULT_DEPTH: usize = 10;

static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("Invalid regex pattern")
});

pub fn interpolate(input: &str) -> InterpolationResult<String> {
    interpolate_with(input, &|name| std::env::var(name).ok(), 0)
}

/// Expands variables using `lookup` instead of the process environment
pub fn interpolate_with_lookup(
    input: &str, lookup: &dyn Fn(&str) -> Option<String>,
) -> InterpolationResult<String> {
    interpolate_with(input, lookup, 0)
}

fn interpolate_with(
    input: &str, lookup: &dyn Fn(&str) -> Option<String>, depth: usize,
) -> InterpolationResult<String> {
    if depth > MAX_DEFAULT_DEPTH {
        return Err(InterpolationError::RecursionLimit);
    }

    let mut output = String::with_capacity(input.len());
    let mut last = 0;

    for cap in VAR_PATTERN.captures_iter(input) {
        let (Some(whole), Some(name)) = (cap.get(0), cap.get(1)) else {
            continue;
        };

        output.push_str(&input[last..whole.start()]);

        let value = match (lookup(name.as_str()), cap.get(2)) {
            (Some(value), _) => value,
            // Defaults may reference other variables
            (None, Some(default)) => interpolate_with(default.as_str(), lookup, depth + 1)?,
            (None, None) => {
                return Err(InterpolationError::RequiredVarNotFound(
                    name.as_str().to_string(),
                ))
            }
        };

        output.push_str(&value);
        last = whole.end();
    }

    output.push_str(&input[last..]);
    Ok(output)
}

/// Expands every string inside a parsed TOML document
pub fn interpolate_toml(
    value: &mut toml::Value, lookup: &dyn Fn(&str) -> Option<String>,
) -> InterpolationResult<()> {
    match value {
        toml::Value::String(s) => {
            *s = interpolate_with_lookup(s, lookup)?;
        }
        toml::Value::Array(items) => {
            for item in items {
                interpolate_toml(item, lookup)?;
            }
        }
        toml::Value::Table(table) => {
            for (_, v) in table.iter_mut() {
                interpolate_toml(v, lookup)?;
            }
        }
        _ => {}
    }
    Ok(())
}
