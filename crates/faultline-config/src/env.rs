use std::sync::OnceLock;

use regex::{Captures, Regex};

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `{{ env.NAME }}` or `{{ env.NAME | default("value") }}`
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

/// Substitute `{{ env.NAME }}` placeholders in raw config text
///
/// A `| default("value")` suffix is used when the variable is unset.
/// Comment lines are left untouched so commented-out settings never fail.
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut lines = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_owned());
            continue;
        }

        let mut failure = None;
        let expanded = placeholder().replace_all(line, |caps: &Captures<'_>| {
            resolve(caps).unwrap_or_else(|e| {
                failure.get_or_insert(e);
                String::new()
            })
        });

        if let Some(e) = failure {
            return Err(e);
        }
        lines.push(expanded.into_owned());
    }

    let mut output = lines.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn resolve(caps: &Captures<'_>) -> Result<String, String> {
    let key = &caps[1];
    let Some(name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    match (std::env::var(name), caps.get(2)) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.as_str().to_owned()),
        (Err(_), None) => Err(format!("environment variable not found: `{name}`")),
    }
}
