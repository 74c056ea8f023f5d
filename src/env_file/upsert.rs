//! Keyed line upsert for `KEY=VALUE` files.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// What an upsert did to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No line carried the key; a new line was added at the end.
    Appended,
    /// An existing line for the key was rewritten.
    Replaced,
    /// The file already held exactly this value.
    Unchanged,
}

/// Set `key` to `value` in `content`.
///
/// The first `KEY=` line is rewritten in place and any later `KEY=` lines are
/// dropped; without a match the line is appended. All other lines keep their
/// text, line ending and order. The result always ends with a line ending,
/// `\r\n` when the content already uses it, `\n` otherwise.
pub fn upsert_content(content: &str, key: &str, value: &str) -> String {
    let prefix = format!("{key}=");
    let eol = if content.contains("\r\n") { "\r\n" } else { "\n" };

    let mut out = String::with_capacity(content.len() + key.len() + value.len() + 2);
    let mut written = false;
    for segment in content.split_inclusive('\n') {
        let line = segment
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(segment);
        let ending = match &segment[line.len()..] {
            "" => eol,
            ending => ending,
        };

        if line.starts_with(&prefix) {
            if written {
                continue;
            }
            written = true;
            out.push_str(&prefix);
            out.push_str(value);
        } else {
            out.push_str(line);
        }
        out.push_str(ending);
    }
    if !written {
        out.push_str(&prefix);
        out.push_str(value);
        out.push_str(eol);
    }

    out
}

/// Upsert `key=value` into the file at `path`.
///
/// A missing file is seeded from `template` when that exists, otherwise it
/// starts empty. The file is only written when its content changes.
pub fn upsert_file(
    path: &Path,
    template: Option<&Path>,
    key: &str,
    value: &str,
) -> std::io::Result<UpsertOutcome> {
    let current = match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(e),
    };

    let base = match (&current, template) {
        (Some(content), _) => content.clone(),
        (None, Some(template)) if template.is_file() => {
            tracing::info!(
                template = %template.display(),
                path = %path.display(),
                "Seeding environment file from template"
            );
            fs::read_to_string(template)?
        }
        (None, _) => String::new(),
    };

    let prefix = format!("{key}=");
    let had_key = base.lines().any(|line| line.starts_with(&prefix));
    let updated = upsert_content(&base, key, value);

    if current.as_deref() == Some(updated.as_str()) {
        return Ok(UpsertOutcome::Unchanged);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, updated)?;

    Ok(if had_key {
        UpsertOutcome::Replaced
    } else {
        UpsertOutcome::Appended
    })
}
