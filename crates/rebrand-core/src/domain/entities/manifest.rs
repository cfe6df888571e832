//! Field-scoped edits on the project manifest (`pubspec.yaml`).
//!
//! The manifest is treated as key-scoped text, not parsed into a document:
//! only the lines of the targeted top-level keys are rewritten, everything
//! else (dependency blocks, comments, line endings) survives byte-for-byte.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{IconSet, RenameSpec},
    value_objects::IconRole,
};

/// Top-level key the icon generator reads its configuration from.
pub const ICON_DIRECTIVES_KEY: &str = "flutter_launcher_icons";

/// Full original bytes of the manifest, captured before the icon phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSnapshot {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl ManifestSnapshot {
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Which platforms the icon generator should emit icons for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconPlatforms {
    pub android: bool,
    pub ios: bool,
    pub web: bool,
    pub windows: bool,
    pub macos: bool,
}

impl Default for IconPlatforms {
    fn default() -> Self {
        Self {
            android: true,
            ios: true,
            web: true,
            windows: true,
            macos: true,
        }
    }
}

/// Pure text transformations on the manifest.
pub struct ManifestEditor;

impl ManifestEditor {
    /// Set `name`, `version`, and (if supplied) `description`.
    pub fn apply(text: &str, spec: &RenameSpec) -> String {
        let mut doc = Lines::parse(text);

        doc.set_scalar("name", &spec.new_identity().snake_name, None);
        if let Some(description) = spec.description() {
            doc.set_scalar("description", &yaml_scalar(description), Some("name"));
        }
        doc.set_scalar("version", &spec.version().to_string(), Some("name"));

        doc.render()
    }

    /// Append a launcher-icon block, replacing any existing one.
    pub fn with_icon_directives(text: &str, icons: &IconSet, platforms: &IconPlatforms) -> String {
        let mut doc = Lines::parse(text);
        doc.remove_block(ICON_DIRECTIVES_KEY);

        let eol = doc.eol;
        let mut block = format!("{ICON_DIRECTIVES_KEY}:{eol}");
        for line in icon_directive_lines(icons, platforms) {
            block.push_str(&line);
            block.push_str(eol);
        }

        let mut out = doc.render();
        if !out.is_empty() && !out.ends_with('\n') {
            out.push_str(eol);
        }
        out.push_str(&block);
        out
    }
}

fn icon_directive_lines(icons: &IconSet, platforms: &IconPlatforms) -> Vec<String> {
    let main = icons.get(IconRole::Main).map(quoted_path);
    let mut lines = Vec::new();

    let android_source = icons.get(IconRole::Main).is_some()
        || icons.get(IconRole::AdaptiveForeground).is_some();
    lines.push(format!("  android: {}", platforms.android && android_source));
    lines.push(format!("  ios: {}", platforms.ios && main.is_some()));

    if let Some(main) = &main {
        lines.push(format!("  image_path: {main}"));
        if platforms.ios {
            lines.push("  remove_alpha_ios: true".into());
        }
    }

    if platforms.android {
        for (role, key) in [
            (IconRole::AdaptiveBackground, "adaptive_icon_background"),
            (IconRole::AdaptiveForeground, "adaptive_icon_foreground"),
            (IconRole::AdaptiveMonochrome, "adaptive_icon_monochrome"),
        ] {
            if let Some(path) = icons.get(role) {
                lines.push(format!("  {key}: {}", quoted_path(path)));
            }
        }
    }

    if let Some(main) = &main {
        for (enabled, platform) in [
            (platforms.web, "web"),
            (platforms.windows, "windows"),
            (platforms.macos, "macos"),
        ] {
            if enabled {
                lines.push(format!("  {platform}:"));
                lines.push("    generate: true".into());
                lines.push(format!("    image_path: {main}"));
            }
        }
    }

    lines
}

fn quoted_path(path: &Path) -> String {
    double_quoted(&path.display().to_string())
}

fn double_quoted(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Render `value` as a YAML scalar, quoting when a plain scalar would be
/// misread.
fn yaml_scalar(value: &str) -> String {
    const RESERVED: &[&str] = &["true", "false", "yes", "no", "on", "off", "null", "~"];

    let plain_char = |c: char| c.is_alphanumeric() || " .,!?()-_/'".contains(c);
    let plain = value.chars().next().is_some_and(char::is_alphanumeric)
        && value.chars().all(plain_char)
        && !value.ends_with(' ')
        && !RESERVED.contains(&value.to_ascii_lowercase().as_str())
        && !looks_numeric(value);

    if plain {
        value.to_string()
    } else {
        double_quoted(value)
    }
}

/// Numbers, dates and times would be read back as something other than a
/// string.
fn looks_numeric(value: &str) -> bool {
    value.parse::<f64>().is_ok()
        || (value.starts_with(|c: char| c.is_ascii_digit())
            && value.chars().all(|c| c.is_ascii_digit() || ".-_:+".contains(c)))
}

// ── line model ───────────────────────────────────────────────────────────────

const BOM: char = '\u{feff}';

/// The manifest as a list of lines, each keeping its own terminator. A
/// leading byte-order mark is held apart so the first key still matches.
struct Lines {
    bom: bool,
    lines: Vec<String>,
    eol: &'static str,
}

impl Lines {
    fn parse(text: &str) -> Self {
        let eol = if text.contains("\r\n") { "\r\n" } else { "\n" };
        let (bom, body) = match text.strip_prefix(BOM) {
            Some(body) => (true, body),
            None => (false, text),
        };
        Self {
            bom,
            lines: body.split_inclusive('\n').map(str::to_string).collect(),
            eol,
        }
    }

    fn render(&self) -> String {
        let mut out = String::new();
        if self.bom {
            out.push(BOM);
        }
        out.push_str(&self.lines.concat());
        out
    }

    /// Index of the top-level `key:` line.
    fn find_key(&self, key: &str) -> Option<usize> {
        self.lines.iter().position(|line| {
            line.strip_prefix(key)
                .and_then(|rest| rest.strip_prefix(':'))
                .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t', '\r', '\n']))
        })
    }

    /// Indented continuation lines following `index` (multi-line scalars or
    /// nested mappings). Blank lines count only when more indented lines
    /// follow them.
    fn continuation_end(&self, index: usize) -> usize {
        let mut end = index + 1;
        let mut cursor = index + 1;
        while cursor < self.lines.len() {
            let line = &self.lines[cursor];
            if line.trim().is_empty() {
                cursor += 1;
                continue;
            }
            if line.starts_with([' ', '\t']) {
                cursor += 1;
                end = cursor;
                continue;
            }
            break;
        }
        end
    }

    fn set_scalar(&mut self, key: &str, value: &str, insert_after: Option<&str>) {
        if let Some(index) = self.find_key(key) {
            let end = self.continuation_end(index);
            let old = &self.lines[index];
            let after_colon = &old[key.len() + 1..];
            let (body, line_end) = split_line_end(after_colon);
            let trailer = trailing_comment(body);
            let new_line = format!("{key}: {value}{trailer}{line_end}");
            // a multi-line value collapses into the single rewritten line
            let line_end = if line_end.is_empty() && end > index + 1 {
                self.eol
            } else {
                ""
            };
            self.lines
                .splice(index..end, [format!("{new_line}{line_end}")]);
            return;
        }

        let position = insert_after
            .and_then(|anchor| self.find_key(anchor))
            .map_or(0, |anchor| self.continuation_end(anchor));

        if position > 0 {
            let previous = &mut self.lines[position - 1];
            if !previous.ends_with('\n') {
                previous.push_str(self.eol);
            }
        }
        self.lines
            .insert(position, format!("{key}: {value}{}", self.eol));
    }

    fn remove_block(&mut self, key: &str) {
        if let Some(index) = self.find_key(key) {
            let end = self.continuation_end(index);
            self.lines.drain(index..end);
        }
    }
}

fn split_line_end(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// The ` # comment` tail of a scalar line, including its leading whitespace.
fn trailing_comment(body: &str) -> &str {
    let value = body.trim_start();
    let offset = body.len() - value.len();

    let search_from = match value.chars().next() {
        Some(q @ ('"' | '\'')) => match value[1..].find(q) {
            Some(close) => close + 2,
            None => return "",
        },
        _ => 0,
    };

    let rest = &value[search_from..];
    let hash = rest
        .match_indices('#')
        .map(|(i, _)| i)
        .find(|&i| i == 0 && search_from > 0 || i > 0 && rest[..i].ends_with([' ', '\t']));

    match hash {
        Some(i) => {
            let tail_start = offset + search_from + i;
            let with_space = body[..tail_start].trim_end_matches([' ', '\t']).len();
            &body[with_space..]
        }
        None => "",
    }
}
