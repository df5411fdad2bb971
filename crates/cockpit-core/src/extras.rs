//! The extras footer: rendering and the remove-then-append body rewrite.
//!
//! The footer is the owned trailing region of an issue body:
//!
//!   ---
//!   **Documentation:** docs/auth.md
//!   **Assets:** cdn/auth
//!   **Checklist:**
//!   - [ ] write tests
//!   - [ ] ship PR
//!
//! On every sync the whole region is removed and rebuilt from the CSV row.
//! Everything here is pure string manipulation; no network, no I/O.

use crate::row::CockpitRow;

pub const DOCS_MARKER: &str = "**Documentation:**";
pub const ASSETS_MARKER: &str = "**Assets:**";
pub const CHECKLIST_MARKER: &str = "**Checklist:**";

const MARKERS: [&str; 3] = [DOCS_MARKER, ASSETS_MARKER, CHECKLIST_MARKER];
const SEPARATOR: &str = "---";

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

// The strip walks the footer line by line; a quoted CSV cell may embed
// line breaks, and rendered verbatim those lines could not be attributed
// to the footer on the next run.
fn single_line(value: &str) -> String {
    value
        .lines()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the checklist cell as unchecked task-list items, one per
/// semicolon-separated segment. Segments are trimmed and rendered on one
/// line each; empty segments are dropped; order is preserved.
pub fn format_checklist(raw: &str) -> String {
    raw.split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| format!("- [ ] {}", single_line(item)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the extras block for a row. Each of the three sections appears
/// only when its cell is non-empty; embedded line breaks in cell values
/// collapse to spaces; `None` when all three are empty.
pub fn render_extras(row: &CockpitRow) -> Option<String> {
    let mut lines = Vec::new();
    if !row.docs.is_empty() {
        lines.push(format!("{DOCS_MARKER} {}", single_line(&row.docs)));
    }
    if !row.assets.is_empty() {
        lines.push(format!("{ASSETS_MARKER} {}", single_line(&row.assets)));
    }
    if !row.checklist.is_empty() {
        lines.push(format!("{CHECKLIST_MARKER}\n{}", format_checklist(&row.checklist)));
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// Body rewrite
// ---------------------------------------------------------------------------

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn is_marker_line(line: &str) -> bool {
    MARKERS.iter().any(|marker| line.starts_with(marker))
}

fn is_checklist_item(line: &str) -> bool {
    // A box ticked in the tracker UI is still part of the owned footer.
    line.starts_with("- [ ]") || line.starts_with("- [x]") || line.starts_with("- [X]")
}

fn is_separator(line: &str) -> bool {
    line.trim() == SEPARATOR
}

/// Index of the separator line opening the owned trailing footer, if the
/// body ends with one. The region must run to the end of the body, contain
/// at least one marker line, and consist only of marker lines, checklist
/// items, and blanks. Anything else after the separator means the trailing
/// block is no longer ours.
fn footer_start(lines: &[&str]) -> Option<usize> {
    let mut saw_marker = false;
    for (idx, line) in lines.iter().enumerate().rev() {
        if is_separator(line) {
            return if saw_marker { Some(idx) } else { None };
        }
        if is_marker_line(line) {
            saw_marker = true;
        } else if !is_blank(line) && !is_checklist_item(line) {
            return None;
        }
    }
    None
}

/// Remove the owned trailing footer (if present) and any stray marker
/// lines elsewhere in the body.
fn strip_extras(body: &str) -> String {
    let mut lines: Vec<&str> = body.lines().collect();
    if let Some(start) = footer_start(&lines) {
        lines.truncate(start);
    }
    let kept: Vec<&str> = lines.into_iter().filter(|line| !is_marker_line(line)).collect();
    kept.join("\n")
}

/// The remove-then-append rewrite: strip the previous footer from `body`,
/// then append a separator and the freshly rendered `extras` block.
/// `extras` must be non-empty; callers skip the rewrite entirely when
/// `render_extras` yields nothing. Applying the same extras twice yields
/// the same body as applying them once.
pub fn apply_extras(body: &str, extras: &str) -> String {
    let stripped = strip_extras(body);
    format!("{}\n\n{SEPARATOR}\n\n{extras}", stripped.trim_end())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
