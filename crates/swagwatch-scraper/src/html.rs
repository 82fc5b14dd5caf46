//! Swag code extraction from a companion page's post table.
//!
//! The page carries one `<article>` whose first `<table>` lists post details
//! as label/value rows. The row labelled "Swag Code" holds either the code as
//! text or, for dynamic codes, an anchor with class `p_dynamic_code_link`
//! pointing at the claim URL.

use std::sync::LazyLock;

use regex::Regex;
use swagwatch_core::SwagCode;

use crate::error::ScrapeError;

const LABEL_NEEDLE: &str = "swag code";
const LABEL_CLASS: &str = "p_label";
const VALUE_CLASS: &str = "p_value";
const DYNAMIC_LINK_CLASS: &str = "p_dynamic_code_link";

static ARTICLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<article\b[^>]*>(.*?)</article\s*>").expect("valid article regex")
});
static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<table\b[^>]*>(.*?)</table\s*>").expect("valid table regex")
});
static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr\s*>").expect("valid row regex"));
static CELL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<t[dh]\b([^>]*)>(.*?)</t[dh]\s*>").expect("valid cell regex")
});
static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b([^>]*)>").expect("valid anchor regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[^>]+>").expect("valid tag regex"));
static BREAK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:br|/?(?:p|div|li))\b[^>]*>").expect("valid break tag regex")
});

#[derive(Debug, Clone, Copy)]
struct Cell<'h> {
    attrs: &'h str,
    inner: &'h str,
}

/// Extracts the swag code from a companion page.
///
/// # Errors
///
/// - [`ScrapeError::MissingArticle`] / [`ScrapeError::MissingTable`] when the
///   page lacks the expected structure.
/// - [`ScrapeError::MissingSwagCodeRow`] when no row's label contains
///   "swag code" (case-insensitive).
/// - [`ScrapeError::EmptyValue`] when the matching row has no value, an empty
///   value, or a dynamic-code anchor without a target.
pub fn extract_swag_code(html: &str) -> Result<SwagCode, ScrapeError> {
    let article = first_inner(&ARTICLE_RE, html).ok_or(ScrapeError::MissingArticle)?;
    let table = first_inner(&TABLE_RE, article).ok_or(ScrapeError::MissingTable)?;

    for row in ROW_RE.captures_iter(table) {
        let row_html = row.get(1).map_or("", |m| m.as_str());
        let cells = parse_cells(row_html);

        let Some(label_idx) = label_index(&cells) else {
            continue;
        };
        if !cell_text(cells[label_idx].inner)
            .to_lowercase()
            .contains(LABEL_NEEDLE)
        {
            continue;
        }

        let value = value_cell(&cells, label_idx).ok_or(ScrapeError::EmptyValue)?;
        return swag_code_from_cell(value);
    }

    Err(ScrapeError::MissingSwagCodeRow)
}

fn first_inner<'h>(re: &Regex, haystack: &'h str) -> Option<&'h str> {
    re.captures(haystack)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

fn parse_cells(row_html: &str) -> Vec<Cell<'_>> {
    CELL_RE
        .captures_iter(row_html)
        .map(|cap| Cell {
            attrs: cap.get(1).map_or("", |m| m.as_str()),
            inner: cap.get(2).map_or("", |m| m.as_str()),
        })
        .collect()
}

/// The `p_label` cell if present, otherwise the first cell of a multi-cell row.
fn label_index(cells: &[Cell<'_>]) -> Option<usize> {
    cells
        .iter()
        .position(|c| has_class(c.attrs, LABEL_CLASS))
        .or_else(|| (cells.len() >= 2).then_some(0))
}

/// The first `p_value` cell after the label, otherwise the cell right after it.
fn value_cell<'h>(cells: &[Cell<'h>], label_idx: usize) -> Option<Cell<'h>> {
    let rest = cells.get(label_idx + 1..)?;
    rest.iter()
        .find(|c| has_class(c.attrs, VALUE_CLASS))
        .or_else(|| rest.first())
        .copied()
}

fn swag_code_from_cell(cell: Cell<'_>) -> Result<SwagCode, ScrapeError> {
    let dynamic_anchor = ANCHOR_RE
        .captures_iter(cell.inner)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .find(|attrs| has_class(attrs, DYNAMIC_LINK_CLASS));

    if let Some(attrs) = dynamic_anchor {
        let href = extract_attr(attrs, "href")
            .map(|raw| html_escape::decode_html_entities(&raw).trim().to_string())
            .filter(|href| !href.is_empty())
            .ok_or(ScrapeError::EmptyValue)?;
        return Ok(SwagCode::link(href));
    }

    let text = cell_text(cell.inner);
    if text.is_empty() {
        return Err(ScrapeError::EmptyValue);
    }
    Ok(SwagCode::direct(text))
}

fn has_class(attrs: &str, class: &str) -> bool {
    extract_attr(attrs, "class").is_some_and(|value| {
        value
            .split_whitespace()
            .any(|token| token.eq_ignore_ascii_case(class))
    })
}

fn extract_attr(attrs: &str, attr: &str) -> Option<String> {
    let pattern = format!(
        r#"(?is)(?:^|\s){}\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#,
        regex::escape(attr)
    );
    let re = Regex::new(&pattern).expect("valid attr regex");
    re.captures(attrs).and_then(|c| {
        c.get(1)
            .or_else(|| c.get(2))
            .or_else(|| c.get(3))
            .map(|m| m.as_str().trim().to_string())
    })
}

/// Visible text of a cell: tags dropped, entities decoded, whitespace collapsed.
///
/// Inline tags join their neighbours (`<b>FREE</b>TEST` is `FREETEST`); line
/// breaks and block tags separate words.
fn cell_text(inner: &str) -> String {
    let broken = BREAK_TAG_RE.replace_all(inner, " ");
    let no_tags = TAG_RE.replace_all(&broken, "");
    let decoded = html_escape::decode_html_entities(&no_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "html_test.rs"]
mod tests;
