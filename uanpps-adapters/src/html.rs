//! Table and cell extraction helpers for the HTML sites.
//!
//! Everything here is synchronous and works on already-downloaded page text,
//! so the scrapers can be exercised against inline fixtures.

use scraper::{ElementRef, Html, Selector};

use crate::AdapterError;

pub(crate) fn selector(css: &str) -> Result<Selector, AdapterError> {
    Selector::parse(css).map_err(|e| AdapterError::Parse(format!("bad selector '{}': {:?}", css, e)))
}

/// First element under `root` matching `css`.
pub(crate) fn find<'a>(root: ElementRef<'a>, css: &str) -> Result<ElementRef<'a>, AdapterError> {
    root.select(&selector(css)?)
        .next()
        .ok_or_else(|| AdapterError::Parse(format!("'{}' not found", css)))
}

/// Whitespace-trimmed text content of an element.
pub(crate) fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed texts of every element under `root` matching `css`.
pub(crate) fn texts(root: ElementRef<'_>, css: &str) -> Result<Vec<String>, AdapterError> {
    Ok(root.select(&selector(css)?).map(text).collect())
}

/// Non-empty cell texts of each row under `container`.
pub(crate) fn rows(
    container: ElementRef<'_>,
    row_css: &str,
    cell_css: &str,
) -> Result<Vec<Vec<String>>, AdapterError> {
    let row_selector = selector(row_css)?;
    let cell_selector = selector(cell_css)?;
    Ok(container
        .select(&row_selector)
        .map(|row| {
            row.select(&cell_selector)
                .map(text)
                .filter(|cell| !cell.is_empty())
                .collect()
        })
        .collect())
}

/// Cell `col` of row `row`.
pub(crate) fn cell(rows: &[Vec<String>], row: usize, col: usize) -> Result<&str, AdapterError> {
    rows.get(row)
        .and_then(|r| r.get(col))
        .map(String::as_str)
        .ok_or_else(|| AdapterError::Parse(format!("no cell at row {} column {}", row, col)))
}

/// `"12.3 °C"` -> `"12.3"`.
pub(crate) fn first_token(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}

pub(crate) fn document(page: &str) -> Html {
    Html::parse_document(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div id="meteo">
            <table>
              <tr><th>Name</th><th>Value</th></tr>
              <tr><td> Temperature </td><td>12,3 °C</td><td></td></tr>
              <tr><td>Humidity</td><td>81 %</td></tr>
            </table>
          </div>
          <ul><li>a</li><li> b </li></ul>
        </body></html>
    "#;

    #[test]
    fn test_rows_skip_empty_cells() {
        let doc = document(PAGE);
        let meteo = find(doc.root_element(), "#meteo table").unwrap();
        let rows = rows(meteo, "tr", "td").unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1], vec!["Temperature", "12,3 °C"]);
        assert_eq!(cell(&rows, 2, 1).unwrap(), "81 %");
        assert!(cell(&rows, 2, 2).is_err());
        assert!(cell(&rows, 9, 0).is_err());
    }

    #[test]
    fn test_find_missing() {
        let doc = document(PAGE);
        let err = find(doc.root_element(), "#nowhere").unwrap_err();
        assert!(err.to_string().contains("#nowhere"));
    }

    #[test]
    fn test_texts() {
        let doc = document(PAGE);
        assert_eq!(texts(doc.root_element(), "li").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_first_token() {
        assert_eq!(first_token("12,3 °C"), "12,3");
        assert_eq!(first_token("  745\u{a0}mm"), "745");
        assert_eq!(first_token(""), "");
    }
}
