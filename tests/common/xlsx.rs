//! Minimal xlsx reader for checking heatmap fills.

use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::Path;

/// Cell fills of the first worksheet, keyed by cell reference ("A1", "B1", ...)
pub struct SheetFills {
    /// Number of `<row>` elements in the sheet
    pub rows: usize,
    /// Cell reference -> solid fill color as `AARRGGBB`, if the cell has one
    pub cells: BTreeMap<String, Option<String>>,
}

impl SheetFills {
    pub fn from_file(path: &Path) -> Self {
        let bytes = std::fs::read(path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("Not a zip archive");
        let sheet = read_entry(&mut archive, "xl/worksheets/sheet1.xml");
        let styles = read_entry(&mut archive, "xl/styles.xml");

        let fills: Vec<Option<String>> = section(&styles, "<fills", "</fills>")
            .split("<fill>")
            .skip(1)
            .map(|fill| {
                if fill.contains(r#"patternType="solid""#) {
                    attr(fill.split("<fgColor").nth(1)?, "rgb")
                } else {
                    None
                }
            })
            .collect();

        let xf_fills: Vec<usize> = section(&styles, "<cellXfs", "</cellXfs>")
            .split("<xf ")
            .skip(1)
            .map(|xf| attr(xf, "fillId").map_or(0, |id| id.parse().expect("fillId")))
            .collect();

        let data = section(&sheet, "<sheetData", "</sheetData>");
        let rows = data.matches("<row ").count();
        let cells = data
            .split("<c ")
            .skip(1)
            .map(|c| {
                let reference = attr(c, "r").expect("cell without reference");
                let style: usize = attr(c, "s").map_or(0, |s| s.parse().expect("style index"));
                let fill = xf_fills
                    .get(style)
                    .and_then(|&fill_id| fills.get(fill_id).cloned().flatten());
                (reference, fill)
            })
            .collect();

        Self { rows, cells }
    }

    /// Solid fill of the cell at zero-based (column, row)
    pub fn fill_at(&self, column: u32, row: u32) -> Option<&str> {
        self.cells
            .get(&cell_ref(column, row))
            .and_then(|fill| fill.as_deref())
    }
}

/// Zero-based (column, row) to an A1 reference
pub fn cell_ref(column: u32, row: u32) -> String {
    let mut letters = Vec::new();
    let mut n = column + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    format!("{}{}", String::from_utf8(letters).expect("ascii"), row + 1)
}

fn read_entry(archive: &mut zip::ZipArchive<Cursor<&[u8]>>, name: &str) -> String {
    let mut entry = archive
        .by_name(name)
        .unwrap_or_else(|e| panic!("Missing {name}: {e}"));
    let mut text = String::new();
    entry.read_to_string(&mut text).expect("Entry is not UTF-8");
    text
}

fn section<'a>(xml: &'a str, start: &str, end: &str) -> &'a str {
    let from = xml.find(start).unwrap_or_else(|| panic!("No {start} in xml"));
    let to = xml[from..]
        .find(end)
        .map_or(xml.len(), |offset| from + offset);
    &xml[from..to]
}

/// Value of attribute `name` in the first tag of `fragment`
fn attr(fragment: &str, name: &str) -> Option<String> {
    let tag = format!(" {}", &fragment[..fragment.find('>').unwrap_or(fragment.len())]);
    let needle = format!(" {name}=\"");
    let start = tag.find(&needle)? + needle.len();
    let rest = &tag[start..];
    Some(rest[..rest.find('"')?].to_string())
}
