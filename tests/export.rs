//! CSV export written to disk and read back

use std::fs;

use page_harvest::{extract, parse_csv, save_csv, Column, Document, Mode, EXPORT_FILE_NAME};

#[test]
fn test_save_and_reload_links() {
    let html = r#"
    <ul>
        <li><a href="/a">First, with comma</a></li>
        <li><a href="/b?x=1&amp;y=2">Second "quoted"</a></li>
        <li><a href="/c">Third</a></li>
    </ul>
    "#;
    let doc = Document::from_html(html);
    let result = extract(&doc, &Mode::Links).unwrap();
    assert_eq!(result.len(), 3);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(EXPORT_FILE_NAME);
    save_csv(&path, &result).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let (headers, rows) = parse_csv(&text).unwrap();
    assert_eq!(headers, vec!["Content", "Href"]);
    assert_eq!(rows.len(), 3);
    for (parsed, original) in rows.iter().zip(result.rows()) {
        assert_eq!(parsed["Content"], original.get(Column::Content).unwrap());
        assert_eq!(parsed["Href"], original.get(Column::Href).unwrap());
    }
    assert_eq!(rows[1]["Href"], "/b?x=1&y=2");
}

#[test]
fn test_save_overwrites_previous_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(EXPORT_FILE_NAME);
    fs::write(&path, "stale").unwrap();

    let doc = Document::from_html(r#"<img src="x.png" alt="X">"#);
    let result = extract(&doc, &Mode::Images).unwrap();
    save_csv(&path, &result).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "Src,Alt\nx.png,X\n");
}
