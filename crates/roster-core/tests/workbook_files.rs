use std::io::Write;

use roster_core::scores::read_entries;
use roster_core::{
    merge_scores, write_roster, CellRef, CellValue, Document, Preset, RosterLayout, RosterParser,
    ScoreLayout, Workbook,
};
use tempfile::tempdir;

const STANDINGS: &str = "\
Christiansburg Wednesday Men  Week 6
Team Rosters
Name Avg HDCP Pins Gms
1 - ALLEY CATS Lane: 1
ZED ZULU 150 50 2700 18
AMY ADAMS 160 41 2880 18
2 - SPARE ME Lane: 3
JOHN A. SMITH 185 bk12 15
\u{c}Page 2 of 2
3 - SPLIT HAPPENS Lane: 5
BOB JONES bk140 61
Temporary Substitutes
SUB PERSON 140 60
";

fn cell(s: &str) -> CellRef {
    s.parse().unwrap()
}

#[test]
fn standings_text_to_workbook_round_trip() {
    let dir = tempdir().unwrap();
    let text_path = dir.path().join("standings.txt");
    let book_path = dir.path().join("sidepots.json");

    fs_write(&text_path, STANDINGS);
    let mut book = Workbook::new();
    book.add_sheet("Handicap Bank | WEDNESDAY");
    book.save(&book_path).unwrap();

    let document = Document::open(&text_path, "pdftotext").unwrap();
    assert_eq!(document.page_count(), 2);

    let parser = RosterParser::new(Preset::Standings.config()).unwrap();
    let report = parser.parse_document(&document);
    let names: Vec<&str> = report.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["AMY ADAMS", "BOB JONES", "JOHN SMITH", "ZED ZULU"]);
    assert!(report.stopped_early);

    let mut book = Workbook::load(&book_path).unwrap();
    let written = write_roster(
        &mut book,
        "Handicap Bank | WEDNESDAY",
        &report.records,
        &RosterLayout::default(),
        None,
    )
    .unwrap();
    assert_eq!(written, 4);
    book.save(&book_path).unwrap();

    let reloaded = Workbook::load(&book_path).unwrap();
    let sheet = reloaded.sheet("Handicap Bank | WEDNESDAY").unwrap();
    assert_eq!(sheet.get(cell("A3")), Some(&CellValue::from("BOB JONES")));
    assert_eq!(sheet.get(cell("B3")), Some(&CellValue::from("bk140")));
    assert_eq!(sheet.get(cell("C5")), Some(&CellValue::Int(50)));
    assert!(sheet.is_empty_cell(cell("A6")));
}

#[test]
fn score_merge_from_json_file() {
    let dir = tempdir().unwrap();
    let scores_path = dir.path().join("scraped_data.json");
    fs_write(
        &scores_path,
        r#"[
  {"name": "Ronnie Duncan", "team": "Pin Pals", "scoresArray": ["187", "201"], "date": "10/09"},
  {"name": "Nobody Here", "scoresArray": ["120"]}
]"#,
    );

    let mut book = Workbook::new();
    let sheet = book.add_sheet("Handicap Sidepot");
    sheet.set(cell("B2"), "Ronnie Duncan");
    sheet.set(cell("D2"), 187i64);

    let entries = read_entries(std::fs::File::open(&scores_path).unwrap()).unwrap();
    let outcome = merge_scores(&mut book, "Handicap Sidepot", &entries, &ScoreLayout::default())
        .unwrap();

    let sheet = book.sheet("Handicap Sidepot").unwrap();
    assert_eq!(sheet.get(cell("D2")), Some(&CellValue::Int(187)));
    assert_eq!(sheet.get(cell("E2")), Some(&CellValue::Int(201)));
    assert_eq!(
        outcome.updates.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec!["Ronnie Duncan finished their second game with a 201.".to_string()]
    );
    assert_eq!(outcome.active, vec!["Ronnie Duncan".to_string()]);
    assert_eq!(outcome.unmatched, vec!["Nobody Here".to_string()]);
}

fn fs_write(path: &std::path::Path, contents: &str) {
    let mut file = std::fs::File::create(path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
}
