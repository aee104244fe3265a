use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// Build a text-only PDF, one page per slice of lines, in Courier.
pub fn build_test_pdf<S: AsRef<str>>(pages: &[Vec<S>]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut page_ids = Vec::new();
    for lines in pages {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 10.into()]),
            Operation::new("TL", vec![14.into()]),
            Operation::new("Td", vec![30.into(), 800.into()]),
        ];

        for (index, line) in lines.iter().enumerate() {
            operations.push(Operation::new("Tj", vec![Object::string_literal(line.as_ref())]));
            if index + 1 < lines.len() {
                operations.push(Operation::new("T*", vec![]));
            }
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| (*id).into()).collect::<Vec<_>>(),
            "Count" => i64::try_from(page_ids.len())?,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

pub fn create_test_pdf<S: AsRef<str>>(path: &Path, pages: &[Vec<S>]) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, build_test_pdf(pages)?)?;
    Ok(())
}

/// Lay cells out on a fixed 18-character grid, as a monospace roster renders them.
pub fn roster_row(cells: &[&str]) -> String {
    cells
        .iter()
        .map(|cell| format!("{cell:<18}"))
        .collect::<String>()
        .trim_end()
        .to_string()
}

fn week_header() -> String {
    roster_row(&["Week", "R1", "R2", "R3", "R4", "R5", "R6", "R7"])
}

/// Two pages: a headed day series with a legend table, then a headerless continuation.
pub fn sample_roster() -> Vec<Vec<String>> {
    vec![
        vec![
            "[FL-A]: SNCB Liege serie - A (matins et journees) PERIODE Z SUP 0".to_string(),
            week_header(),
            roster_row(&["1", "CW", "06:30 14:05 FL123", "RW", "RES", "25:10 02:00", "F", "CV"]),
            roster_row(&["2", "RT", "07:00 15:00 FL456", "XYZ!!", "HSBR", "CV", "RW", "CW"]),
            "Legend".to_string(),
            "Code  Meaning".to_string(),
            "CW  Compensatory rest".to_string(),
        ],
        vec![
            "Continued".to_string(),
            week_header(),
            roster_row(&["3", "RES", "22:15 30:05 FL789", "RW", "CV", "CV", "F", "RT"]),
        ],
    ]
}
