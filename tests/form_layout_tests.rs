mod common;

use common::{parsed, part_names, read_part, render_to_temp, render_with_profile, sample_fields};
use mediation_form_server::form::{FieldValues, RenderProfile};

#[test]
fn test_form_has_seventeen_rows_and_three_columns() {
    let (_dir, path) = render_to_temp(&sample_fields());
    let doc = parsed(&path);

    assert_eq!(doc.rows.len(), 17);
    assert_eq!(doc.grid, vec!["533", "1728", "8179"]);
    for row in &doc.rows {
        assert_eq!(row.spans().iter().sum::<usize>(), 3);
    }
}

#[test]
fn test_layout_is_stable_across_renders() {
    let fields = sample_fields();
    let (_first_dir, first) = render_to_temp(&fields);
    let (_second_dir, second) = render_to_temp(&fields);

    let first = parsed(&first);
    let second = parsed(&second);

    assert_eq!(first.rows.len(), second.rows.len());
    for (a, b) in first.rows.iter().zip(second.rows.iter()) {
        assert_eq!(a.spans(), b.spans());
        assert_eq!(a.height, b.height);
    }
}

#[test]
fn test_merge_integrity() {
    let (_dir, path) = render_to_temp(&FieldValues::with_defaults());
    let doc = parsed(&path);

    // Rows 1 and 15 collapse all three columns.
    assert_eq!(doc.rows[0].spans(), vec![3]);
    assert_eq!(doc.rows[14].spans(), vec![3]);
    assert_eq!(doc.rows[0].cells[0].text(), "DETAILS OF PARTIES:");
    assert_eq!(doc.rows[14].cells[0].text(), "DETAILS OF DISPUTE:");

    // Rows 3 and 9 merge columns 2-3 and keep column 1 standalone.
    for index in [2, 8] {
        let row = &doc.rows[index];
        assert_eq!(row.spans(), vec![1, 2]);
        assert_eq!(row.cells[0].borders.len(), 4);
    }
    assert_eq!(
        doc.rows[2].cells[1].text(),
        "Address and contact details of Applicant"
    );
    assert_eq!(
        doc.rows[8].cells[1].text(),
        "Address and contact details of Defendant/s"
    );

    // Every other row keeps three separate cells except the footer rows.
    assert_eq!(doc.rows[1].spans(), vec![1, 1, 1]);
    assert_eq!(doc.rows[15].spans(), vec![3]);
    assert_eq!(doc.rows[16].spans(), vec![1, 2]);
}

#[test]
fn test_every_cell_has_single_thin_borders() {
    let (_dir, path) = render_to_temp(&FieldValues::new());
    let doc = parsed(&path);

    let mut cells = 0;
    for row in &doc.rows {
        for cell in &row.cells {
            cells += 1;
            let sides: Vec<&str> = cell.borders.iter().map(|b| b.0.as_str()).collect();
            assert_eq!(sides, vec!["top", "left", "bottom", "right"]);
            for (_, val, sz, color) in &cell.borders {
                assert_eq!(val, "single");
                assert_eq!(sz, "4");
                assert_eq!(color, "auto");
            }
        }
    }
    assert!(cells > 17 * 2);

    // The mobile-number value cell is left blank but still bordered.
    let mobile_value = &doc.rows[5].cells[2];
    assert_eq!(mobile_value.text(), "");
    assert_eq!(mobile_value.borders.len(), 4);
}

#[test]
fn test_row_heights_use_minimum_rule() {
    let (_dir, path) = render_to_temp(&FieldValues::new());
    let doc = parsed(&path);

    let expected = [
        0.44, 0.45, 0.37, 1.12, 0.37, 0.37, 0.37, 0.37, 0.37, 0.37, 1.58, 0.44, 0.44, 0.44, 0.44,
        0.44, 0.22,
    ];
    for (row, inches) in doc.rows.iter().zip(expected) {
        let (val, rule) = row.height.clone().expect("row height");
        assert_eq!(rule, "atLeast");
        assert_eq!(val, ((inches * 1440.0_f64).round() as u32).to_string());
    }
}

#[test]
fn test_header_block_precedes_table() {
    let (_dir, path) = render_to_temp(&FieldValues::new());
    let doc = parsed(&path);

    assert_eq!(
        &doc.body_paragraphs[..5],
        &[
            "FORM 'A'",
            "MEDIATION APPLICATION FORM",
            "[REFER RULE 3(1)]",
            "Mumbai District Legal Services Authority",
            "City Civil Court, Mumbai",
        ]
    );

    let xml = read_part(&path, "word/document.xml");
    let header_end = xml.find("City Civil Court, Mumbai").unwrap();
    let table_start = xml.find("<w:tbl>").unwrap();
    assert!(header_end < table_start);
    assert!(xml.contains(r#"<w:spacing w:before="0" w:after="200"/>"#));
}

#[test]
fn test_page_is_a4_with_narrow_margins() {
    let (_dir, path) = render_to_temp(&FieldValues::new());
    let doc = parsed(&path);

    assert_eq!(
        doc.page_size,
        Some(("11906".to_string(), "16838".to_string()))
    );
    assert!(doc.margins.iter().all(|(_, value)| value == "432"));

    let (_dir, narrow) = render_with_profile(&FieldValues::new(), RenderProfile::narrow());
    let narrow = parsed(&narrow);
    assert!(narrow.margins.iter().all(|(_, value)| value == "360"));
}

#[test]
fn test_styling_of_special_cells() {
    let (_dir, path) = render_to_temp(&FieldValues::with_defaults());
    let xml = read_part(&path, "word/document.xml");
    let doc = parsed(&path);

    assert_eq!(doc.rows[1].cells[1].text(), "Name of\nApplicant");
    assert_eq!(doc.rows[6].cells[2].text(), "info@kslegal.co.in");
    assert!(xml.contains(r#"<w:color w:val="0000FF"/>"#));
    assert!(xml.contains(r#"<w:u w:val="single"/>"#));
    assert!(xml.contains("Times New Roman"));

    let footer = &doc.rows[15].cells[0];
    assert_eq!(
        footer.text(),
        "THE COMM. COURTS (PRE-INSTITUTION.........SETTLEMENT) RULES,2018"
    );
    assert_eq!(footer.v_align.as_deref(), Some("center"));

    // Serial number cells pin top alignment.
    assert_eq!(doc.rows[1].cells[0].v_align.as_deref(), Some("top"));
    assert_eq!(doc.rows[7].cells[0].text(), "2");
}

#[test]
fn test_package_contains_required_parts() {
    let (_dir, path) = render_to_temp(&FieldValues::new());
    let names = part_names(&path);

    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/_rels/document.xml.rels",
        "word/document.xml",
        "word/styles.xml",
        "word/settings.xml",
        "docProps/core.xml",
        "docProps/app.xml",
    ] {
        assert!(names.iter().any(|name| name == part), "missing {}", part);
    }

    let styles = read_part(&path, "word/styles.xml");
    assert!(styles.contains(r#"w:styleId="TableGrid""#));
    assert!(styles.contains(r#"<w:sz w:val="21"/>"#));
}

#[test]
fn test_render_overwrites_existing_file() {
    let (_dir, path) = render_to_temp(&FieldValues::new());
    std::fs::write(&path, b"stale").unwrap();

    mediation_form_server::form::FormRenderer::form_a(RenderProfile::replica())
        .unwrap()
        .render(&sample_fields(), &path)
        .unwrap();

    let doc = parsed(&path);
    assert_eq!(doc.rows.len(), 17);
}
