use {
    std::{fs, io::Write, path::Path},
    vn_corpus::{
        extract::{DocxExtractor, Extractor},
        run_extraction, split_corpus, Config, Error, SourceKind,
    },
    zip::write::SimpleFileOptions,
};

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let body = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{p}</w:t></w:r></w:p>"))
        .collect::<String>();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut zip = zip::ZipWriter::new(fs::File::create(path).unwrap());
    zip.start_file("[Content_Types].xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(b"<Types/>").unwrap();
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
}

fn config_for(root: &Path) -> Config {
    Config {
        raw_dir: root.join("raw"),
        clean_dir: root.join("clean"),
        split_dir: root.join("split"),
        ..Config::default()
    }
}

#[test]
fn docx_paragraphs_are_extracted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truyen.docx");
    write_docx(&path, &["  Dế Mèn phiêu lưu ký ", "", "Chương I"]);

    let text = DocxExtractor.extract(&path).unwrap();
    assert_eq!(text, "Dế Mèn phiêu lưu ký\nChương I");
}

#[test]
fn docx_without_document_xml_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.docx");
    let mut zip = zip::ZipWriter::new(fs::File::create(&path).unwrap());
    zip.start_file("other.xml", SimpleFileOptions::default()).unwrap();
    zip.finish().unwrap();

    let err = DocxExtractor.extract(&path).unwrap_err();
    assert!(matches!(err, Error::Zip(_)), "{err:?}");
}

#[test]
fn html_extraction_writes_all_outputs() {
    let root = tempfile::tempdir().unwrap();
    let config = config_for(root.path());
    let input = config.input_dir(SourceKind::Html);
    fs::create_dir_all(input.join("tap1")).unwrap();
    fs::write(
        input.join("tap1").join("chuong1.htm"),
        "<html><body><article><p>Tôi là Dế Mèn.</p><p>Tôi sống ở bờ ruộng!</p></article></body></html>",
    )
    .unwrap();
    fs::write(
        input.join("loi-tua.html"),
        "<html><body><div class=\"story-content\">Lời #tựa</div></body></html>",
    )
    .unwrap();
    fs::write(input.join("rong.html"), "<html><body></body></html>").unwrap();
    fs::write(input.join("bad.htm"), [0xff, 0xfe, 0x00]).unwrap();

    let report = run_extraction(SourceKind::Html, &input, &config).unwrap();
    assert_eq!(report.stats.files, 2);

    let clean = &config.clean_dir;
    assert_eq!(
        fs::read_to_string(clean.join("tap1_chuong1.txt")).unwrap(),
        "Tôi là Dế Mèn. Tôi sống ở bờ ruộng!"
    );
    assert_eq!(
        fs::read_to_string(clean.join("loi-tua.txt")).unwrap(),
        "Lời tựa"
    );
    assert!(!clean.join("rong.txt").exists());
    assert!(!clean.join("bad.txt").exists());

    assert_eq!(report.combined, clean.join("combined_html_novel_text.txt"));
    assert_eq!(
        fs::read_to_string(&report.combined).unwrap(),
        "=== loi-tua ===\nLời tựa\n\n=== tap1_chuong1 ===\nTôi là Dế Mèn. Tôi sống ở bờ ruộng!\n"
    );

    let metadata = fs::read_to_string(&report.metadata).unwrap();
    let mut lines = metadata.lines();
    assert_eq!(
        lines.next(),
        Some("filename,character_count,word_count,line_count")
    );
    assert_eq!(lines.next(), Some("loi-tua,7,2,1"));
    assert_eq!(lines.next(), Some("tap1_chuong1,35,9,1"));
    assert_eq!(lines.next(), None);
}

#[test]
fn keep_newlines_preserves_paragraphs() {
    let root = tempfile::tempdir().unwrap();
    let config = Config {
        keep_newlines: true,
        ..config_for(root.path())
    };
    let input = config.input_dir(SourceKind::Docx);
    fs::create_dir_all(&input).unwrap();
    write_docx(&input.join("tho.docx"), &["Trăm năm trong cõi", "người ta"]);

    let report = run_extraction(SourceKind::Docx, &input, &config).unwrap();
    assert_eq!(report.metadata, config.clean_dir.join("metadata.csv"));
    assert_eq!(
        fs::read_to_string(config.clean_dir.join("tho.txt")).unwrap(),
        "Trăm năm trong cõi\nngười ta"
    );
}

#[test]
fn extracted_corpus_splits_deterministically() {
    let root = tempfile::tempdir().unwrap();
    let config = config_for(root.path());
    let input = config.input_dir(SourceKind::Docx);
    fs::create_dir_all(&input).unwrap();
    for i in 0..5 {
        write_docx(&input.join(format!("sach{i}.docx")), &[format!("Cuốn sách số {i}").as_str()]);
    }
    run_extraction(SourceKind::Docx, &input, &config).unwrap();

    let summary = split_corpus(&config.clean_dir, &config.split_dir, 0.6, 3).unwrap();
    assert_eq!(summary.train_documents, 3);
    assert_eq!(summary.valid_documents, 2);

    let train = fs::read_to_string(&summary.train).unwrap();
    let valid = fs::read_to_string(&summary.valid).unwrap();
    assert!(!train.contains("==="));
    let mut all = train.lines().chain(valid.lines()).collect::<Vec<_>>();
    all.sort();
    assert_eq!(
        all,
        (0..5)
            .map(|i| format!("Cuốn sách số {i}"))
            .collect::<Vec<_>>()
    );
}
