use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use stylegen::archive::ZipProcessor;
use stylegen::config::GenerateOptions;
use stylegen::error::StylegenError;
use stylegen::stage::stage_resources;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const ROOT: &str = "docbook-xsl-1.0";

/// Build a small but structurally faithful distribution archive: a root
/// stylesheet with an include and an import, parameter documentation for two
/// of the three parameters, and the directories the stager filters on.
fn write_fixture_distribution(path: &Path) {
    let entries: &[(&str, &str)] = &[
        (
            "html/docbook.xsl",
            r#"<?xml version="1.0"?>
<xsl:stylesheet xmlns:xsl="http://www.w3.org/1999/XSL/Transform" version="1.0">
  <xsl:import href="../common/common.xsl"/>
  <xsl:include href="param.xsl"/>
  <xsl:param name="admon.graphics">0</xsl:param>
  <xsl:template match="/"><html/></xsl:template>
</xsl:stylesheet>"#,
        ),
        (
            "html/param.xsl",
            r#"<?xml version="1.0"?>
<xsl:stylesheet xmlns:xsl="http://www.w3.org/1999/XSL/Transform" version="1.0">
  <xsl:param name="toc.max.depth">8</xsl:param>
</xsl:stylesheet>"#,
        ),
        (
            "common/common.xsl",
            r#"<?xml version="1.0"?>
<xsl:stylesheet xmlns:xsl="http://www.w3.org/1999/XSL/Transform" version="1.0">
  <xsl:param name="body.font.family">serif</xsl:param>
</xsl:stylesheet>"#,
        ),
        (
            "params/admon.graphics.xml",
            r#"<?xml version="1.0"?>
<refentry id="admon.graphics">
  <refnamediv><refname>admon.graphics</refname></refnamediv>
  <refsect1><para>Use graphics in admonitions.
Turning this on selects the graphical presentation.</para></refsect1>
</refentry>"#,
        ),
        (
            "params/toc.max.depth.xml",
            r#"<?xml version="1.0"?>
<refentry id="toc.max.depth">
  <refnamediv><refname>toc.max.depth</refname></refnamediv>
  <refsect1><para>Specifies the maximal depth
of the generated TOC.</para></refsect1>
</refentry>"#,
        ),
        ("common/l10n.xml", "<l10n/>\n"),
        ("lib/lib.xsl", "<xsl:stylesheet/>\n"),
        ("highlighting/common.xml", "<highlighters/>\n"),
        ("VERSION", "1.0\n"),
        ("extensions/README", "not staged\n"),
        ("fo/docbook.xsl", "<xsl:stylesheet/>\n"),
    ];

    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        zip.start_file(format!("{ROOT}/{name}"), options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

struct Workspace {
    _dir: tempfile::TempDir,
    distribution: PathBuf,
    sources: PathBuf,
    resources: PathBuf,
}

fn workspace() -> Workspace {
    let dir = tempfile::tempdir().unwrap();
    let distribution = dir.path().join("docbook-xsl-1.0.zip");
    write_fixture_distribution(&distribution);
    let sources = dir.path().join("generated-sources");
    let resources = dir.path().join("generated-resources");
    Workspace {
        distribution,
        sources,
        resources,
        _dir: dir,
    }
}

fn options(ws: &Workspace) -> GenerateOptions {
    GenerateOptions {
        version: Some("1.0".to_string()),
        distribution: Some(ws.distribution.clone()),
        target_directory: Some(ws.sources.clone()),
        target_resources_directory: Some(ws.resources.clone()),
        ..GenerateOptions::default()
    }
}

#[test]
fn generate_produces_source_and_staged_resources() {
    let ws = workspace();
    let report = stylegen::generate(options(&ws)).unwrap();

    assert_eq!(report.parameter_count, 3);
    let expected = ws.sources.join("net/sf/docbook/DocbkxHtmlMojo.java");
    assert_eq!(report.source_file, expected);

    let source = std::fs::read_to_string(&expected).unwrap();
    assert!(source.contains("package net.sf.docbook;"));
    assert!(source.contains("public class DocbkxHtmlMojo"));
    // All three transitively discovered parameters, in lexicographic order.
    let admon = source.find("admon.graphics").unwrap();
    let body = source.find("body.font.family").unwrap();
    let toc = source.find("toc.max.depth").unwrap();
    assert!(admon < body && body < toc);
    // Mined first sentences, single-line.
    assert!(source.contains("Use graphics in admonitions."));
    assert!(source.contains("Specifies the maximal depth of the generated TOC."));

    let staged = ws.resources.join("META-INF/docbkx");
    assert!(staged.join("html/docbook.xsl").exists());
    assert!(staged.join("common/l10n.xml").exists());
    assert!(staged.join("lib/lib.xsl").exists());
    assert!(staged.join("highlighting/common.xml").exists());
    assert!(staged.join("VERSION").exists());
    // Outside the include patterns for type html.
    assert!(!staged.join("extensions/README").exists());
    assert!(!staged.join("fo/docbook.xsl").exists());
}

#[test]
fn undocumented_parameter_degrades_to_empty_description() {
    let ws = workspace();
    // body.font.family has no params/ entry in the fixture.
    let report = stylegen::generate(options(&ws)).unwrap();
    assert_eq!(report.parameter_count, 3);

    let source = std::fs::read_to_string(&report.source_file).unwrap();
    assert!(source.contains("body.font.family"));
}

#[test]
fn excluded_parameters_never_reach_the_output() {
    let ws = workspace();
    let report = stylegen::generate(GenerateOptions {
        excluded_parameters: Some("body.font.family, toc.max.depth".to_string()),
        ..options(&ws)
    })
    .unwrap();

    assert_eq!(report.parameter_count, 1);
    let source = std::fs::read_to_string(&report.source_file).unwrap();
    assert!(source.contains("admon.graphics"));
    assert!(!source.contains("body.font.family"));
    assert!(!source.contains("toc.max.depth"));
}

#[test]
fn generation_is_deterministic_across_runs() {
    let ws_a = workspace();
    let ws_b = workspace();
    let a = stylegen::generate(options(&ws_a)).unwrap();
    let b = stylegen::generate(options(&ws_b)).unwrap();
    assert_eq!(
        std::fs::read(&a.source_file).unwrap(),
        std::fs::read(&b.source_file).unwrap()
    );
}

#[test]
fn restaging_never_overwrites_existing_files() {
    let ws = workspace();
    let config = options(&ws).finalize().unwrap();
    let archive = ZipProcessor::new(config.distribution.clone());

    let snapshot = |root: &Path| -> Vec<(PathBuf, Vec<u8>)> {
        let mut files: Vec<(PathBuf, Vec<u8>)> = walkdir::WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let bytes = std::fs::read(e.path()).unwrap();
                (e.into_path(), bytes)
            })
            .collect();
        files.sort();
        files
    };

    let first = stage_resources(&archive, &config).unwrap();
    assert!(first.skipped.is_empty());
    assert!(!first.copied.is_empty());
    let after_first = snapshot(&ws.resources);

    // Second run against the unchanged archive: nothing copied, everything
    // byte-identical.
    let second = stage_resources(&archive, &config).unwrap();
    assert!(second.copied.is_empty());
    assert_eq!(second.skipped.len(), first.copied.len());
    assert_eq!(snapshot(&ws.resources), after_first);

    // A locally modified file survives a further pass untouched.
    let marker = ws.resources.join("META-INF/docbkx/VERSION");
    std::fs::write(&marker, "locally modified\n").unwrap();
    stage_resources(&archive, &config).unwrap();
    assert_eq!(
        std::fs::read_to_string(&marker).unwrap(),
        "locally modified\n"
    );
}

#[test]
fn missing_root_stylesheet_aborts_with_extraction_error() {
    let dir = tempfile::tempdir().unwrap();
    let distribution = dir.path().join("docbook-xsl-1.0.zip");
    // Archive without the expected html/docbook.xsl entry.
    let file = File::create(&distribution).unwrap();
    let mut zip = ZipWriter::new(file);
    zip.start_file(
        format!("{ROOT}/VERSION"),
        SimpleFileOptions::default(),
    )
    .unwrap();
    zip.write_all(b"1.0\n").unwrap();
    zip.finish().unwrap();

    let sources = dir.path().join("generated-sources");
    let err = stylegen::generate(GenerateOptions {
        version: Some("1.0".to_string()),
        distribution: Some(distribution),
        target_directory: Some(sources.clone()),
        target_resources_directory: Some(dir.path().join("generated-resources")),
        ..GenerateOptions::default()
    })
    .unwrap_err();

    assert!(matches!(err, StylegenError::Extraction { .. }));
    // Fatal extraction failures leave no generated artifacts behind.
    assert!(!sources.exists());
}

#[test]
fn params_listing_is_sorted_and_filtered() {
    let ws = workspace();
    let names = stylegen::list_parameters(GenerateOptions {
        excluded_parameters: Some("toc.max.depth".to_string()),
        ..options(&ws)
    })
    .unwrap();
    assert_eq!(names, vec!["admon.graphics", "body.font.family"]);
}

#[test]
fn fo_type_gets_its_own_class_name_and_stylesheet_path() {
    let ws = workspace();
    let report = stylegen::generate(GenerateOptions {
        output_type: Some("fo".to_string()),
        ..options(&ws)
    })
    .unwrap();

    // The fixture's fo stylesheet declares no global parameters, which is
    // legal and produces an empty parameter list.
    assert_eq!(report.parameter_count, 0);
    assert!(report
        .source_file
        .ends_with("net/sf/docbook/DocbkxFoMojo.java"));
    let source = std::fs::read_to_string(&report.source_file).unwrap();
    assert!(source.contains("public class DocbkxFoMojo"));
    assert!(source.contains("META-INF/docbkx/fo/docbook.xsl"));
}
