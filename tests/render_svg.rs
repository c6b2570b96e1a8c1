//! Rendering tests: render rules, single teeth and whole charts as SVG.

use odontolib::renderer::rules::plan_tooth;
use odontolib::{
    chart_from_svg, chart_to_json, odontolib_free_string, odontolib_render_chart,
    odontolib_render_chart_with_options, odontolib_render_tooth, parse_chart,
    render_chart_to_svg, render_tooth_json_to_svg, render_tooth_to_svg, Connection, RenderOptions,
    Silhouette, Taxonomy, ToothRecord, Zone,
};
use pretty_assertions::assert_eq;
use std::ffi::{CStr, CString};
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    std::fs::read_to_string(&path).expect("Failed to read fixture")
}

fn output_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn record(json: &str) -> ToothRecord {
    serde_json::from_str(json).expect("Failed to parse record")
}

/// Classes of the elements drawn inside the tooth group, in paint order.
fn tooth_classes(svg: &str, tooth: Option<&str>) -> Vec<String> {
    let doc = roxmltree::Document::parse(svg).expect("SVG should be well-formed");
    let group = doc
        .descendants()
        .find(|n| n.attribute("class") == Some("tooth") && n.attribute("data-tooth") == tooth)
        .expect("tooth group should exist");
    group
        .children()
        .filter(|n| n.is_element())
        .filter_map(|n| n.attribute("class"))
        .map(str::to_string)
        .collect()
}

fn count(classes: &[String], class: &str) -> usize {
    classes.iter().filter(|c| c.split(' ').any(|part| part == class)).count()
}

fn single(record: &ToothRecord, silhouette: Silhouette, connection: Connection) -> Vec<String> {
    let svg = render_tooth_to_svg(record, silhouette, None, connection, &Taxonomy::standard());
    tooth_classes(&svg, None)
}

#[test]
fn five_zones_for_both_silhouettes() {
    for silhouette in [Silhouette::Rectangular, Silhouette::Circular] {
        let classes = single(&ToothRecord::new(), silhouette, Connection::default());
        assert_eq!(
            classes,
            vec![
                "zone zone-top",
                "zone zone-bottom",
                "zone zone-left",
                "zone zone-right",
                "zone zone-center"
            ]
        );
    }
}

#[test]
fn one_root_canal_marker_for_many_zones() {
    let rec = record(r#"{"zones":{"top":"endodoncia","left":"endodoncia_real","center":"endodoncia"}}"#);
    for silhouette in [Silhouette::Rectangular, Silhouette::Circular] {
        let classes = single(&rec, silhouette, Connection::default());
        assert_eq!(count(&classes, "endo"), 1);
    }
}

#[test]
fn crown_ring_for_each_placement() {
    let cases = [
        (r#"{"status":"corona"}"#, 1),
        (r#"{"corona":"corona_nec"}"#, 1),
        (r#"{"zones":{"right":"corona"}}"#, 1),
        (r#"{"zones":{"top":"corona_nec","bottom":"corona"},"status":"corona","corona":"corona"}"#, 1),
        (r#"{"zones":{"top":"caries"},"status":"fija"}"#, 0),
    ];
    for (json, rings) in cases {
        for silhouette in [Silhouette::Rectangular, Silhouette::Circular] {
            let classes = single(&record(json), silhouette, Connection::default());
            assert_eq!(count(&classes, "corona"), rings, "{json} on {silhouette:?}");
        }
    }
}

#[test]
fn crown_in_zone_is_not_a_fill() {
    let plan = plan_tooth(
        &record(r#"{"zones":{"right":"corona"}}"#),
        Silhouette::Rectangular,
        Connection::default(),
        &Taxonomy::standard(),
    );
    assert_eq!(plan.zone(Zone::Right).and_then(|z| z.fill.clone()), None);
    assert!(plan.corona.is_some());
}

#[test]
fn strike_and_implant_overlays() {
    let struck = single(&record(r#"{"status":"perdida_caries"}"#), Silhouette::Rectangular, Connection::default());
    assert_eq!(count(&struck, "strike"), 2);

    let implant = single(&record(r#"{"status":"implante"}"#), Silhouette::Circular, Connection::default());
    assert_eq!(count(&implant, "implant"), 1);
    assert_eq!(count(&implant, "strike"), 0);
}

#[test]
fn prosthesis_run_of_three() {
    let rec = record(r#"{"status":"fija"}"#);
    let flags = [
        Connection { left: false, right: true },
        Connection { left: true, right: true },
        Connection { left: true, right: false },
    ];
    let sides: Vec<(usize, usize)> = flags
        .into_iter()
        .map(|connection| {
            let classes = single(&rec, Silhouette::Rectangular, connection);
            assert_eq!(count(&classes, "prosthesis-top"), 1);
            assert_eq!(count(&classes, "prosthesis-bottom"), 1);
            (count(&classes, "prosthesis-left"), count(&classes, "prosthesis-right"))
        })
        .collect();
    assert_eq!(sides, vec![(1, 0), (0, 0), (0, 1)]);
}

#[test]
fn removable_border_is_dashed() {
    let svg = render_tooth_to_svg(
        &record(r#"{"status":"removible"}"#),
        Silhouette::Circular,
        None,
        Connection::default(),
        &Taxonomy::standard(),
    );
    let doc = roxmltree::Document::parse(&svg).unwrap();
    let borders: Vec<_> = doc
        .descendants()
        .filter(|n| n.attribute("class").is_some_and(|c| c.starts_with("prosthesis")))
        .collect();
    assert_eq!(borders.len(), 4);
    assert!(borders.iter().all(|n| n.attribute("stroke-dasharray").is_some()));
}

#[test]
fn unknown_ids_render_plain() {
    let plain = single(&ToothRecord::new(), Silhouette::Rectangular, Connection::default());
    let foreign = single(
        &record(r#"{"zones":{"top":"fluorosis"},"status":"supernumerario"}"#),
        Silhouette::Rectangular,
        Connection::default(),
    );
    assert_eq!(plain, foreign);
}

#[test]
fn chart_joins_prosthesis_across_midline() {
    let chart = parse_chart(&fixture("sample_chart.json")).unwrap();
    let svg = render_chart_to_svg(&chart, &Taxonomy::standard(), &RenderOptions::default())
        .expect("Failed to render sample chart");

    let t12 = tooth_classes(&svg, Some("12"));
    let t11 = tooth_classes(&svg, Some("11"));
    let t21 = tooth_classes(&svg, Some("21"));
    assert_eq!((count(&t12, "prosthesis-left"), count(&t12, "prosthesis-right")), (1, 0));
    assert_eq!((count(&t11, "prosthesis-left"), count(&t11, "prosthesis-right")), (0, 0));
    assert_eq!((count(&t21, "prosthesis-left"), count(&t21, "prosthesis-right")), (0, 1));

    // primary lower row runs 85, 84, 83 ...
    let t84 = tooth_classes(&svg, Some("84"));
    let t83 = tooth_classes(&svg, Some("83"));
    assert_eq!((count(&t84, "prosthesis-left"), count(&t84, "prosthesis-right")), (1, 0));
    assert_eq!((count(&t83, "prosthesis-left"), count(&t83, "prosthesis-right")), (0, 1));

    let out = output_dir().join("sample_chart.svg");
    std::fs::write(&out, &svg).expect("Failed to write SVG");
    println!("✓ Rendered sample_chart.svg ({} bytes)", svg.len());
    println!("  Output: {}", out.display());
}

#[test]
fn chart_prints_numbers_and_measurements() {
    let chart = parse_chart(&fixture("sample_chart.json")).unwrap();
    let svg = render_chart_to_svg(&chart, &Taxonomy::standard(), &RenderOptions::default()).unwrap();
    let doc = roxmltree::Document::parse(&svg).unwrap();

    let numbers = doc
        .descendants()
        .filter(|n| n.attribute("class") == Some("tooth-number"))
        .count();
    assert_eq!(numbers, 52);

    let captions: Vec<&str> = doc
        .descendants()
        .filter(|n| n.attribute("class").is_some_and(|c| c.starts_with("caption")))
        .filter_map(|n| n.text())
        .collect();
    assert_eq!(captions, vec!["R: 2", "M: 1"]);

    let quiet = RenderOptions {
        show_numbers: false,
        show_measurements: false,
        ..RenderOptions::default()
    };
    let svg = render_chart_to_svg(&chart, &Taxonomy::standard(), &quiet).unwrap();
    assert!(!svg.contains("tooth-number"));
    assert!(!svg.contains("caption"));
}

#[test]
fn exported_svg_reloads_byte_identical() {
    let json = fixture("sample_chart.json");
    let chart = parse_chart(&json).unwrap();
    let svg = render_chart_to_svg(&chart, &Taxonomy::standard(), &RenderOptions::default()).unwrap();

    let reloaded = chart_from_svg(&svg).expect("Failed to reload chart from SVG");
    assert_eq!(reloaded, chart);
    assert_eq!(chart_to_json(&reloaded).unwrap(), json.trim_end());
}

#[test]
fn control_characters_in_measurements_reload() {
    let chart = parse_chart(r#"{"16":{"recesion":"2\u0001","movilidad":"I\u0000"}}"#).unwrap();
    let svg = render_chart_to_svg(&chart, &Taxonomy::standard(), &RenderOptions::default()).unwrap();

    let doc = roxmltree::Document::parse(&svg).expect("SVG should be well-formed");
    let captions: Vec<&str> = doc
        .descendants()
        .filter(|n| n.attribute("class").is_some_and(|c| c.starts_with("caption")))
        .filter_map(|n| n.text())
        .collect();
    assert_eq!(captions, vec!["R: 2", "M: I"]);

    let reloaded = chart_from_svg(&svg).expect("Failed to reload chart from SVG");
    assert_eq!(reloaded.get("16").recesion.as_deref(), Some("2\u{1}"));
    assert_eq!(chart_to_json(&reloaded).unwrap(), chart_to_json(&chart).unwrap());
}

#[test]
fn export_without_embedded_chart() {
    let options = RenderOptions {
        embed_chart: false,
        ..RenderOptions::default()
    };
    let svg = render_chart_to_svg(&parse_chart("{}").unwrap(), &Taxonomy::standard(), &options).unwrap();
    assert!(chart_from_svg(&svg).is_err());
}

#[test]
fn tooth_size_scales_canvas() {
    let small = render_tooth_json_to_svg("{}", "16", Some(20.0)).unwrap();
    let large = render_tooth_json_to_svg("{}", "16", Some(80.0)).unwrap();
    let width = |svg: &str| {
        let doc = roxmltree::Document::parse(svg).unwrap();
        doc.root_element().attribute("width").unwrap().parse::<f64>().unwrap()
    };
    assert!(width(&large) > 3.0 * width(&small));
    assert!(render_tooth_json_to_svg("{}", "19", None).is_err());
}

#[test]
fn ffi_round_trip() {
    let json = CString::new(fixture("sample_chart.json")).unwrap();
    let record = CString::new(r#"{"status":"implante"}"#).unwrap();
    let tooth = CString::new("46").unwrap();
    let bad = CString::new("not json").unwrap();

    unsafe {
        let svg = odontolib_render_chart(json.as_ptr(), 0.0);
        assert!(!svg.is_null());
        assert!(CStr::from_ptr(svg).to_str().unwrap().starts_with("<svg"));
        odontolib_free_string(svg);

        let svg = odontolib_render_tooth(record.as_ptr(), tooth.as_ptr(), 32.0);
        assert!(!svg.is_null());
        assert!(CStr::from_ptr(svg).to_str().unwrap().contains(r#"class="implant""#));
        odontolib_free_string(svg);

        let options = CString::new(r#"{"show_numbers": false}"#).unwrap();
        let svg = odontolib_render_chart_with_options(json.as_ptr(), options.as_ptr());
        assert!(!svg.is_null());
        assert!(!CStr::from_ptr(svg).to_str().unwrap().contains("tooth-number"));
        odontolib_free_string(svg);
        assert!(odontolib_render_chart_with_options(json.as_ptr(), bad.as_ptr()).is_null());

        assert!(odontolib_render_chart(bad.as_ptr(), 0.0).is_null());

        let nul = CString::new(r#"{"16":{"recesion":"2\u0000"}}"#).unwrap();
        let svg = odontolib_render_chart(nul.as_ptr(), 0.0);
        assert!(!svg.is_null());
        let text = CStr::from_ptr(svg).to_str().unwrap().to_string();
        odontolib_free_string(svg);
        let reloaded = chart_from_svg(&text).expect("Failed to reload chart from SVG");
        assert_eq!(reloaded.get("16").recesion.as_deref(), Some("2\u{0}"));
        assert!(odontolib_render_chart(std::ptr::null(), 0.0).is_null());
        odontolib_free_string(std::ptr::null_mut());
    }
}
