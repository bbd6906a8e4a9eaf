// tests/pipeline.rs

use std::path::{Path, PathBuf};

use agr_plot::cli::{Cli, run};
use agr_plot::data::error::{ParseError, SelectError};
use agr_plot::data::filter::{Scale, Selection, select};
use agr_plot::data::loader::{load_file, parse_agr};
use agr_plot::data::model::Point;
use agr_plot::export::csv::{read_series, write_csv};
use clap::Parser;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("agr-plot-{}-{name}", std::process::id()))
}

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("plot").chain(args.iter().copied())).unwrap()
}

#[test]
fn fixture_parses_with_metadata() {
    let doc = load_file(&fixture("vmd_energy.agr")).unwrap();
    assert_eq!(doc.title.as_deref(), Some("NAMD Energy"));
    assert_eq!(doc.x_label.as_deref(), Some("Frame"));
    assert_eq!(doc.y_label.as_deref(), Some("Energy (kcal/mol)"));
    assert_eq!(doc.names(), vec!["Bond", "Angle", "Total"]);
    assert_eq!(doc.point_count(), 9);
    assert_eq!(
        doc.series[2].points,
        vec![Point::new(0.0, 3.0), Point::new(1.0, 4.5), Point::new(2.0, 4.0)]
    );
}

#[test]
fn malformed_fixture_cites_line() {
    let err = load_file(&fixture("malformed.agr")).unwrap_err();
    match err.downcast_ref::<ParseError>() {
        Some(ParseError::MalformedData { line, content, .. }) => {
            assert_eq!(*line, 5);
            assert_eq!(content, "1.0 abc");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn csv_round_trip_reproduces_every_point() {
    let doc = load_file(&fixture("vmd_energy.agr")).unwrap();
    let mut buf = Vec::new();
    write_csv(&doc.series, &mut buf).unwrap();
    assert_eq!(read_series(buf.as_slice()).unwrap(), doc.series);
}

#[test]
fn csv_round_trip_after_scaling() {
    let doc = load_file(&fixture("vmd_energy.agr")).unwrap();
    let selection = Selection {
        scale: Scale::new(0.002, 4.184),
        ..Default::default()
    };
    let series = select(&doc, &selection).unwrap();
    let mut buf = Vec::new();
    write_csv(&series, &mut buf).unwrap();
    assert_eq!(read_series(buf.as_slice()).unwrap(), series);
}

#[test]
fn restrict_order_follows_request() {
    let doc = load_file(&fixture("vmd_energy.agr")).unwrap();
    let selection = Selection {
        restrict_to: Some(vec!["Total".into(), "Bond".into()]),
        ..Default::default()
    };
    let names: Vec<String> = select(&doc, &selection)
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["Total", "Bond"]);
}

#[test]
fn run_exports_selected_csv() {
    let out = temp_path("selected.csv");
    let input = fixture("vmd_energy.agr");
    run(cli(&[
        input.to_str().unwrap(),
        "--do_not_plot",
        "-e", "csv",
        "-o", out.to_str().unwrap(),
        "-r", "Total", "Bond",
        "--labels", "E_total", "E_bond",
        "-s", "0.5", "2",
    ]))
    .unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    std::fs::remove_file(&out).ok();

    assert!(text.starts_with("E_total.x,E_total.y,E_bond.x,E_bond.y\n"), "{text}");
    let series = read_series(text.as_bytes()).unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(
        series[0].points,
        vec![Point::new(0.0, 6.0), Point::new(0.5, 9.0), Point::new(1.0, 8.0)]
    );
    assert_eq!(series[1].name, "E_bond");
}

#[test]
fn run_infers_csv_from_output_extension() {
    let out = temp_path("inferred.csv");
    let input = fixture("vmd_energy.agr");
    run(cli(&[input.to_str().unwrap(), "--do_not_plot", "-o", out.to_str().unwrap()])).unwrap();
    let series = read_series(std::fs::File::open(&out).unwrap()).unwrap();
    std::fs::remove_file(&out).ok();
    assert_eq!(series.len(), 3);
}

#[test]
fn run_fails_before_writing_on_selection_error() {
    let out = temp_path("never.csv");
    let input = fixture("vmd_energy.agr");
    let err = run(cli(&[
        input.to_str().unwrap(),
        "--do_not_plot",
        "-o", out.to_str().unwrap(),
        "-r", "Nonexistent",
    ]))
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SelectError>(),
        Some(SelectError::UnknownSeries { .. })
    ));
    assert!(!out.exists());
}

#[test]
fn run_rejects_label_count_mismatch() {
    let input = fixture("vmd_energy.agr");
    let err = run(cli(&[input.to_str().unwrap(), "--do_not_plot", "--labels", "only"]))
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<SelectError>(),
        Some(&SelectError::LabelCount { labels: 1, series: 3 })
    );
}

#[test]
fn run_reports_empty_input() {
    let input = temp_path("empty.agr");
    std::fs::write(&input, "").unwrap();
    let err = run(cli(&[input.to_str().unwrap(), "--do_not_plot"])).unwrap_err();
    std::fs::remove_file(&input).ok();
    assert_eq!(err.downcast_ref::<ParseError>(), Some(&ParseError::EmptyDocument));
}

#[test]
fn bond_and_total_restrict_and_scale() {
    let doc = parse_agr(
        "@ s0 legend \"Bond\"\n@ s1 legend \"Total\"\n0 1.0\n1 2.0\n&\n0 3.0\n1 4.5\n&\n",
    )
    .unwrap();

    let total = select(
        &doc,
        &Selection {
            restrict_to: Some(vec!["Total".into()]),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(total.len(), 1);
    assert_eq!(total[0].name, "Total");
    assert_eq!(total[0].points, vec![Point::new(0.0, 3.0), Point::new(1.0, 4.5)]);

    let scaled = select(
        &doc,
        &Selection {
            scale: Scale::new(0.005, 1.0),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(scaled[0].points, vec![Point::new(0.0, 1.0), Point::new(0.005, 2.0)]);
}
