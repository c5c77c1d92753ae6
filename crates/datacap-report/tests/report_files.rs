//! Integration tests: source files in, report files out.

use std::fs;
use std::path::Path;

use datacap_core::units::FILECOIN_GENESIS_UNIX;
use datacap_ext_file::{load_audit_trails, load_flagged_clients, CsvDealSource, JsonClientSource};
use datacap_report::writer::HISTOGRAM_DIR;
use datacap_report::{build_report, BarChart, ReportConfig, ReportData, ReportWriter};

const TIB: u64 = 1 << 40;
const EPOCHS_PER_HOUR: i64 = 120;

fn write_inputs(dir: &Path, count: u64) {
    fs::write(
        dir.join("clients.json"),
        format!(
            r#"{{"count": {count}, "data": [
                {{"addressId": "f01001", "address": "f1aaa", "name": "Archive",
                  "allowanceArray": [
                    {{"allowance": "{t}", "createMessageTimestamp": {g}}},
                    {{"allowance": "{t2}", "createMessageTimestamp": {g2}}}
                  ],
                  "cidReportUrl": "https://example.org/cid/f01001"}},
                {{"addressId": "f01002", "name": "",
                  "allowanceArray": [{{"allowance": {t}, "createMessageTimestamp": {g}}}]}}
            ]}}"#,
            t = TIB,
            t2 = 2 * TIB,
            g = FILECOIN_GENESIS_UNIX,
            g2 = FILECOIN_GENESIS_UNIX + 86_400,
        ),
    )
    .unwrap();
    fs::write(
        dir.join("deals.csv"),
        format!(
            "client_id,deal_value,start_epoch\n\
             f01001,{},{}\n\
             f01001,{},-1\n",
            TIB,
            EPOCHS_PER_HOUR / 2,
            TIB
        ),
    )
    .unwrap();
    fs::write(dir.join("flagged.json"), r#"[{"addressId": "f01002"}]"#).unwrap();
    fs::write(
        dir.join("audit.json"),
        r#"{"f01001": "https://example.org/audit/1"}"#,
    )
    .unwrap();
}

fn load(dir: &Path) -> ReportData {
    let clients = JsonClientSource::new(dir.join("clients.json")).unwrap();
    let deals = CsvDealSource::new(dir.join("deals.csv")).unwrap();
    ReportData::load("f0100", &clients, &deals)
        .unwrap()
        .with_flagged(load_flagged_clients(dir.join("flagged.json")).unwrap())
        .with_audit_trails(load_audit_trails(dir.join("audit.json")).unwrap())
}

#[test]
fn test_full_report_written() {
    let inputs = tempfile::tempdir().unwrap();
    let uploads = tempfile::tempdir().unwrap();
    write_inputs(inputs.path(), 2);

    let config = ReportConfig::default()
        .with_uploads_dir(uploads.path())
        .with_color_seed(Some(1));
    let report = build_report(&load(inputs.path()), &config).unwrap();
    let written = ReportWriter::new(&config).write(&report).unwrap();

    let report_dir = uploads.path().join("f0100");
    assert_eq!(written.report, report_dir.join("report.md"));
    assert_eq!(written.charts.len(), 6);
    for idx in 0..5 {
        assert!(report_dir
            .join(HISTOGRAM_DIR)
            .join(format!("histogram_{idx}.json"))
            .exists());
    }

    let md = fs::read_to_string(&written.report).unwrap();
    assert!(md.starts_with("# Compliance Report\n## Distribution of Datacap in Clients"));
    assert!(md.contains("| [f01001](https://example.org/audit/1) | 1.00 TiB | 2.00 TiB (200%) | - | - |"));
    assert!(md.contains("| f01002 | 1.00 TiB | - | - | - |"));
    assert!(md.contains("| ⚠️ f01002 | - | 1 | 1.00 TiB |"));
    assert!(md.contains("| https://example.org/cid/f01001 |"));
    assert!(md.contains("### Clients with ⚠️ flag received datacap from more than one verifier"));
    assert!(!md.contains("There are more than"));

    let full: BarChart = serde_json::from_str(
        &fs::read_to_string(report_dir.join(HISTOGRAM_DIR).join("histogram_4.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(
        full.title,
        "Deals made by clients until reached full Datacap allocation"
    );
    // The first allocation of f01001 was filled 30 minutes after issuance.
    assert_eq!(full.data[0].y, 1);
    assert_eq!(full.data.iter().map(|b| b.y).sum::<u64>(), 1);

    let issuance: BarChart =
        serde_json::from_str(&fs::read_to_string(report_dir.join("issuance_chart.json")).unwrap())
            .unwrap();
    assert_eq!(issuance.labels, vec!["2020-08-24", "2020-08-25"]);
    assert_eq!(issuance.data[0].y, 2 * TIB);
}

#[test]
fn test_limit_warning() {
    let inputs = tempfile::tempdir().unwrap();
    write_inputs(inputs.path(), 40);

    let config = ReportConfig::default().with_clients_query_limit(20);
    let report = build_report(&load(inputs.path()), &config).unwrap();
    assert!(report.markdown.ends_with(
        "## ⚠️ There are more than 20 clients for a given allocator, report may be inaccurate"
    ));
}

#[test]
fn test_empty_verifier_report() {
    let inputs = tempfile::tempdir().unwrap();
    let uploads = tempfile::tempdir().unwrap();
    fs::write(inputs.path().join("clients.json"), r#"{"count": 0, "data": []}"#).unwrap();

    let clients = JsonClientSource::new(inputs.path().join("clients.json")).unwrap();
    let deals = CsvDealSource::new(inputs.path().join("missing.csv")).unwrap();
    let data = ReportData::load("f0100", &clients, &deals).unwrap();

    let config = ReportConfig::default().with_uploads_dir(uploads.path());
    let report = build_report(&data, &config).unwrap();
    let written = ReportWriter::new(&config).write(&report).unwrap();

    assert!(written.charts.is_empty());
    assert_eq!(
        fs::read_to_string(written.report).unwrap(),
        "# Compliance Report\n### No Datacap issued for verifier"
    );
}
