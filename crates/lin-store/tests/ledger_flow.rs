//! Integration tests for the tracker write path, queries, and persistence.

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Write;

use lin_core::test_support::StubBlobStore;
use lin_core::{
    Entry, EntryDraft, ExplicitVersion, InputFile, InputFileSpec, OutputFile, OutputFileSpec,
    OutputLookup,
};
use lin_store::{StoreError, Tracker};

fn entry(tag: &str, version: &str, offset_secs: i64) -> Entry {
    let mut entry = Entry::create(
        EntryDraft {
            tag: tag.to_string(),
            description: format!("{tag} step."),
            category: "Processing".to_string(),
            module: "Variant QC".to_string(),
            version: Some(version.to_string()),
        },
        &ExplicitVersion("unused".to_string()),
    )
    .unwrap();
    entry.created_at = Utc.with_ymd_and_hms(2026, 7, 1, 12, 0, 0).unwrap()
        + chrono::Duration::seconds(offset_secs);
    entry.date = entry.created_at.date_naive();
    entry
}

fn open_tracker(dir: &tempfile::TempDir) -> Tracker {
    Tracker::open(dir.path().join("ledger.jsonl")).unwrap()
}

#[rstest]
#[case(vec!["1.0", "1.1", "0.9"])]
#[case(vec!["0.9", "1.0", "1.1"])]
#[case(vec!["1.1", "0.9", "1.0"])]
fn exactly_one_most_recent_per_tag(#[case] order: Vec<&str>) {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = open_tracker(&dir);

    for (i, version) in order.into_iter().enumerate() {
        tracker.save(entry("t", version, i64::try_from(i).unwrap())).unwrap();
    }

    let recent: Vec<&Entry> = tracker.filter(|e| e.tag == "t" && e.most_recent);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].version, "1.1");
}

#[test]
fn recency_is_per_tag_group() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = open_tracker(&dir);

    tracker.save(entry("qc", "0.1", 0)).unwrap();
    tracker.save(entry("qc", "0.2", 1)).unwrap();
    tracker.save(entry("export", "0.9", 2)).unwrap();

    assert_eq!(tracker.get_entry("qc", None).unwrap().version, "0.2");
    assert_eq!(tracker.get_entry("export", None).unwrap().version, "0.9");
    assert_eq!(tracker.filter(|e| e.most_recent).len(), 2);
}

#[test]
fn numeric_version_order_decides_recency() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = open_tracker(&dir);

    // Lexically "0.9" > "0.10"; numerically the opposite.
    tracker.save(entry("qc", "0.9", 0)).unwrap();
    tracker.save(entry("qc", "0.10", 1)).unwrap();

    assert_eq!(tracker.get_entry("qc", None).unwrap().version, "0.10");
}

#[test]
fn duplicate_tag_version_collapses_to_latest() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = open_tracker(&dir);

    let mut first = entry("qc", "1.0", 0);
    first.description = "older write".to_string();
    let mut second = entry("qc", "1.0", 10);
    second.description = "newer write".to_string();

    tracker.save(first).unwrap();
    tracker.save(second.clone()).unwrap();

    assert_eq!(tracker.len(), 1);
    assert_eq!(tracker.entries()[0].description, "newer write");

    // Saving the same row again is idempotent on size.
    tracker.save(second.clone()).unwrap();
    tracker.save(second).unwrap();
    assert_eq!(tracker.len(), 1);
}

#[test]
fn identical_version_spellings_tie_break_on_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = open_tracker(&dir);

    // Distinct tag_version keys ("1.0" vs "1.0.0") that normalize equal;
    // the later insertion wins recency.
    tracker.save(entry("qc", "1.0", 0)).unwrap();
    tracker.save(entry("qc", "1.0.0", 1)).unwrap();

    assert_eq!(tracker.len(), 2);
    let recent: Vec<&Entry> = tracker.filter(|e| e.most_recent);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].version, "1.0.0");
}

#[test]
fn pinned_version_lookup_and_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = open_tracker(&dir);
    tracker.save(entry("qc", "0.1", 0)).unwrap();
    tracker.save(entry("qc", "0.2", 1)).unwrap();

    assert_eq!(tracker.get_entry("qc", Some("0.1")).unwrap().version, "0.1");
    assert!(matches!(
        tracker.get_entry("qc", Some("9.9")),
        Err(StoreError::EntryNotFound { .. })
    ));
    assert!(matches!(
        tracker.get_entry("absent", None),
        Err(StoreError::EntryNotFound { .. })
    ));
}

#[tokio::test]
async fn file_lookup_and_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = open_tracker(&dir);
    let blob = StubBlobStore::default();

    let mut qc = entry("qc", "0.1", 0);
    let outfile = OutputFile::create(
        OutputFileSpec {
            tag: Some("genotypes".to_string()),
            path: "gs://bucket/genotypes.mt".to_string(),
            description: Some("Filtered genotypes.".to_string()),
            source: None,
        },
        &blob,
    )
    .await
    .unwrap();
    qc.add_output(outfile);
    tracker.save(qc).unwrap();

    assert_eq!(
        tracker.get_file_path("qc", "genotypes", None).unwrap(),
        "gs://bucket/genotypes.mt"
    );
    assert_eq!(tracker.get_output_files("qc", None).unwrap().len(), 1);
    assert!(matches!(
        tracker.get_file("qc", "missing", None),
        Err(StoreError::FileNotFound { .. })
    ));
}

#[tokio::test]
async fn referential_input_is_a_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = open_tracker(&dir);
    let blob = StubBlobStore::default();

    let mut producer = entry("upstream", "1.0", 0);
    producer.add_output(
        OutputFile::create(
            OutputFileSpec {
                tag: Some("out".to_string()),
                path: "/data/a.tsv".to_string(),
                description: Some("First cut.".to_string()),
                source: None,
            },
            &blob,
        )
        .await
        .unwrap(),
    );
    tracker.save(producer).unwrap();

    let input = InputFile::resolve(
        InputFileSpec {
            tag: "out".to_string(),
            entry_tag: Some("upstream".to_string()),
            ..Default::default()
        },
        Some(&tracker as &dyn OutputLookup),
        &blob,
    )
    .await
    .unwrap();
    assert_eq!(input.path, "/data/a.tsv");
    assert_eq!(input.version.as_deref(), Some("1.0"));

    // A newer version of the upstream entry moves the output elsewhere...
    let mut producer_v2 = entry("upstream", "2.0", 1);
    producer_v2.add_output(
        OutputFile::create(
            OutputFileSpec {
                tag: Some("out".to_string()),
                path: "/data/b.tsv".to_string(),
                description: Some("Second cut.".to_string()),
                source: None,
            },
            &blob,
        )
        .await
        .unwrap(),
    );
    tracker.save(producer_v2).unwrap();

    // ...but the snapshot keeps the fields captured at construction time.
    assert_eq!(input.path, "/data/a.tsv");
    assert_eq!(input.version.as_deref(), Some("1.0"));
    assert_eq!(
        tracker.get_file_path("upstream", "out", None).unwrap(),
        "/data/b.tsv"
    );
}

#[test]
fn remove_relabels_affected_tags() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = open_tracker(&dir);
    tracker.save(entry("qc", "0.1", 0)).unwrap();
    tracker.save(entry("qc", "0.2", 1)).unwrap();

    let removed = tracker.remove(|e| e.tag_version == "qc_0.2").unwrap();
    assert_eq!(removed, 1);

    let survivor = tracker.get_entry("qc", None).unwrap();
    assert_eq!(survivor.version, "0.1");
    assert!(survivor.most_recent);
}

#[test]
fn remove_returns_zero_when_nothing_matches() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = open_tracker(&dir);
    tracker.save(entry("qc", "0.1", 0)).unwrap();
    assert_eq!(tracker.remove(|e| e.tag == "other").unwrap(), 0);
    assert_eq!(tracker.len(), 1);
}

#[test]
fn reopen_restores_rows_and_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.jsonl");

    {
        let mut tracker = Tracker::open(&path).unwrap();
        tracker.save(entry("qc", "0.1", 0)).unwrap();
        tracker.save(entry("qc", "0.2", 1)).unwrap();
        tracker.save(entry("export", "0.1", 2)).unwrap();
    }

    let reopened = Tracker::open(&path).unwrap();
    assert_eq!(reopened.len(), 3);
    assert_eq!(reopened.get_entry("qc", None).unwrap().version, "0.2");
    assert_eq!(reopened.tags().len(), 2);
}

#[test]
fn unknown_persisted_fields_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.jsonl");

    let mut tracker = Tracker::open(&path).unwrap();
    tracker.save(entry("qc", "0.1", 0)).unwrap();
    drop(tracker);

    let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
    writeln!(
        file,
        "{}",
        r#"{"tag":"rogue","description":"","category":"","module":"","version":"0.1","tag_version":"rogue_0.1","created_at":"2026-07-01T12:00:00Z","date":"2026-07-01","input_files":[],"output_files":[],"most_recent":false,"surprise":true}"#
    )
    .unwrap();

    assert!(matches!(Tracker::open(&path), Err(StoreError::Io(_))));
}

#[test]
fn clear_truncates_and_copy_to_clones() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = open_tracker(&dir);
    tracker.save(entry("qc", "0.1", 0)).unwrap();
    tracker.save(entry("export", "0.1", 1)).unwrap();

    let copy = tracker.copy_to(dir.path().join("copy.jsonl")).unwrap();
    assert_eq!(copy.len(), 2);
    assert_eq!(copy.get_entry("qc", None).unwrap().version, "0.1");

    tracker.clear().unwrap();
    assert!(tracker.is_empty());
    // The copy is an independent store.
    assert_eq!(copy.len(), 2);
    assert_eq!(Tracker::open(copy.path()).unwrap().len(), 2);
}

#[test]
fn uniq_projects_distinct_values() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = open_tracker(&dir);
    tracker.save(entry("qc", "0.1", 0)).unwrap();
    tracker.save(entry("qc", "0.2", 1)).unwrap();
    tracker.save(entry("export", "0.1", 2)).unwrap();

    assert_eq!(tracker.uniq(|e| e.category.clone()).len(), 1);
    let tags = tracker.tags();
    assert!(tags.contains("qc"));
    assert!(tags.contains("export"));
    assert_eq!(tags.len(), 2);
}
