// tests/tracker.rs
//
// Tracker against fixture fetchers and a temp data folder.
//
use std::collections::HashMap;
use std::fs;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use webtoon_tracker::config::PoolOptions;
use webtoon_tracker::progress::Progress;
use webtoon_tracker::{
    FetchError, RefreshSummary, SeriesInfo, StoreError, Tracker, TrackerError, TrackerOptions,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn options(dir: &std::path::Path, workers: usize) -> TrackerOptions {
    TrackerOptions { pool: PoolOptions::immediate(workers), ..TrackerOptions::with_data_dir(dir) }
}

fn info(id: &str, title: &str, subscribers: i64) -> SeriesInfo {
    SeriesInfo { identifier: id.to_string(), title: title.to_string(), subscribers }
}

/// Fixture site: fixed counts per URL, anything else 404s.
fn site(pages: &[(&str, &str, i64)]) -> impl Fn(&str) -> Result<SeriesInfo, FetchError> + Send + Sync {
    let pages: HashMap<String, (String, i64)> = pages
        .iter()
        .map(|(id, t, v)| (id.to_string(), (t.to_string(), *v)))
        .collect();
    move |id: &str| match pages.get(id) {
        Some((t, v)) => Ok(info(id, t, *v)),
        None => Err(FetchError::Status(404)),
    }
}

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<String>,
    failed: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn item_done(&mut self, identifier: &str, _title: &str) { self.done.push(identifier.into()); }
    fn item_failed(&mut self, identifier: &str, _reason: &str) { self.failed.push(identifier.into()); }
    fn finish(&mut self) { self.finished = true; }
}

#[test]
fn add_creates_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path(), 2);
    let (mut t, err) = Tracker::open(opts.clone(), site(&[("u1", "Alpha", 1_200)]));
    assert!(err.is_none());
    assert!(t.store().is_empty());

    let got = t.add("u1", day(2024, 4, 2)).unwrap();
    assert_eq!(got, info("u1", "Alpha", 1_200));
    assert_eq!(t.store().get("u1").unwrap().latest_value(), Some(1_200));

    // a fresh tracker sees the saved file
    let (again, err) = Tracker::open(opts, site(&[]));
    assert!(err.is_none());
    assert_eq!(again.store(), t.store());
}

#[test]
fn add_same_month_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let counts = Mutex::new(vec![600, 500]);
    let fetcher = move |id: &str| -> Result<SeriesInfo, FetchError> {
        let v = counts.lock().unwrap().pop().unwrap();
        Ok(info(id, "Alpha", v))
    };
    let (mut t, _) = Tracker::open(options(dir.path(), 1), fetcher);

    t.add("u1", day(2024, 6, 1)).unwrap();
    t.add("u1", day(2024, 6, 28)).unwrap();

    let rec = t.store().get("u1").unwrap();
    assert_eq!(rec.monthly_data().len(), 1);
    assert_eq!(rec.latest_value(), Some(600));
}

#[test]
fn failed_add_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (mut t, _) = Tracker::open(options(dir.path(), 1), site(&[]));

    let err = t.add("https://nowhere/", day(2024, 1, 1)).unwrap_err();
    assert!(matches!(err, TrackerError::Fetch(FetchError::Status(404))));
    assert!(t.store().is_empty());
    assert!(!dir.path().join("data.json").exists());
}

#[test]
fn remove_reports_whether_anything_went() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path(), 1);
    let (mut t, _) = Tracker::open(opts.clone(), site(&[("u1", "Alpha", 1), ("u2", "Beta", 2)]));
    t.add("u1", day(2024, 1, 1)).unwrap();
    t.add("u2", day(2024, 1, 1)).unwrap();

    assert!(t.remove("u1").unwrap());
    assert!(!t.remove("u1").unwrap());
    assert!(!t.remove("never-added").unwrap());

    let (again, _) = Tracker::open(opts, site(&[]));
    assert_eq!(again.store().identifiers(), ["u2"]);
}

#[test]
fn refresh_skips_failures_and_saves_once() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options(dir.path(), 3);
    let jan = day(2024, 1, 10);
    let feb = day(2024, 2, 10);

    let (mut t, _) = Tracker::open(
        opts.clone(),
        site(&[("a", "Alpha", 100), ("b", "Beta", 200), ("c", "Gamma", 300)]),
    );
    for id in ["a", "b", "c"] {
        t.add(id, jan).unwrap();
    }

    // February: "b" is gone from the site
    let (mut t, _) = Tracker::open(opts.clone(), site(&[("a", "Alpha", 110), ("c", "Gamma", 330)]));
    let mut rec = Recorder::default();
    let summary = t.refresh_all(feb, Some(&mut rec)).unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.updated, ["a", "c"]);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, "b");
    assert!(summary.failed[0].1.contains("404"));

    assert_eq!(rec.total, 3);
    assert_eq!(rec.done.len(), 2);
    assert_eq!(rec.failed, ["b"]);
    assert!(rec.finished);

    let (saved, _) = Tracker::open(opts, site(&[]));
    let s = saved.store();
    assert_eq!(s.get("a").unwrap().monthly_data().get("2024-02"), Some(&110));
    assert_eq!(s.get("c").unwrap().monthly_data().get("2024-02"), Some(&330));
    let b = s.get("b").unwrap();
    assert_eq!(b.monthly_data().len(), 1);
    assert_eq!(b.latest_value(), Some(200));
}

#[test]
fn refresh_fetches_every_series_once() {
    let dir = tempfile::tempdir().unwrap();
    let d = day(2024, 3, 3);
    let calls = AtomicUsize::new(0);
    let fetcher = |id: &str| -> Result<SeriesInfo, FetchError> {
        calls.fetch_add(1, Ordering::Relaxed);
        let n: i64 = id.trim_start_matches("id").parse().unwrap();
        Ok(info(id, "ignored", n * 2))
    };

    let mut t = Tracker::open(options(dir.path(), 8), &fetcher).0;
    for i in 0..50 {
        t.ingest(&info(&format!("id{i}"), &format!("S{i}"), i), day(2024, 2, 1));
    }
    calls.store(0, Ordering::Relaxed);

    let summary = t.refresh_all(d, None).unwrap();
    assert_eq!(calls.load(Ordering::Relaxed), 50);
    assert_eq!(summary.updated.len(), 50);
    assert!(summary.failed.is_empty());
    for i in 0..50i64 {
        let rec = t.store().get(&format!("id{i}")).unwrap();
        assert_eq!(rec.latest_value(), Some(i * 2));
        // title from the refresh is not applied
        assert_eq!(rec.title(), format!("S{i}"));
    }
}

#[test]
fn refresh_of_empty_store_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let (mut t, _) = Tracker::open(options(dir.path(), 4), site(&[]));
    let mut rec = Recorder::default();
    let summary = t.refresh_all(day(2024, 1, 1), Some(&mut rec)).unwrap();
    assert_eq!(summary, RefreshSummary::default());
    assert!(rec.finished);
    assert!(!dir.path().join("data.json").exists());
}

const TRAILING_COMMA: &str = r#"{"u": {"title": "Alpha", "data": {"2024-01": 100,}}}"#;

#[test]
fn refresh_after_failed_load_keeps_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, TRAILING_COMMA).unwrap();

    let (mut t, err) = Tracker::open(options(dir.path(), 2), site(&[("u", "Alpha", 5)]));
    assert!(err.is_some());
    t.refresh_all(day(2024, 2, 1), None).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), TRAILING_COMMA);
}

#[test]
fn first_save_after_failed_load_moves_file_aside() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, TRAILING_COMMA).unwrap();

    let opts = options(dir.path(), 1);
    let (mut t, _) = Tracker::open(opts.clone(), site(&[("v", "Beta", 7)]));
    t.add("v", day(2024, 2, 1)).unwrap();

    let backup = dir.path().join("data.json.corrupt");
    assert_eq!(fs::read_to_string(&backup).unwrap(), TRAILING_COMMA);

    let (again, err) = Tracker::open(opts, site(&[]));
    assert!(err.is_none());
    assert_eq!(again.store().identifiers(), ["v"]);

    // later saves leave the backup alone
    let (mut t, _) = Tracker::open(options(dir.path(), 1), site(&[]));
    t.remove("v").unwrap();
    assert_eq!(fs::read_to_string(&backup).unwrap(), TRAILING_COMMA);
}

#[test]
fn corrupted_store_opens_empty_with_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("data.json"), "{\"u\": {\"title\": 5}}").unwrap();

    let (t, err) = Tracker::open(options(dir.path(), 1), site(&[]));
    assert!(t.store().is_empty());
    assert!(matches!(err, Some(StoreError::Malformed { .. })));
}

#[test]
fn report_is_written_into_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let d = day(2024, 7, 4);
    let (mut t, _) = Tracker::open(options(dir.path(), 1), site(&[("u", "Alpha", 1_500)]));
    t.add("u", d).unwrap();

    let path = t.save_report(d).unwrap();
    assert_eq!(path, dir.path().join("report-2024-07-04.txt"));
    assert_eq!(fs::read_to_string(&path).unwrap(), t.report(d));
    assert_eq!(t.top(15)[0].title, "Alpha");
}
