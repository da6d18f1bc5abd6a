use std::collections::HashSet;

use docket_core::{Lookup, RecordId};
use docket_queue::QueueState;
use docket_runner::{Config, Repository, TransferError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

fn repo(dir: &tempfile::TempDir) -> Repository {
    Repository::open(dir.path().to_path_buf()).unwrap()
}

fn titles(records: &[docket_core::Record]) -> Vec<String> {
    records.iter().map(|r| r.title.clone()).collect()
}

#[test]
fn write_then_search_roundtrips() {
    let dir = tempdir().unwrap();
    let mut r = repo(&dir);
    let written = r.write("essay", 12, 3).unwrap();
    assert!(!written.id.as_str().is_empty());
    assert_eq!(r.search(&written.id).unwrap(), Lookup::Found(written.clone()));

    // a second handle sees the same row
    let mut other = repo(&dir);
    assert_eq!(other.search(&written.id).unwrap().found(), Some(written));
}

#[test]
fn ids_are_unique_within_dataset() {
    let dir = tempdir().unwrap();
    let mut r = repo(&dir);
    let mut rng = StdRng::seed_from_u64(1);
    r.seed(200, &mut rng).unwrap();
    let all = r.list_all().unwrap();
    assert_eq!(all.len(), 200);
    let distinct: HashSet<_> = all.iter().map(|rec| rec.id.clone()).collect();
    assert_eq!(distinct.len(), 200);
}

#[test]
fn schedule_orders_by_priority_then_size() {
    let dir = tempdir().unwrap();
    let mut r = repo(&dir);
    r.write("a", 5, 2).unwrap();
    r.write("b", 1, 2).unwrap();
    r.write("c", 9, 1).unwrap();
    assert_eq!(titles(&r.create_schedule().unwrap()), ["c", "b", "a"]);
    // file order is untouched
    assert_eq!(titles(&r.list_all().unwrap()), ["a", "b", "c"]);
}

#[test]
fn empty_dataset_gives_empty_schedule_and_unmeaningful_view() {
    let dir = tempdir().unwrap();
    let mut r = repo(&dir);
    assert!(r.create_schedule().unwrap().is_empty());
    let (groups, meaningful) = r.view_schedule(true).unwrap();
    assert!(groups.is_empty());
    assert!(!meaningful);
}

#[test]
fn view_before_create_is_not_meaningful() {
    let dir = tempdir().unwrap();
    let mut r = repo(&dir);
    r.write("a", 1, 1).unwrap();
    assert_eq!(r.view_schedule(false).unwrap(), (vec![], false));
}

#[test]
fn view_without_rebuild_is_idempotent() {
    let dir = tempdir().unwrap();
    let mut r = repo(&dir);
    r.write("a", 4, 2).unwrap();
    r.write("b", 3, 1).unwrap();
    r.write("c", 2, 2).unwrap();
    r.create_schedule().unwrap();
    let first = r.view_schedule(false).unwrap();
    assert!(first.1);
    assert_eq!(first, r.view_schedule(false).unwrap());
    let keys: Vec<i64> = first.0.iter().map(|g| g.priority).collect();
    assert_eq!(keys, [1, 2]);
    assert_eq!(titles(&first.0[1].records), ["c", "a"]);
}

#[test]
fn take_next_moves_records_in_schedule_order() {
    let dir = tempdir().unwrap();
    let mut r = repo(&dir);
    r.write("a", 5, 2).unwrap();
    r.write("b", 1, 2).unwrap();
    r.write("c", 9, 1).unwrap();

    assert_eq!(r.take_next_scheduled().unwrap(), None);
    r.create_schedule().unwrap();

    let mut taken = vec![];
    for _ in 0..3 {
        taken.push(r.take_next_scheduled().unwrap().unwrap());
    }
    assert_eq!(titles(&taken), ["c", "b", "a"]);
    assert_eq!(r.take_next_scheduled().unwrap(), None);

    assert!(r.list_all().unwrap().is_empty());
    assert_eq!(r.list_completed().unwrap(), taken);
    for rec in &taken {
        assert_eq!(r.search(&rec.id).unwrap(), Lookup::Removed(rec.id.clone()));
    }
    assert_eq!(r.status().unwrap().schedule, QueueState::Drained);
}

#[test]
fn removal_keeps_survivors_retrievable() {
    let dir = tempdir().unwrap();
    let mut r = repo(&dir);
    let a = r.write("a", 1, 5).unwrap();
    let b = r.write("b", 2, 1).unwrap();
    let c = r.write("c", 3, 5).unwrap();
    r.create_schedule().unwrap();
    let taken = r.take_next_scheduled().unwrap().unwrap();
    assert_eq!(taken, b);

    let mut fresh = repo(&dir);
    assert_eq!(fresh.search(&b.id).unwrap(), Lookup::NotFound);
    assert_eq!(fresh.search(&a.id).unwrap().found(), Some(a.clone()));
    assert_eq!(fresh.search(&c.id).unwrap().found(), Some(c.clone()));
    assert_eq!(fresh.list_all().unwrap(), vec![a, c]);
}

#[test]
fn invalid_title_is_rejected() {
    let dir = tempdir().unwrap();
    let mut r = repo(&dir);
    assert!(r.write("", 1, 1).is_err());
    assert!(r.write("x,y", 1, 1).is_err());
    assert!(r.list_all().unwrap().is_empty());
}

#[test]
fn unknown_id_is_not_found() {
    let dir = tempdir().unwrap();
    let mut r = repo(&dir);
    assert_eq!(r.search(&RecordId::from_str("deadbeef")).unwrap(), Lookup::NotFound);
}

#[test]
fn init_creates_config_and_datasets() {
    let dir = tempdir().unwrap();
    Repository::init(dir.path()).unwrap();
    let cfg = Config::load_from(&Config::config_path(dir.path())).unwrap();
    let data = cfg.data_dir(dir.path());
    assert!(data.join(&cfg.storage.active_file).exists());
    assert!(data.join(&cfg.storage.completed_file).exists());
    let status = repo(&dir).status().unwrap();
    assert_eq!((status.active, status.completed), (0, 0));
    assert_eq!(status.schedule, QueueState::NoSchedule);
    assert_eq!(status.active_file, data.join(&cfg.storage.active_file));
    assert_eq!(status.completed_file, data.join(&cfg.storage.completed_file));
}

#[test]
fn archive_failure_keeps_record_active() {
    let dir = tempdir().unwrap();
    let mut r = repo(&dir);
    let a = r.write("a", 1, 1).unwrap();
    std::fs::create_dir(r.data_dir().join(&r.cfg.storage.completed_file)).unwrap();
    r.create_schedule().unwrap();

    let err = r.take_next_scheduled().unwrap_err();
    assert!(matches!(err, TransferError::Archive { ref id, .. } if *id == a.id), "{err}");
    assert_eq!(r.list_all().unwrap(), vec![a.clone()]);
    assert_eq!(r.search(&a.id).unwrap(), Lookup::Found(a));
}

#[test]
fn remove_failure_after_archive_is_reported_and_not_marked_removed() {
    let dir = tempdir().unwrap();
    let mut r = repo(&dir);
    let a = r.write("a", 1, 1).unwrap();
    r.create_schedule().unwrap();

    let active = r.data_dir().join(&r.cfg.storage.active_file);
    let text = std::fs::read_to_string(&active).unwrap();
    std::fs::remove_file(&active).unwrap();
    std::fs::create_dir(&active).unwrap();

    let err = r.take_next_scheduled().unwrap_err();
    assert!(matches!(err, TransferError::Remove { ref record, .. } if *record == a), "{err}");
    assert_eq!(r.list_completed().unwrap(), vec![a.clone()]);

    std::fs::remove_dir(&active).unwrap();
    std::fs::write(&active, text).unwrap();
    assert_eq!(r.search(&a.id).unwrap(), Lookup::Found(a));
}
