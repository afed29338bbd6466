// SPDX-License-Identifier: Apache-2.0

use renderdeck_model::RenderingId;
use renderdeck_store::{index_path, RenderingStore, StoreErrorCode};
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::tempdir;

fn id(raw: &str) -> RenderingId {
    RenderingId::parse(raw).expect("rendering id")
}

fn ids(raw: &[&str]) -> Vec<RenderingId> {
    raw.iter().map(|s| id(s)).collect()
}

#[test]
fn sequential_adds_keep_call_order() {
    let root = tempdir().expect("tempdir");
    let store = RenderingStore::new(index_path(root.path()));
    for raw in ["c", "a", "b", "z9"] {
        store.add(&id(raw)).expect("add");
    }
    assert_eq!(store.get_all().expect("read"), ids(&["c", "a", "b", "z9"]));
}

#[test]
fn set_all_round_trips_exactly() {
    let root = tempdir().expect("tempdir");
    let store = RenderingStore::new(index_path(root.path()));
    let order = ids(&["d4e5f6", "a1b2c3", "x_1"]);
    store.set_all(&order).expect("set");
    assert_eq!(store.get_all().expect("read"), order);

    let raw = fs::read_to_string(store.index_path()).expect("index file");
    assert_eq!(raw, r#"["d4e5f6","a1b2c3","x_1"]"#);

    store.set_all(&[]).expect("clear");
    assert!(store.get_all().expect("read").is_empty());
}

#[test]
fn remove_drops_id_and_ignores_absent_ids() {
    let root = tempdir().expect("tempdir");
    let store = RenderingStore::new(index_path(root.path()));
    store.set_all(&ids(&["a", "b", "c"])).expect("seed");

    store.remove(&id("b")).expect("remove");
    assert_eq!(store.get_all().expect("read"), ids(&["a", "c"]));

    store.remove(&id("missing")).expect("remove absent");
    assert_eq!(store.get_all().expect("read"), ids(&["a", "c"]));
}

#[test]
fn add_reorder_remove_scenario() {
    let root = tempdir().expect("tempdir");
    let store = RenderingStore::new(index_path(root.path()));
    store.add(&id("r1")).expect("add r1");
    store.add(&id("r2")).expect("add r2");
    store.set_all(&ids(&["r2", "r1"])).expect("reorder");
    store.remove(&id("r2")).expect("remove r2");
    assert_eq!(store.get_all().expect("read"), ids(&["r1"]));
}

#[test]
fn reorder_is_taken_verbatim_without_permutation_check() {
    let root = tempdir().expect("tempdir");
    let store = RenderingStore::new(index_path(root.path()));
    store.set_all(&ids(&["a", "b"])).expect("seed");
    store.set_all(&ids(&["b", "new", "b"])).expect("replace");
    assert_eq!(store.get_all().expect("read"), ids(&["b", "new", "b"]));
}

#[test]
fn corrupt_or_truncated_index_is_a_hard_failure() {
    let root = tempdir().expect("tempdir");
    let path = index_path(root.path());
    let store = RenderingStore::new(path.clone());

    fs::write(&path, br#"["a","b"#).expect("truncated index");
    let err = store.get_all().expect_err("truncated");
    assert_eq!(err.code, StoreErrorCode::Corrupt);

    fs::write(&path, br#"["a","../etc"]"#).expect("bad id index");
    let err = store.get_all().expect_err("invalid id");
    assert_eq!(err.code, StoreErrorCode::Corrupt);

    fs::write(&path, br#"[" r1","r1 "]"#).expect("padded id index");
    let err = store.get_all().expect_err("padded ids");
    assert_eq!(err.code, StoreErrorCode::Corrupt);

    fs::write(&path, br#"["a","../etc"]"#).expect("bad id index");
    let err = store.add(&id("c")).expect_err("add over corrupt index");
    assert_eq!(err.code, StoreErrorCode::Corrupt);
    assert_eq!(
        fs::read(&path).expect("unchanged"),
        br#"["a","../etc"]"#.to_vec()
    );
}

#[test]
fn unreadable_index_propagates_io_error() {
    let root = tempdir().expect("tempdir");
    let path = index_path(root.path());
    fs::create_dir_all(&path).expect("directory where the index should be");
    let store = RenderingStore::new(path);
    let err = store.get_all().expect_err("directory is not a file");
    assert_eq!(err.code, StoreErrorCode::Io);
}

#[test]
fn concurrent_adds_in_one_process_do_not_lose_updates() {
    let root = tempdir().expect("tempdir");
    let store = Arc::new(RenderingStore::new(index_path(root.path())));
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..10 {
                    store.add(&id(&format!("t{t}-{i}"))).expect("add");
                }
            })
        })
        .collect();
    for h in handles {
        h.join().expect("join");
    }
    let all = store.get_all().expect("read");
    assert_eq!(all.len(), 80);
    for t in 0..8 {
        let mine: Vec<_> = all
            .iter()
            .filter(|x| x.as_str().starts_with(&format!("t{t}-")))
            .map(|x| x.as_str().to_string())
            .collect();
        let expected: Vec<_> = (0..10).map(|i| format!("t{t}-{i}")).collect();
        assert_eq!(mine, expected, "per-thread order must be preserved");
    }
}
