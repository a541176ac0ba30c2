use super::*;

struct TempStore {
    store: HistoryStore,
}

impl TempStore {
    fn new() -> Self {
        let path = std::env::temp_dir().join(format!("promptpatch_history_{}.json", Uuid::new_v4()));
        Self { store: HistoryStore::new(path) }
    }
}

impl Drop for TempStore {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(self.store.path());
    }
}

fn record(instruction: &str) -> EditRecord {
    EditRecord::new("original text".into(), instruction.into(), "modified text".into())
}

#[test]
fn load_missing_file_is_empty() {
    let temp = TempStore::new();
    assert!(temp.store.load().is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let temp = TempStore::new();
    let records = vec![record("third"), record("second"), record("first")];
    temp.store.save(&records);
    assert_eq!(temp.store.load(), records);
}

#[test]
fn save_overwrites_prior_content() {
    let temp = TempStore::new();
    temp.store.save(&[record("a"), record("b")]);
    let replacement = vec![record("c")];
    temp.store.save(&replacement);
    assert_eq!(temp.store.load(), replacement);
}

#[test]
fn corrupt_content_loads_as_empty() {
    let temp = TempStore::new();
    std::fs::write(temp.store.path(), "{ not valid json").unwrap();
    assert!(temp.store.load().is_empty());
}

#[test]
fn wrong_shape_loads_as_empty() {
    let temp = TempStore::new();
    std::fs::write(temp.store.path(), r#"{"id":"not-a-list"}"#).unwrap();
    assert!(temp.store.load().is_empty());
}

#[test]
fn load_truncates_past_capacity() {
    let temp = TempStore::new();
    let records: Vec<EditRecord> = (0..15).map(|i| record(&format!("edit {i}"))).collect();
    let json = serde_json::to_string(&records).unwrap();
    std::fs::write(temp.store.path(), json).unwrap();

    let loaded = temp.store.load();
    assert_eq!(loaded.len(), HISTORY_CAPACITY);
    assert_eq!(loaded[0].instruction, "edit 0");
}

#[test]
fn record_serializes_the_five_fields() {
    let r = record("swap words");
    let value = serde_json::to_value(&r).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 5);
    for key in ["id", "original", "instruction", "modified", "timestamp"] {
        assert!(obj.contains_key(key), "missing field {key}");
    }
}

#[test]
fn new_record_gets_fresh_id_and_current_timestamp() {
    let before = now_ms();
    let a = record("x");
    let b = record("x");
    assert_ne!(a.id, b.id);
    assert!(a.timestamp >= before);
}
