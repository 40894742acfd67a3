use bizbook_core::db::open_db;
use bizbook_core::store::document_store::{CORRUPT_BACKUP_SLOT, DOCUMENT_SLOT, LEGACY_SALES_SLOT};
use bizbook_core::{
    DocumentStore, Employee, MemorySlotStore, RecordRepository, SettingsStore, SlotStore,
    SqliteSlotStore, StoreError, Task, Theme,
};

#[test]
fn first_load_initializes_default_document() {
    let slots = MemorySlotStore::new();
    let store = DocumentStore::new(&slots);

    let document = store.load().unwrap();
    assert!(document.is_empty());
    assert_eq!(document.settings.theme, Theme::Light);
    assert!(slots.raw_slot(DOCUMENT_SLOT).is_some());
}

#[test]
fn initialize_is_idempotent() {
    let store = DocumentStore::new(MemorySlotStore::new());
    store.initialize().unwrap();
    RecordRepository::<_, Task>::new(&store)
        .add(task("t1", "2024-01-01"))
        .unwrap();

    store.initialize().unwrap();
    store.initialize().unwrap();

    assert_eq!(store.load().unwrap().tasks.len(), 1);
}

#[test]
fn corrupt_document_is_reported_by_try_load_and_repaired_by_load() {
    let slots = MemorySlotStore::with_slot(DOCUMENT_SLOT, "{not json");
    let store = DocumentStore::new(&slots);

    let err = store.try_load().unwrap_err();
    assert!(matches!(err, StoreError::CorruptStore(_)));

    let document = store.load().unwrap();
    assert!(document.is_empty());
    assert_eq!(document.settings.theme, Theme::Light);
    assert_eq!(
        slots.raw_slot(CORRUPT_BACKUP_SLOT).as_deref(),
        Some("{not json")
    );
    assert!(store.try_load().is_ok());
}

#[test]
fn invalid_record_is_dropped_and_the_rest_of_the_document_kept() {
    let raw = r#"{
        "employees": [{"id":"e1","name":"Grace","jobTitle":"Accountant","email":"grace@example.com","phone":"555-0101"}],
        "inventory": [
            {"id":"i1","itemName":"Chair","category":"Office","quantity":null},
            {"id":"i2","itemName":"Desk","category":"Office","quantity":4}
        ],
        "settings": {"theme":"dark"}
    }"#;
    let slots = MemorySlotStore::with_slot(DOCUMENT_SLOT, raw);
    let store = DocumentStore::new(&slots);

    let document = store.load().unwrap();
    assert_eq!(document.employees, vec![employee("e1")]);
    let inventory_ids: Vec<&str> = document
        .inventory
        .iter()
        .map(|item| item.id.as_str())
        .collect();
    assert_eq!(inventory_ids, vec!["i2"]);
    assert_eq!(document.settings.theme, Theme::Dark);
    assert_eq!(slots.raw_slot(CORRUPT_BACKUP_SLOT).as_deref(), Some(raw));

    assert_eq!(store.try_load().unwrap(), document);
    assert!(slots.raw_slot(&format!("{CORRUPT_BACKUP_SLOT}.1")).is_none());
}

#[test]
fn invalid_settings_fall_back_to_defaults_without_touching_records() {
    let slots = MemorySlotStore::with_slot(
        DOCUMENT_SLOT,
        r#"{"tasks":[{"id":"t1","title":"Call supplier","dueDate":"2024-01-01"}],"settings":{"theme":"sepia"}}"#,
    );
    let store = DocumentStore::new(&slots);

    let document = store.try_load().unwrap();
    assert_eq!(document.tasks, vec![task("t1", "2024-01-01")]);
    assert_eq!(document.settings.theme, Theme::Light);
    assert!(slots.raw_slot(CORRUPT_BACKUP_SLOT).is_some());
}

#[test]
fn repeated_corruption_keeps_earlier_backups() {
    let slots = MemorySlotStore::with_slot(DOCUMENT_SLOT, "{first");
    let store = DocumentStore::new(&slots);
    store.load().unwrap();

    slots.set_slot(DOCUMENT_SLOT, "{second").unwrap();
    store.load().unwrap();

    assert_eq!(slots.raw_slot(CORRUPT_BACKUP_SLOT).as_deref(), Some("{first"));
    assert_eq!(
        slots.raw_slot(&format!("{CORRUPT_BACKUP_SLOT}.1")).as_deref(),
        Some("{second")
    );
}

#[test]
fn legacy_sales_are_absorbed_after_record_repair() {
    let slots = MemorySlotStore::with_slot(
        DOCUMENT_SLOT,
        r#"{"sales":[{"id":"s1","item":"Chair","qty":"two","price":10,"date":"2024-03-01"}]}"#,
    );
    slots
        .set_slot(
            LEGACY_SALES_SLOT,
            r#"[{"id":"s2","item":"Desk","qty":1,"price":250,"date":"2024-03-02"}]"#,
        )
        .unwrap();
    let store = DocumentStore::new(&slots);

    let document = store.load().unwrap();
    let ids: Vec<&str> = document.sales.iter().map(|sale| sale.id.as_str()).collect();
    assert_eq!(ids, vec!["s2"]);
    assert!(slots.raw_slot(LEGACY_SALES_SLOT).is_none());
}

#[test]
fn missing_collections_are_repaired_on_load() {
    let slots = MemorySlotStore::with_slot(
        DOCUMENT_SLOT,
        r#"{"tasks":[{"id":"t1","title":"Call supplier","dueDate":"2024-01-01"}]}"#,
    );
    let store = DocumentStore::new(&slots);

    let document = store.load().unwrap();
    assert_eq!(document.tasks.len(), 1);
    assert!(!document.tasks[0].completed);
    assert!(document.employees.is_empty());
    assert!(document.sales.is_empty());
    assert_eq!(document.settings.theme, Theme::Light);
}

#[test]
fn clear_resets_collections_and_theme() {
    let store = DocumentStore::new(MemorySlotStore::new());
    RecordRepository::<_, Employee>::new(&store)
        .add(employee("e1"))
        .unwrap();
    SettingsStore::new(&store).set_theme(Theme::Dark).unwrap();

    store.clear().unwrap();

    let document = store.load().unwrap();
    assert!(document.is_empty());
    assert_eq!(document.settings.theme, Theme::Light);
}

#[test]
fn legacy_sales_slot_is_merged_once_and_removed() {
    let slots = MemorySlotStore::with_slot(
        DOCUMENT_SLOT,
        r#"{"sales":[{"id":"s1","item":"Desk","qty":1,"price":100,"date":"2024-01-01"}]}"#,
    );
    slots
        .set_slot(
            LEGACY_SALES_SLOT,
            r#"[
                {"id":"s1","item":"Desk","qty":1,"price":100,"date":"2024-01-01"},
                {"id":"s2","item":"Chair","qty":2,"price":"1,000","date":"2024-01-02"}
            ]"#,
        )
        .unwrap();
    let store = DocumentStore::new(&slots);

    let document = store.load().unwrap();
    let ids: Vec<&str> = document.sales.iter().map(|sale| sale.id.as_str()).collect();
    assert_eq!(ids, vec!["s1", "s2"]);
    assert!(slots.raw_slot(LEGACY_SALES_SLOT).is_none());

    assert_eq!(store.load().unwrap().sales.len(), 2);
}

#[test]
fn legacy_sales_slot_seeds_a_fresh_document() {
    let slots = MemorySlotStore::with_slot(
        LEGACY_SALES_SLOT,
        r#"[{"id":"s9","item":"Lamp","qty":1,"price":25,"date":"2024-03-03"}]"#,
    );
    let store = DocumentStore::new(&slots);

    let document = store.load().unwrap();
    assert_eq!(document.sales.len(), 1);
    assert_eq!(document.sales[0].id, "s9");
}

#[test]
fn corrupt_legacy_sales_slot_is_left_in_place() {
    let slots = MemorySlotStore::with_slot(LEGACY_SALES_SLOT, "oops");
    let store = DocumentStore::new(&slots);

    let document = store.load().unwrap();
    assert!(document.sales.is_empty());
    assert_eq!(slots.raw_slot(LEGACY_SALES_SLOT).as_deref(), Some("oops"));
}

#[test]
fn sqlite_slots_persist_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bizbook.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let store = DocumentStore::new(SqliteSlotStore::try_new(&conn).unwrap());
        RecordRepository::<_, Employee>::new(&store)
            .add(employee("e1"))
            .unwrap();
        SettingsStore::new(&store).set_theme(Theme::Dark).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = DocumentStore::new(SqliteSlotStore::try_new(&conn).unwrap());
    let document = store.load().unwrap();
    assert_eq!(document.employees, vec![employee("e1")]);
    assert_eq!(document.settings.theme, Theme::Dark);
}

fn employee(id: &str) -> Employee {
    Employee {
        id: id.to_string(),
        name: "Grace".to_string(),
        job_title: "Accountant".to_string(),
        email: "grace@example.com".to_string(),
        phone: "555-0101".to_string(),
    }
}

fn task(id: &str, due_date: &str) -> Task {
    Task {
        id: id.to_string(),
        title: "Call supplier".to_string(),
        description: None,
        due_date: due_date.to_string(),
        completed: false,
    }
}
