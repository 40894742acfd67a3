use bizbook_core::{
    decode_document, Amount, Client, DocumentStore, MemorySlotStore, RecordRepository, Sale,
    SettingsStore, Task, Theme, TransferError, TransferService,
};

fn populated_store() -> DocumentStore<MemorySlotStore> {
    let store = DocumentStore::new(MemorySlotStore::new());
    RecordRepository::<_, Client>::new(&store)
        .add(Client {
            id: "c1".to_string(),
            name: "Jordan".to_string(),
            company: "Acme".to_string(),
            email: "jordan@example.com".to_string(),
            phone: "555-0199".to_string(),
            notes: Some("VIP".to_string()),
        })
        .unwrap();
    RecordRepository::<_, Task>::new(&store)
        .add(Task {
            id: "t1".to_string(),
            title: "Renew lease".to_string(),
            description: None,
            due_date: "2024-04-01".to_string(),
            completed: true,
        })
        .unwrap();
    RecordRepository::<_, Sale>::new(&store)
        .add(Sale {
            id: "s1".to_string(),
            item: "Desk".to_string(),
            qty: 2.0,
            price: Amount::Text("1,000".to_string()),
            date: "2024-04-02".to_string(),
        })
        .unwrap();
    SettingsStore::new(&store).set_theme(Theme::Dark).unwrap();
    store
}

#[test]
fn import_of_export_leaves_document_identical() {
    let store = populated_store();
    let transfer = TransferService::new(&store);
    let before = store.load().unwrap();

    let exported = transfer.export().unwrap();
    assert!(transfer.import(&exported));

    assert_eq!(store.load().unwrap(), before);
}

#[test]
fn export_is_pretty_printed_with_every_collection() {
    let store = DocumentStore::new(MemorySlotStore::new());
    let exported = TransferService::new(&store).export().unwrap();

    assert!(exported.contains("\n  \"employees\": []"));
    for key in ["clients", "inventory", "tasks", "sales", "settings"] {
        assert!(exported.contains(&format!("\"{key}\"")), "missing {key}");
    }
}

#[test]
fn export_restores_into_another_store() {
    let source = populated_store();
    let exported = TransferService::new(&source).export().unwrap();

    let target = DocumentStore::new(MemorySlotStore::new());
    let imported = TransferService::new(&target)
        .import_document(&exported)
        .unwrap();

    assert_eq!(imported, source.load().unwrap());
    assert_eq!(target.load().unwrap(), source.load().unwrap());
}

#[test]
fn malformed_json_is_rejected_and_store_untouched() {
    let store = populated_store();
    let before = store.load().unwrap();
    let transfer = TransferService::new(&store);

    assert!(!transfer.import("{ not json"));
    assert!(matches!(
        transfer.import_document("{ not json"),
        Err(TransferError::Malformed(_))
    ));
    assert_eq!(store.load().unwrap(), before);
}

#[test]
fn structurally_invalid_documents_are_rejected() {
    let store = populated_store();
    let before = store.load().unwrap();
    let transfer = TransferService::new(&store);

    for payload in [
        "[]",
        "42",
        r#"{"employees": "nope"}"#,
        r#"{"inventory": [{"id": "i1", "itemName": "Bolt", "category": "x", "quantity": -2}]}"#,
        r#"{"inventory": [{"id": "i1", "itemName": "Bolt", "category": "x", "quantity": null}]}"#,
        r#"{"settings": {"theme": "neon"}}"#,
        r#"{"tasks": [{"id": "t1"}]}"#,
    ] {
        assert!(!transfer.import(payload), "accepted {payload}");
    }
    assert_eq!(store.load().unwrap(), before);
}

#[test]
fn partial_documents_are_completed_with_defaults() {
    let document = decode_document(r#"{"tasks": []}"#).unwrap();
    assert!(document.is_empty());
    assert_eq!(document.settings.theme, Theme::Light);

    let store = populated_store();
    assert!(TransferService::new(&store).import("{}"));
    let stored = store.load().unwrap();
    assert!(stored.is_empty());
    assert_eq!(stored.settings.theme, Theme::Light);
}
