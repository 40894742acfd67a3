use bizbook_core::{
    Amount, ClientDraft, DocumentStore, Employee, EmployeeDraft, InventoryItem,
    InventoryItemDraft, MemorySlotStore, RecordListQuery, RecordService, RecordValidationError,
    RepoError, Sale, SaleDraft, Task, TaskDraft,
};

fn store() -> DocumentStore<MemorySlotStore> {
    DocumentStore::new(MemorySlotStore::new())
}

fn employee_draft(name: &str) -> EmployeeDraft {
    EmployeeDraft {
        name: name.to_string(),
        job_title: "Clerk".to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "555-0123".to_string(),
    }
}

fn task_draft(title: &str, due_date: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: None,
        due_date: due_date.to_string(),
    }
}

#[test]
fn save_without_id_creates_with_generated_id() {
    let store = store();
    let service = RecordService::<_, Employee>::new(&store);

    let first = service.save(None, employee_draft("Ada")).unwrap();
    let second = service.save(Some(""), employee_draft("Linus")).unwrap();

    assert!(!first.id.is_empty());
    assert_ne!(first.id, second.id);
    let listed = service.list(&RecordListQuery::default()).unwrap();
    assert_eq!(listed, vec![first, second]);
}

#[test]
fn save_with_id_merges_and_keeps_id() {
    let store = store();
    let service = RecordService::<_, Employee>::new(&store);
    let created = service.create(employee_draft("Ada")).unwrap();

    let mut draft = employee_draft("Ada Lovelace");
    draft.job_title = "Analyst".to_string();
    let edited = service.save(Some(&created.id), draft).unwrap();

    assert_eq!(edited.id, created.id);
    assert_eq!(edited.job_title, "Analyst");
    assert_eq!(service.get(&created.id).unwrap(), Some(edited));
}

#[test]
fn edit_of_missing_id_is_not_found() {
    let store = store();
    let service = RecordService::<_, Employee>::new(&store);

    let err = service.edit("ghost", employee_draft("Ada")).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { ref id, .. } if id == "ghost"));
}

#[test]
fn blank_required_fields_are_rejected_without_writing() {
    let store = store();
    let service = RecordService::<_, bizbook_core::Client>::new(&store);

    let err = service
        .create(ClientDraft {
            name: "   ".to_string(),
            ..ClientDraft::default()
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(RecordValidationError::BlankField { field: "name", .. })
    ));
    assert!(store.load().unwrap().clients.is_empty());
}

#[test]
fn invalid_edit_leaves_record_untouched() {
    let store = store();
    let service = RecordService::<_, Employee>::new(&store);
    let created = service.create(employee_draft("Ada")).unwrap();

    let err = service.edit(&created.id, employee_draft("")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(service.get(&created.id).unwrap(), Some(created));
}

#[test]
fn task_edit_preserves_completion_and_toggle_flips_it() {
    let store = store();
    let service = RecordService::<_, Task>::new(&store);
    let created = service.create(task_draft("File taxes", "2024-04-15")).unwrap();
    assert!(!created.completed);

    let toggled = service.toggle_completed(&created.id).unwrap();
    assert!(toggled.completed);

    let edited = service
        .edit(&created.id, task_draft("File taxes (state)", "2024-04-16"))
        .unwrap();
    assert!(edited.completed);
    assert_eq!(edited.due_date, "2024-04-16");

    let toggled_back = service.toggle_completed(&created.id).unwrap();
    assert!(!toggled_back.completed);

    assert!(matches!(
        service.toggle_completed("ghost"),
        Err(RepoError::NotFound { .. })
    ));
}

#[test]
fn tasks_list_by_due_date_with_undated_last() {
    let store = store();
    let service = RecordService::<_, Task>::new(&store);
    service.create(task_draft("later", "2024-03-01")).unwrap();
    service.create(task_draft("undated", "soon")).unwrap();
    service.create(task_draft("first", "2024-01-15")).unwrap();

    let titles: Vec<String> = service
        .list_by_due_date(&RecordListQuery::default())
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(titles, vec!["first", "later", "undated"]);
}

#[test]
fn search_is_case_insensitive_over_visible_fields() {
    let store = store();
    let service = RecordService::<_, InventoryItem>::new(&store);
    service
        .create(InventoryItemDraft {
            item_name: "Copper Pipe".to_string(),
            category: "Plumbing".to_string(),
            quantity: 0,
        })
        .unwrap();
    service
        .create(InventoryItemDraft {
            item_name: "Drill".to_string(),
            category: "Tools".to_string(),
            quantity: 12,
        })
        .unwrap();

    let by_name = service.list(&RecordListQuery::search("copper")).unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].item_name, "Copper Pipe");

    let by_status = service.list(&RecordListQuery::search("out of stock")).unwrap();
    assert_eq!(by_status.len(), 1);

    let blank = service.list(&RecordListQuery::search("  ")).unwrap();
    assert_eq!(blank.len(), 2);
}

#[test]
fn sales_validate_and_list_newest_first() {
    let store = store();
    let service = RecordService::<_, Sale>::new(&store);

    let err = service
        .create(SaleDraft {
            item: "Desk".to_string(),
            qty: 1.0,
            price: Amount::Text("free".to_string()),
            date: Some("2024-01-01".to_string()),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(RecordValidationError::NonPositive { field: "price", .. })
    ));

    for (item, date) in [("Desk", "2024-01-01"), ("Chair", "2024-01-02")] {
        service
            .create(SaleDraft {
                item: item.to_string(),
                qty: 1.0,
                price: Amount::Text("1,200".to_string()),
                date: Some(date.to_string()),
            })
            .unwrap();
    }

    let items: Vec<String> = service
        .list_recent_first(&RecordListQuery::default())
        .unwrap()
        .into_iter()
        .map(|sale| sale.item)
        .collect();
    assert_eq!(items, vec!["Chair", "Desk"]);
}

#[test]
fn delete_through_service_removes_record() {
    let store = store();
    let service = RecordService::<_, Employee>::new(&store);
    let created = service.create(employee_draft("Ada")).unwrap();

    service.delete(&created.id).unwrap();

    assert!(service.get(&created.id).unwrap().is_none());
}
