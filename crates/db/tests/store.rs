use db::{
    DBService,
    models::{
        budget::{
            Budget, BudgetCategory, BudgetItem, CreateBudgetCategory, CreateBudgetItem,
            UpdateBudgetCategory, UpdateBudgetItem,
        },
        guest::{CreateGuest, Guest, GuestSide, RsvpStatus, UpdateGuest},
        milestone::{CreateMilestone, Milestone, UpdateMilestone},
        note::{CreateNote, Note, UpdateNote},
        payment::{CreatePayment, Payment},
        user::User,
        vendor::{CreateVendor, UpdateVendor, Vendor, VendorStatus},
    },
};
use uuid::Uuid;

async fn setup() -> (DBService, Uuid) {
    let db = DBService::new_in_memory().await.expect("in-memory db");
    let user = User::create(&db.pool, "alex", "hash").await.expect("user");
    (db, user.id)
}

async fn second_user(db: &DBService) -> Uuid {
    User::create(&db.pool, "sam", "hash")
        .await
        .expect("second user")
        .id
}

fn guest_payload(name: &str) -> CreateGuest {
    CreateGuest {
        name: name.to_string(),
        plus_one: None,
        rsvp_status: None,
        dietary_restrictions: None,
        table_assignment: None,
        side: None,
        notes: None,
    }
}

#[tokio::test]
async fn duplicate_username_is_a_unique_violation() {
    let (db, _) = setup().await;
    let err = User::create(&db.pool, "alex", "other-hash")
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => assert!(db_err.is_unique_violation()),
        other => panic!("expected a database error, got {other}"),
    }
}

#[tokio::test]
async fn create_applies_defaults() {
    let (db, user_id) = setup().await;
    let guest = Guest::create(&db.pool, user_id, &guest_payload("Aunt May"))
        .await
        .unwrap();

    assert_eq!(guest.name, "Aunt May");
    assert!(!guest.plus_one);
    assert_eq!(guest.rsvp_status, RsvpStatus::Pending);
    assert_eq!(guest.side, GuestSide::Both);
    assert_eq!(guest.dietary_restrictions, "");
    assert_eq!(guest.notes, "");

    let listed = Guest::find_by_user_id(&db.pool, user_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, guest.id);
}

#[tokio::test]
async fn ownership_is_enforced_on_every_verb() {
    let (db, owner) = setup().await;
    let other = second_user(&db).await;
    let guest = Guest::create(&db.pool, owner, &guest_payload("Jo"))
        .await
        .unwrap();

    assert!(
        Guest::find_by_user_id(&db.pool, other)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        Guest::find_by_id(&db.pool, guest.id, other)
            .await
            .unwrap()
            .is_none()
    );

    let update = UpdateGuest {
        name: Some("Hijacked".to_string()),
        plus_one: None,
        rsvp_status: None,
        dietary_restrictions: None,
        table_assignment: None,
        side: None,
        notes: None,
    };
    assert!(
        Guest::update(&db.pool, guest.id, other, &update)
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(Guest::delete(&db.pool, guest.id, other).await.unwrap(), 0);

    // Still intact for the owner.
    let kept = Guest::find_by_id(&db.pool, guest.id, owner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.name, "Jo");
}

#[tokio::test]
async fn partial_update_leaves_other_fields_alone() {
    let (db, user_id) = setup().await;
    let vendor = Vendor::create(
        &db.pool,
        user_id,
        &CreateVendor {
            category: "Photography".to_string(),
            vendor_name: "Light & Shadow".to_string(),
            contact_name: Some("Riley".to_string()),
            phone: None,
            email: Some("hello@lightshadow.example".to_string()),
            status: None,
            deposit_amount: Some("$500".to_string()),
            deposit_due: None,
            final_amount: None,
            final_due: None,
            notes: None,
        },
    )
    .await
    .unwrap();

    let update = UpdateVendor {
        category: None,
        vendor_name: None,
        contact_name: None,
        phone: None,
        email: None,
        status: Some(VendorStatus::Booked),
        deposit_amount: None,
        deposit_due: None,
        final_amount: None,
        final_due: None,
        notes: None,
    };
    let updated = Vendor::update(&db.pool, vendor.id, user_id, &update)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.status, VendorStatus::Booked);
    assert_eq!(updated.vendor_name, "Light & Shadow");
    assert_eq!(updated.email, "hello@lightshadow.example");
    assert_eq!(updated.deposit_amount, "$500");
}

#[tokio::test]
async fn delete_miss_is_idempotent() {
    let (db, user_id) = setup().await;
    let bogus = Uuid::new_v4();
    assert_eq!(Guest::delete(&db.pool, bogus, user_id).await.unwrap(), 0);
    assert_eq!(Guest::delete(&db.pool, bogus, user_id).await.unwrap(), 0);
}

#[tokio::test]
async fn note_update_bumps_updated_at_unless_supplied() {
    let (db, user_id) = setup().await;
    let note = Note::create(
        &db.pool,
        user_id,
        &CreateNote {
            title: "Venue ideas".to_string(),
            content: None,
            tags: Some(vec!["venue".to_string(), "todo".to_string()]),
        },
    )
    .await
    .unwrap();
    assert_eq!(note.created_at, note.updated_at);

    let updated = Note::update(
        &db.pool,
        note.id,
        user_id,
        &UpdateNote {
            title: None,
            content: Some("Barn or winery".to_string()),
            tags: None,
            updated_at: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(updated.updated_at > note.updated_at);
    assert_eq!(updated.tags, vec!["venue", "todo"]);
    assert_eq!(updated.title, "Venue ideas");

    let pinned = note.created_at;
    let repinned = Note::update(
        &db.pool,
        note.id,
        user_id,
        &UpdateNote {
            title: None,
            content: None,
            tags: None,
            updated_at: Some(pinned),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(repinned.updated_at, pinned);
}

#[tokio::test]
async fn bulk_milestones_preserve_input_order() {
    let (db, user_id) = setup().await;
    let items: Vec<CreateMilestone> = (0..20)
        .map(|n| CreateMilestone {
            label: format!("Step {n}"),
            timeframe: None,
            done: None,
            target_date: None,
            sort_order: None,
        })
        .collect();

    let created = Milestone::create_many(&db.pool, user_id, &items)
        .await
        .unwrap();
    assert_eq!(created.len(), 20);

    let mut ids: Vec<Uuid> = created.iter().map(|m| m.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);

    let listed = Milestone::find_by_user_id(&db.pool, user_id).await.unwrap();
    let labels: Vec<&str> = listed.iter().map(|m| m.label.as_str()).collect();
    let expected: Vec<String> = (0..20).map(|n| format!("Step {n}")).collect();
    assert_eq!(labels, expected.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(listed[0].sort_order, 0);
    assert_eq!(listed[19].sort_order, 19);
}

#[tokio::test]
async fn milestone_target_date_can_be_cleared() {
    let (db, user_id) = setup().await;
    let milestone = Milestone::create(
        &db.pool,
        user_id,
        &CreateMilestone {
            label: "Book venue".to_string(),
            timeframe: Some("12+ months".to_string()),
            done: None,
            target_date: Some("2027-06-01".to_string()),
            sort_order: None,
        },
    )
    .await
    .unwrap();

    // Absent field leaves the date untouched.
    let untouched = Milestone::update(
        &db.pool,
        milestone.id,
        user_id,
        &UpdateMilestone {
            label: None,
            timeframe: None,
            done: Some(true),
            target_date: None,
            sort_order: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(untouched.target_date.as_deref(), Some("2027-06-01"));
    assert!(untouched.done);

    // Explicit null clears it.
    let cleared = Milestone::update(
        &db.pool,
        milestone.id,
        user_id,
        &UpdateMilestone {
            label: None,
            timeframe: None,
            done: None,
            target_date: Some(None),
            sort_order: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(cleared.target_date, None);
}

#[tokio::test]
async fn payments_sort_by_explicit_order_then_creation() {
    let (db, user_id) = setup().await;
    let seed = vec![
        CreatePayment {
            date: None,
            label: "Venue deposit".to_string(),
            amount: Some("$2,000".to_string()),
            paid: None,
            sort_order: Some(5),
        },
        CreatePayment {
            date: None,
            label: "Caterer deposit".to_string(),
            amount: None,
            paid: None,
            sort_order: Some(5),
        },
        CreatePayment {
            date: None,
            label: "Band hold fee".to_string(),
            amount: None,
            paid: None,
            sort_order: Some(1),
        },
    ];
    Payment::create_many(&db.pool, user_id, &seed).await.unwrap();

    let listed = Payment::find_by_user_id(&db.pool, user_id).await.unwrap();
    let labels: Vec<&str> = listed.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Band hold fee", "Venue deposit", "Caterer deposit"]
    );
}

#[tokio::test]
async fn budget_upsert_keeps_row_identity() {
    let (db, user_id) = setup().await;
    assert!(
        Budget::find_by_user_id(&db.pool, user_id)
            .await
            .unwrap()
            .is_none()
    );

    let first = Budget::upsert(&db.pool, user_id, 50_000).await.unwrap();
    assert_eq!(first.total_budget, 50_000);

    let second = Budget::upsert(&db.pool, user_id, 70_000).await.unwrap();
    assert_eq!(second.total_budget, 70_000);
    assert_eq!(second.id, first.id);
    assert!(second.updated_at > first.updated_at);
}

#[tokio::test]
async fn category_delete_cascades_to_items() {
    let (db, user_id) = setup().await;
    let category = BudgetCategory::create(
        &db.pool,
        user_id,
        &CreateBudgetCategory {
            name: "Flowers".to_string(),
            target: Some(3_000),
            sort_order: None,
        },
    )
    .await
    .unwrap();

    for name in ["Bouquet", "Centerpieces", "Boutonnieres"] {
        BudgetItem::create(
            &db.pool,
            user_id,
            &CreateBudgetItem {
                category_id: category.id,
                name: name.to_string(),
                cost: Some(400),
                paid: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    }
    assert_eq!(
        BudgetItem::count_by_category_id(&db.pool, category.id)
            .await
            .unwrap(),
        3
    );

    assert_eq!(
        BudgetCategory::delete(&db.pool, category.id, user_id)
            .await
            .unwrap(),
        1
    );
    assert_eq!(
        BudgetItem::count_by_category_id(&db.pool, category.id)
            .await
            .unwrap(),
        0
    );
    assert!(
        BudgetItem::find_by_user_id(&db.pool, user_id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn item_create_requires_owned_category() {
    let (db, user_id) = setup().await;
    let other = second_user(&db).await;
    let foreign_category = BudgetCategory::create(
        &db.pool,
        other,
        &CreateBudgetCategory {
            name: "Music".to_string(),
            target: None,
            sort_order: None,
        },
    )
    .await
    .unwrap();

    // Nonexistent category.
    let missing = BudgetItem::create(
        &db.pool,
        user_id,
        &CreateBudgetItem {
            category_id: Uuid::new_v4(),
            name: "DJ".to_string(),
            cost: Some(100),
            paid: None,
        },
    )
    .await
    .unwrap();
    assert!(missing.is_none());

    // Someone else's category looks exactly the same as a missing one.
    let foreign = BudgetItem::create(
        &db.pool,
        user_id,
        &CreateBudgetItem {
            category_id: foreign_category.id,
            name: "DJ".to_string(),
            cost: Some(100),
            paid: None,
        },
    )
    .await
    .unwrap();
    assert!(foreign.is_none());
}

#[tokio::test]
async fn category_and_item_updates_merge_fields() {
    let (db, user_id) = setup().await;
    let category = BudgetCategory::create(
        &db.pool,
        user_id,
        &CreateBudgetCategory {
            name: "Attire".to_string(),
            target: Some(2_500),
            sort_order: None,
        },
    )
    .await
    .unwrap();

    let renamed = BudgetCategory::update(
        &db.pool,
        category.id,
        user_id,
        &UpdateBudgetCategory {
            name: Some("Attire & Beauty".to_string()),
            target: None,
            sort_order: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.target, 2_500);

    let item = BudgetItem::create(
        &db.pool,
        user_id,
        &CreateBudgetItem {
            category_id: category.id,
            name: "Dress".to_string(),
            cost: Some(1_800),
            paid: None,
        },
    )
    .await
    .unwrap()
    .unwrap();

    let paid = BudgetItem::update(
        &db.pool,
        item.id,
        user_id,
        &UpdateBudgetItem {
            name: None,
            cost: None,
            paid: Some(true),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(paid.paid);
    assert_eq!(paid.cost, 1_800);
    assert_eq!(paid.name, "Dress");
}
