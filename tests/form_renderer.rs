mod common;

use common::{MemorySource, overlay};
use formgen::{
    Bindings, DataSource, FieldValue, FormRenderer, GenError, Html, PriorValues, WidgetKind,
};
use std::sync::Arc;
use std::sync::atomic::Ordering;

fn users_source() -> MemorySource {
    MemorySource::new()
        .table(
            "users",
            &[
                ("id", "int(11)"),
                ("name", "varchar(100)"),
                ("email", "varchar(255)"),
                ("age", "int(3)"),
                ("bio", "text"),
                ("birthday", "date"),
                ("status", "enum('active','banned','pending')"),
                ("category_id", "int(11)"),
                ("tag_ids", "varchar(255)"),
                ("created_at", "timestamp"),
            ],
        )
        .option_table("categories", &[("3", "Zeta"), ("1", "Alpha"), ("2", "Mid")])
        .option_table("tags", &[("2", "x"), ("5", "y"), ("9", "z")])
}

fn bindings() -> Bindings {
    Bindings::new()
        .single("category_id", "categories", "id", "name")
        .multi("tag_ids", "tags", "id", "name")
        .enhance("tag_ids")
}

fn renderer(source: MemorySource) -> FormRenderer {
    FormRenderer::new(source.shared(), overlay()).with_bindings(bindings())
}

#[tokio::test]
async fn test_widgets_follow_schema_order_minus_disabled() {
    let form = renderer(users_source())
        .render("users", 2, &PriorValues::new())
        .await
        .unwrap();

    let names: Vec<&str> = form.fields.iter().map(|f| f.spec.column_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["name", "email", "age", "bio", "birthday", "status", "category_id", "tag_ids"]
    );

    let kinds: Vec<WidgetKind> = form.fields.iter().map(|f| f.spec.kind).collect();
    assert_eq!(
        kinds,
        vec![
            WidgetKind::Text,
            WidgetKind::Text,
            WidgetKind::Number,
            WidgetKind::MultilineText,
            WidgetKind::Date,
            WidgetKind::Select,
            WidgetKind::Select,
            WidgetKind::Multiselect,
        ]
    );
}

#[tokio::test]
async fn test_disabled_columns_never_appear() {
    let form = renderer(users_source())
        .render("users", 2, &PriorValues::new().with("id", "7"))
        .await
        .unwrap();
    for disabled in ["id", "created_at"] {
        assert!(form.field(disabled).is_none());
        assert!(form.fields.iter().all(|f| f.name != disabled));
    }
}

#[tokio::test]
async fn test_labels_placeholders_and_readonly() {
    let form = renderer(users_source())
        .render("users", 2, &PriorValues::new())
        .await
        .unwrap();

    let name = form.field("name").unwrap();
    assert_eq!(name.spec.label, "Full Name");
    assert_eq!(name.spec.placeholder, "");
    assert!(!name.spec.readonly);

    let email = form.field("email").unwrap();
    assert_eq!(email.spec.placeholder, "Enter your email...");

    let birthday = form.field("birthday").unwrap();
    assert_eq!(birthday.spec.label, "Birthday");

    // Readonly applies to select widgets as well.
    let status = form.field("status").unwrap();
    assert_eq!(status.spec.kind, WidgetKind::Select);
    assert!(status.spec.readonly);
}

#[tokio::test]
async fn test_bound_options_sorted_by_label_and_hydrated() {
    let prior = PriorValues::new()
        .with("category_id", "2")
        .with("tag_ids", "2,5")
        .with("status", "banned");
    let form = renderer(users_source())
        .render("users", 2, &prior)
        .await
        .unwrap();

    let category = form.field("category_id").unwrap();
    match &category.value {
        FieldValue::Options(entries) => {
            let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
            assert_eq!(labels, vec!["Alpha", "Mid", "Zeta"]);
        }
        other => panic!("expected options, got {other:?}"),
    }
    assert_eq!(category.value.selected_keys(), vec!["2"]);
    assert!(!category.enhanced);

    let tags = form.field("tag_ids").unwrap();
    assert_eq!(tags.value.selected_keys(), vec!["2", "5"]);
    assert!(tags.enhanced);

    let status = form.field("status").unwrap();
    assert_eq!(status.value.selected_keys(), vec!["banned"]);
}

#[tokio::test]
async fn test_binding_overrides_enum_definition() {
    let source = MemorySource::new()
        .table("orders", &[("state", "enum('a','b')")])
        .option_table("states", &[("10", "Open"), ("20", "Closed")]);
    let form = FormRenderer::new(source.shared(), overlay())
        .with_bindings(Bindings::new().single("state", "states", "id", "label"))
        .render("orders", 1, &PriorValues::new())
        .await
        .unwrap();

    let state = form.field("state").unwrap();
    assert_eq!(state.spec.kind, WidgetKind::Select);
    let keys: Vec<&str> = state.spec.options.as_ref().unwrap().keys().collect();
    assert_eq!(keys, vec!["20", "10"]);
}

#[tokio::test]
async fn test_options_fetched_per_render() {
    let source = Arc::new(users_source());
    let shared: Arc<dyn DataSource> = source.clone();
    let renderer = FormRenderer::new(shared, overlay()).with_bindings(bindings());

    renderer.render("users", 2, &PriorValues::new()).await.unwrap();
    renderer.render("users", 2, &PriorValues::new()).await.unwrap();
    assert_eq!(source.option_fetches.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_prior_values_are_escaped() {
    let payload = "<script>alert('x')</script>";
    let prior = PriorValues::new()
        .with("name", payload)
        .with("bio", payload)
        .with("status", payload);
    let form = renderer(users_source())
        .render("users", 2, &prior)
        .await
        .unwrap();

    assert_eq!(
        form.field("name").unwrap().value,
        FieldValue::Text(Html::escape(payload))
    );
    let json = serde_json::to_string(&form).unwrap();
    assert!(!json.contains('<'));
    assert!(!json.contains('>'));
}

#[tokio::test]
async fn test_column_count_clamped_without_affecting_widgets() {
    let narrow = renderer(users_source())
        .render("users", 0, &PriorValues::new())
        .await
        .unwrap();
    let wide = renderer(users_source())
        .render("users", 20, &PriorValues::new())
        .await
        .unwrap();

    assert_eq!(narrow.column_count, 1);
    assert_eq!(narrow.column_width, 12);
    assert_eq!(wide.column_count, 12);
    assert_eq!(wide.column_width, 1);
    assert!(wide.fields.iter().all(|f| f.width == 1));

    let specs = |form: &formgen::FormViewModel| {
        form.fields
            .iter()
            .map(|f| (f.spec.clone(), f.value.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(specs(&narrow), specs(&wide));
}

#[tokio::test]
async fn test_select_round_trip_reproduces_selection() {
    let first = renderer(users_source())
        .render("users", 2, &PriorValues::new().with("category_id", "3"))
        .await
        .unwrap();
    let submitted = first.field("category_id").unwrap().value.selected_keys()[0].to_string();

    let second = renderer(users_source())
        .render("users", 2, &PriorValues::new().with("category_id", &submitted))
        .await
        .unwrap();
    assert_eq!(
        second.field("category_id").unwrap().value,
        first.field("category_id").unwrap().value
    );
}

#[tokio::test]
async fn test_round_trip_with_keys_needing_escapes() {
    let source = || {
        MemorySource::new()
            .table("staff", &[("dept", "varchar(10)"), ("teams", "varchar(50)")])
            .option_table("depts", &[("R&D", "Research"), ("Ops", "Operations")])
            .option_table("teams", &[("<a>", "Alpha"), ("b'c", "Beta"), ("d", "Delta")])
    };
    let render = |prior: PriorValues| async move {
        FormRenderer::new(source().shared(), overlay())
            .with_bindings(
                Bindings::new()
                    .single("dept", "depts", "id", "name")
                    .multi("teams", "teams", "id", "name"),
            )
            .render("staff", 2, &prior)
            .await
            .unwrap()
    };

    let first = render(PriorValues::new().with("dept", "R&D").with("teams", "<a>,b'c")).await;
    let dept = first.field("dept").unwrap();
    assert_eq!(dept.value.selected_keys(), vec!["R&D"]);
    match &dept.value {
        FieldValue::Options(entries) => {
            assert_eq!(entries[1].key, "R&amp;D");
            assert!(entries[1].selected);
        }
        other => panic!("expected options, got {other:?}"),
    }

    let submitted_dept = dept.value.selected_keys()[0].to_string();
    let submitted_teams = first.field("teams").unwrap().value.selected_keys().join(",");
    let second = render(
        PriorValues::new()
            .with("dept", &submitted_dept)
            .with("teams", &submitted_teams),
    )
    .await;

    assert_eq!(second.field("dept").unwrap().value, dept.value);
    assert_eq!(
        second.field("teams").unwrap().value,
        first.field("teams").unwrap().value
    );
    assert_eq!(
        second.field("teams").unwrap().value.selected_keys(),
        vec!["<a>", "b'c"]
    );
}

#[tokio::test]
async fn test_missing_table_is_schema_error() {
    let err = renderer(users_source())
        .render("nope", 2, &PriorValues::new())
        .await
        .unwrap_err();
    assert!(matches!(err, GenError::Schema { ref table, .. } if table == "nope"));
}

#[tokio::test]
async fn test_failed_option_fetch_aborts_render() {
    let source = MemorySource::new().table("posts", &[("author_id", "int")]);
    let err = FormRenderer::new(source.shared(), overlay())
        .with_bindings(Bindings::new().single("author_id", "authors", "id", "name"))
        .render("posts", 2, &PriorValues::new())
        .await
        .unwrap_err();
    assert!(matches!(err, GenError::Query { ref table, .. } if table == "authors"));
}

#[tokio::test]
async fn test_malformed_enum_renders_as_text() {
    let source = MemorySource::new().table("t", &[("mood", "enum('happy','sad'")]);
    let form = FormRenderer::new(source.shared(), overlay())
        .render("t", 1, &PriorValues::new().with("mood", "happy"))
        .await
        .unwrap();
    let mood = form.field("mood").unwrap();
    assert_eq!(mood.spec.kind, WidgetKind::Text);
    assert_eq!(mood.value, FieldValue::Text(Html::escape("happy")));
}
