use monto_core::{
    HeadlessHost, LinkDirection, OffsetRange, Product, RangeEntry, Session, SessionConfig,
    SessionEvent, SourceUri, TargetUri, ViewColumn,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::{Arc, Mutex};

fn scenario_product() -> Product {
    Product::new("file:/a.c", "ast", "text", "AST").with_range_maps(
        vec![RangeEntry::new(OffsetRange::new(0, 5), vec![OffsetRange::new(0, 3)])],
        vec![RangeEntry::new(OffsetRange::new(0, 3), vec![OffsetRange::new(0, 5)])],
    )
}

fn target(raw: &str) -> TargetUri {
    TargetUri::parse(raw).unwrap()
}

fn recorded_events(session: &mut Session) -> Arc<Mutex<Vec<SessionEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    session.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
    events
}

fn sorted_leaves(session: &Session) -> Vec<TargetUri> {
    let mut leaves: Vec<TargetUri> = session.tree().leaves().into_iter().cloned().collect();
    leaves.sort();
    leaves
}

fn sorted_keys(session: &Session) -> Vec<TargetUri> {
    let mut keys: Vec<TargetUri> = session.store().targets().cloned().collect();
    keys.sort();
    keys
}

#[test]
fn test_forward_and_reverse_lookup_then_clear() {
    let mut session = Session::default();
    let ast = session.save_product(scenario_product());
    assert_eq!(ast.as_str(), "monto:/a.c|ast.text");

    assert_eq!(
        session.linked_ranges(&ast, LinkDirection::Forward, 2),
        vec![OffsetRange::new(0, 3)]
    );
    assert_eq!(
        session.linked_ranges(&ast, LinkDirection::Reverse, 1),
        vec![OffsetRange::new(0, 5)]
    );

    let removed = session.clear_source(&SourceUri::parse("file:/a.c"));
    assert_eq!(removed, vec![ast.clone()]);
    assert_eq!(
        session.linked_ranges(&ast, LinkDirection::Forward, 2),
        vec![OffsetRange::empty_at(0)]
    );
    assert_eq!(
        session.linked_ranges(&ast, LinkDirection::Reverse, 1),
        vec![OffsetRange::empty_at(0)]
    );
    assert!(session.tree().leaves().is_empty());
}

#[test]
fn test_lookup_is_total_for_any_offset() {
    let mut session = Session::default();
    let ast = session.save_product(scenario_product());
    let missing = target("monto:/nowhere.c|ast.text");

    for offset in [0, 4, 5, 1_000, usize::MAX] {
        assert_eq!(
            session.product(&missing).linked_ranges(LinkDirection::Forward, offset),
            vec![OffsetRange::empty_at(0)]
        );
        assert!(!session.linked_ranges(&ast, LinkDirection::Forward, offset).is_empty());
    }
    assert_eq!(
        session.linked_ranges(&ast, LinkDirection::Forward, 5),
        vec![OffsetRange::empty_at(0)]
    );
}

#[test]
fn test_saving_same_identity_replaces() {
    let mut session = Session::default();
    session.save_product(Product::new("file:/a.c", "ast", "text", "first"));
    let ast = session.save_product(Product::new("file:///a.c", "ast", "text", "second"));

    assert_eq!(session.store().len(), 1);
    assert_eq!(session.provide_content(&ast), "second");
}

#[test]
fn test_append_accumulates_content() {
    let mut session = Session::default();
    session.save_product(Product::new("file:/a.c", "log", "text", "x"));
    let log = session.save_product(Product::new("file:/a.c", "log", "text", "y").with_append(true));
    assert_eq!(session.provide_content(&log), "xy");

    let log = session.save_product(Product::new("file:/a.c", "log", "text", "z"));
    assert_eq!(session.provide_content(&log), "z");
}

#[test]
fn test_append_without_stored_version_starts_fresh() {
    let mut session = Session::default();
    let log = session.save_product(Product::new("file:/a.c", "log", "text", "y").with_append(true));
    assert_eq!(session.provide_content(&log), "y");
}

#[test]
fn test_clear_only_affects_its_source() {
    let mut session = Session::default();
    let a_ast = session.save_product(Product::new("file:/a.c", "ast", "text", "a"));
    let a_cfg = session.save_product(Product::new("file:/a.c", "cfg", "svg", "<svg/>"));
    let b_ast = session.save_product(Product::new("file:/b.c", "ast", "text", "b"));

    let mut removed = session.clear_source(&SourceUri::parse("file:///a.c"));
    removed.sort();
    assert_eq!(removed, vec![a_ast.clone(), a_cfg.clone()]);

    assert!(!session.store().contains(&a_ast));
    assert_eq!(session.product(&a_cfg), &Product::empty());
    assert_eq!(session.provide_content(&b_ast), "b");
    assert_eq!(sorted_leaves(&session), vec![b_ast]);
}

#[test]
fn test_tree_leaves_track_store_keys() {
    let mut session = Session::default();
    let steps: Vec<(&str, Option<(&str, &str)>)> = vec![
        ("file:/a.c", Some(("ast", "text"))),
        ("file:/a.c", Some(("cfg", "svg"))),
        ("file:/src/b.c", Some(("ast", "text"))),
        ("file:/a.c", None),
        ("file:/src/b.c", Some(("ast", "text"))),
        ("file:/src/c.c", Some(("ir", "text"))),
        ("file:/a.c", Some(("ast", "text"))),
        ("file:/src/b.c", None),
        ("file:/missing.c", None),
        // A product name extending another one's identity.
        ("file:/d.c", Some(("n.t|m", "x"))),
        ("file:/d.c", Some(("n", "t"))),
        ("file:/d.c", Some(("n.t|m", "x"))),
    ];

    for (source, product) in steps {
        match product {
            Some((name, language)) => {
                session.save_product(Product::new(source, name, language, name));
            }
            None => {
                session.clear_source(&SourceUri::parse(source));
            }
        }
        assert_eq!(sorted_leaves(&session), sorted_keys(&session));
    }
    assert_eq!(session.store().len(), 4);
}

#[test]
fn test_save_notifies_by_kind() {
    let mut session = Session::default();
    let events = recorded_events(&mut session);

    let ast = session.save_product(Product::new("file:/a.c", "ast", "text", "a"));
    let cfg = session.save_product(Product::new("file:/a.c", "cfg", "SVG", "<svg/>"));

    assert_eq!(
        *events.lock().unwrap(),
        vec![
            SessionEvent::ContentChanged(ast),
            SessionEvent::TreeChanged,
            SessionEvent::GraphicChanged {
                target: cfg,
                panel: None,
            },
            SessionEvent::TreeChanged,
        ]
    );
    assert_eq!(session.version(), 2);
}

#[test]
fn test_document_events_invalidate_products() {
    let mut session = Session::default();
    let mut host = HeadlessHost::new();
    let ast = session.save_product(Product::new("file:/a.c", "ast", "text", "a"));
    host.open_editor(ast.as_str(), ViewColumn::TWO);
    let events = recorded_events(&mut session);

    // Edits only invalidate when configured to.
    assert!(session.on_document_changed(&host, "file:///a.c").is_empty());
    assert!(session.store().contains(&ast));

    // Events on product documents never invalidate.
    assert!(session.on_document_saved(&host, ast.as_str()).is_empty());
    assert!(session.store().contains(&ast));

    assert_eq!(session.on_document_saved(&host, "file:///a.c"), vec![ast.clone()]);
    assert_eq!(session.provide_content(&ast), " ");
    assert_eq!(
        *events.lock().unwrap(),
        vec![SessionEvent::TreeChanged, SessionEvent::ContentChanged(ast)]
    );
}

#[test]
fn test_update_on_change_invalidates_on_edit() {
    let config = SessionConfig::from_settings(&json!({ "updateOnChange": true })).unwrap();
    let mut session = Session::new(config);
    let host = HeadlessHost::new();
    let ast = session.save_product(Product::new("file:/a.c", "ast", "text", "a"));

    assert_eq!(session.on_document_changed(&host, "file:/a.c"), vec![ast.clone()]);
    assert!(!session.store().contains(&ast));

    // A product delivered after the clear survives.
    session.save_product(Product::new("file:/a.c", "ast", "text", "fresh"));
    assert_eq!(session.provide_content(&ast), "fresh");
}

#[test]
fn test_product_decodes_from_wire_json() {
    let product: Product = serde_json::from_value(json!({
        "uri": "file:/a.c",
        "name": "ast",
        "language": "text",
        "content": "AST",
        "rangeMap": [{ "source": { "start": 0, "end": 5 }, "targets": [{ "start": 0, "end": 3 }] }],
        "rangeMapRev": [{ "source": { "start": 0, "end": 3 }, "targets": [{ "start": 0, "end": 5 }] }]
    }))
    .unwrap();
    assert_eq!(product, scenario_product());

    let mut session = Session::default();
    let ast = session.save_product(product);
    assert_eq!(
        session.linked_ranges(&ast, LinkDirection::Forward, 2),
        vec![OffsetRange::new(0, 3)]
    );
}
