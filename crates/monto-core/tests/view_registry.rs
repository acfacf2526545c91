use monto_core::{
    EditorHost, EditorInfo, HeadlessHost, OpenedView, Product, Session, SessionEvent, TargetUri,
    ViewColumn,
};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

fn graphic(content: &str) -> Product {
    Product::new("file:/src/a.c", "cfg", "svg", content)
}

#[test]
fn test_graphic_product_reuses_its_panel() {
    let mut session = Session::default();
    let mut host = HeadlessHost::new();
    let cfg = session.save_product(graphic("<svg>1</svg>"));

    let Some(OpenedView::Panel(panel)) = session.open_product(&mut host, &cfg) else {
        panic!("graphic products open in a panel");
    };
    let state = host.panel(panel).unwrap();
    assert_eq!(state.title, "a.c cfg.svg");
    assert_eq!(state.column, ViewColumn::TWO);
    assert_eq!(state.content, "<svg>1</svg>");
    assert_eq!(state.reveal_count, 1);

    session.save_product(graphic("<svg>2</svg>"));
    assert_eq!(session.open_product(&mut host, &cfg), Some(OpenedView::Panel(panel)));
    let state = host.panel(panel).unwrap();
    assert_eq!(state.content, "<svg>2</svg>");
    assert_eq!(state.reveal_count, 2);
    assert_eq!(session.views().panel_count(), 1);
}

#[test]
fn test_graphic_update_reports_cached_panel() {
    let mut session = Session::default();
    let mut host = HeadlessHost::new();
    let cfg = session.save_product(graphic("<svg>1</svg>"));
    let Some(OpenedView::Panel(panel)) = session.open_product(&mut host, &cfg) else {
        panic!("graphic products open in a panel");
    };

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    session.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
    session.save_product(graphic("<svg>2</svg>"));

    assert_eq!(
        events.lock().unwrap()[0],
        SessionEvent::GraphicChanged {
            target: cfg.clone(),
            panel: Some(panel),
        }
    );
    assert!(session.refresh_panel(&mut host, &cfg));
    assert_eq!(host.panel(panel).unwrap().content, "<svg>2</svg>");
}

#[test]
fn test_disposed_panel_is_evicted_and_recreated() {
    let mut session = Session::default();
    let mut host = HeadlessHost::new();
    let cfg = session.save_product(graphic("<svg/>"));
    let Some(OpenedView::Panel(first)) = session.open_product(&mut host, &cfg) else {
        panic!("graphic products open in a panel");
    };

    assert!(host.dispose_panel(first));
    assert_eq!(session.on_panel_disposed(first), Some(cfg.clone()));
    assert_eq!(session.on_panel_disposed(first), None);
    assert!(!session.refresh_panel(&mut host, &cfg));

    let Some(OpenedView::Panel(second)) = session.open_product(&mut host, &cfg) else {
        panic!("graphic products open in a panel");
    };
    assert_ne!(first, second);
    assert_eq!(host.panel(second).unwrap().content, "<svg/>");
}

#[test]
fn test_text_product_opens_beside_source() {
    let mut session = Session::default();
    let mut host = HeadlessHost::new();
    let ast = session.save_product(Product::new("file:/a.c", "ast", "text", "AST"));
    let source = host.open_editor("file:///a.c", ViewColumn::ONE);

    let Some(OpenedView::Editor(view)) = session.open_product(&mut host, &ast) else {
        panic!("text products open in an editor");
    };
    assert_eq!(host.editor_column(view), Some(ViewColumn::TWO));
    assert_eq!(host.editor_uri(view).as_deref(), Some(ast.as_str()));
    assert_eq!(host.active_editor(), Some(source));

    assert_eq!(
        session.open_product(&mut host, &ast),
        Some(OpenedView::Editor(view))
    );
}

#[test]
fn test_unknown_product_does_not_open() {
    let mut session = Session::default();
    let mut host = HeadlessHost::new();
    let missing = TargetUri::parse("monto:/a.c|ast.text").unwrap();
    assert_eq!(session.open_product(&mut host, &missing), None);
    assert!(host.visible_editors().is_empty());
}

#[test]
fn test_observed_columns_override_defaults() {
    let mut session = Session::default();
    let mut host = HeadlessHost::new();
    let ast = session.save_product(Product::new("file:/a.c", "ast", "text", "AST"));

    session.on_visible_editors_changed(&[
        EditorInfo {
            id: host.open_editor(ast.as_str(), ViewColumn::new(3)),
            uri: ast.as_str().to_string(),
            column: Some(ViewColumn::new(3)),
        },
        EditorInfo {
            id: host.open_editor("file:///b.c", ViewColumn::TWO),
            uri: "file:///b.c".to_string(),
            column: None,
        },
    ]);
    assert_eq!(session.views().recorded_column(ast.as_str()), Some(ViewColumn::new(3)));
    assert_eq!(session.views().recorded_column("file:///b.c"), None);

    let Some(OpenedView::Editor(view)) = session.open_product(&mut host, &ast) else {
        panic!("text products open in an editor");
    };
    assert_eq!(host.editor_column(view), Some(ViewColumn::new(3)));
}

#[test]
fn test_default_column_sticks_once_used() {
    let mut session = Session::default();
    let mut host = HeadlessHost::new();

    let editor = session.open_uri(&mut host, "file:///b.c").unwrap();
    assert_eq!(host.editor_column(editor), Some(ViewColumn::ONE));
    assert_eq!(session.views().recorded_column("file:///b.c"), Some(ViewColumn::ONE));

    let product = session.open_uri(&mut host, "monto:/b.c|ast.text").unwrap();
    assert_eq!(host.editor_column(product), Some(ViewColumn::TWO));

    session.on_visible_editors_changed(&[EditorInfo {
        id: editor,
        uri: "file:///b.c".to_string(),
        column: Some(ViewColumn::TWO),
    }]);
    let moved = session.open_uri(&mut host, "file:///b.c").unwrap();
    assert_ne!(moved, editor);
    assert_eq!(host.editor_column(moved), Some(ViewColumn::TWO));
}
