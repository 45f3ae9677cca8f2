//! Integration tests for the edit -> compose -> sandbox -> console pipeline

// Tests are allowed to use expect/unwrap for cleaner error messages
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use quill_core::prelude::*;
use quill_core::preview::NOT_FOUND_DOCUMENT;
use quill_core::sandbox::host_page;

#[test]
fn edit_then_run_inlines_latest_content() {
    let mut state = IdeState::default();
    let (sender, mut relay) = relay_channel();
    let mut sandbox = SandboxHost::new(sender);

    state.dispatch(Action::Select("4".into()));
    state.dispatch(Action::Edit {
        id: "4".into(),
        content: "h1 { color: $red; }".into(),
    });

    let Some(Effect::LoadPreview(doc)) = state.dispatch(Action::Run) else {
        panic!("run should load a preview");
    };
    let frame = sandbox.load(doc);
    assert!(frame.srcdoc().contains("<style>h1 { color: $red; }</style>"));

    // What the injected script would post from inside the frame
    frame.post(RelayMessage::log("Calculation finished. Sum: 499500"));
    frame.post(RelayMessage::error(
        "Uncaught Error: x is not defined at about:srcdoc:42",
    ));

    while let Some(envelope) = relay.try_recv() {
        assert_eq!(envelope.instance, 1);
        state.dispatch(Action::Sandbox(envelope.message));
    }

    assert_eq!(
        state.console.lines(),
        [
            "> Executing code...",
            "> View the result in the Preview tab. Console is listening for logs.",
            "[LOG] Calculation finished. Sum: 499500",
            "[ERR] Uncaught Error: x is not defined at about:srcdoc:42",
        ]
    );
}

#[test]
fn every_updated_file_is_found_with_new_content() {
    let tree = seed_project();
    let file_ids: Vec<String> = tree
        .iter()
        .filter(|n| n.is_file())
        .map(|n| n.id.clone())
        .collect();

    for id in &file_ids {
        let updated = tree.update_content(id, format!("edited {id}"));
        assert_eq!(updated.find_by_id(id).unwrap().content, format!("edited {id}"));
        for other in file_ids.iter().filter(|other| *other != id) {
            assert_eq!(
                updated.find_by_id(other).unwrap().content,
                tree.find_by_id(other).unwrap().content
            );
        }
    }
}

#[test]
fn removing_index_falls_back_to_sentinel() {
    let tree = FileTree::new(vec![
        FileNode::file("1", "style.css", "/style.css", "body{}"),
        FileNode::file("2", "script.js", "/script.js", "go()"),
    ])
    .unwrap();
    let mut state = IdeState::new(tree, LayoutConfig::default());
    assert!(state.tabs.is_empty());

    let Some(Effect::LoadPreview(doc)) = state.dispatch(Action::RefreshPreview) else {
        panic!("refresh should load a preview");
    };
    assert!(doc.is_not_found());
    assert_eq!(doc.html(), NOT_FOUND_DOCUMENT);
    assert!(host_page(&doc).contains("index.html not found"));
}

#[test]
fn closing_tabs_walks_left() {
    let mut state = IdeState::default();
    for id in ["2", "4", "6"] {
        state.dispatch(Action::Select(id.into()));
    }
    assert_eq!(state.tabs.ids(), ["5", "2", "4", "6"]);

    state.dispatch(Action::Activate("4".into()));
    state.dispatch(Action::Close("4".into()));
    assert_eq!(state.tabs.active(), Some("2"));

    state.dispatch(Action::Close("6".into()));
    assert_eq!(state.tabs.active(), Some("2"));

    state.dispatch(Action::Activate("5".into()));
    state.dispatch(Action::Close("5".into()));
    assert_eq!(state.tabs.active(), Some("2"));

    state.dispatch(Action::Close("2".into()));
    assert_eq!(state.tabs.active(), None);
    assert!(state.active_file().is_none());
}
