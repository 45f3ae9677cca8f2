//! Assistant calls driven through the IDE state

// Tests are allowed to use expect/unwrap for cleaner error messages
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use quill_assist::{AssistError, Assistant, Result, Transport};
use quill_core::prelude::*;

/// Counts calls and answers with a canned reply
#[derive(Clone, Default)]
struct Counting {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl Transport for Counting {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        if self.fail {
            return Err(AssistError::EmptyResponse);
        }
        assert!(prompt.contains("Code to"));
        Ok("### Code Explanation\nPrints a greeting.".to_string())
    }
}

#[tokio::test]
async fn rapid_triggers_make_one_call() {
    let transport = Counting::default();
    let calls = transport.calls.clone();
    let assistant = Assistant::new(transport);
    let mut state = IdeState::default();

    let mut effects: Vec<Effect> = (0..5)
        .filter_map(|_| state.dispatch(Action::Assist(AssistKind::Explain)))
        .collect();
    assert_eq!(effects.len(), 1);

    let Some(Effect::Assist(request)) = effects.pop() else {
        panic!("expected an assist effect");
    };
    let finished = assistant.handle(request).await;
    assert!(state.dispatch(finished).is_none());

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!state.is_loading());
    assert_eq!(
        state.console.lines(),
        [
            "> Asking AI about script.js...",
            "### Code Explanation",
            "Prints a greeting."
        ]
    );
}

#[tokio::test]
async fn failed_call_still_releases_the_gate() {
    let assistant = Assistant::new(Counting {
        fail: true,
        ..Counting::default()
    });
    let mut state = IdeState::default();
    state.dispatch(Action::Select("2".into()));

    let Some(Effect::Assist(request)) = state.dispatch(Action::Assist(AssistKind::GenerateTests))
    else {
        panic!("expected an assist effect");
    };
    assert_eq!(request.file_name, "index.html");

    let finished = assistant.handle(request).await;
    state.dispatch(finished);

    assert!(!state.is_loading());
    assert_eq!(
        state.console.lines().last().unwrap(),
        "An error occurred while communicating with the AI service: the model returned an empty response"
    );
    assert!(state.dispatch(Action::Run).is_some());
}
