//! Integration Tests for Terminal Session Flows
//!
//! Drive a full session (registry, dispatcher, store, reveals) the way the
//! UI does and check the resulting state.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use matrixterm::commands::{builtin, CommandContext, CommandHandler};
use matrixterm::history::HistoryDirection;
use matrixterm::terminal::KeyOutcome;
use matrixterm::{
    Command, CommandRegistry, Config, ControlBus, Dispatcher, KeyAction, Output, OutputKind,
    SessionExport, TerminalSession, Theme,
};
use test_utils::{session_with_bus, test_session};

#[tokio::test]
async fn test_session_starts_with_welcome_message() {
    let state = test_session().state();

    assert_eq!(state.history.len(), 1);
    let welcome = state.history[0].output.as_ref().unwrap();
    assert!(welcome.is_markup);
    assert_eq!(welcome.kind, OutputKind::Info);
    assert!(state.command_history.is_empty());
    assert_eq!(state.history_index, -1);
    assert!(!state.is_processing);
}

#[tokio::test]
async fn test_empty_input_is_ignored() {
    let session = test_session();
    let before = session.state();

    assert!(session.submit("").await.is_none());
    assert!(session.submit("   \t ").await.is_none());

    assert_eq!(session.state(), before);
}

#[tokio::test]
async fn test_unknown_command_is_recorded_with_error() {
    let session = test_session();
    let output = session.submit("nosuchcmd").await.unwrap();

    assert_eq!(output.kind, OutputKind::Error);
    assert!(output.content.contains("Command not found: nosuchcmd"));

    let state = session.state();
    assert_eq!(state.command_history, ["nosuchcmd"]);
    let entry = state.history.last().unwrap();
    assert_eq!(entry.command, "nosuchcmd");
    assert_eq!(entry.output.as_ref(), Some(&output));
}

#[tokio::test]
async fn test_alias_and_case_resolve_to_same_command() {
    let session = test_session();
    let by_name = session.dispatcher().dispatch("whoami").await;
    let by_case = session.dispatcher().dispatch("WhoAmI").await;
    assert_eq!(by_name, by_case);

    let registry = session.dispatcher().registry();
    let clear = registry.resolve("clear").unwrap();
    let cls = registry.resolve("CLS").unwrap();
    assert!(Arc::ptr_eq(&clear, &cls));
}

#[tokio::test]
async fn test_submit_trims_and_clears_input() {
    let session = test_session();
    session.set_input("  help  ");
    session.handle_key(KeyAction::Submit).await;

    let state = session.state();
    assert_eq!(state.command_history, ["help"]);
    assert!(state.current_input.is_empty());
    assert_eq!(state.history.last().unwrap().command, "help");
}

#[tokio::test]
async fn test_history_navigation_round_trip() {
    let session = test_session();
    for command in ["about", "skills", "date"] {
        session.submit(command).await;
    }

    assert_eq!(session.navigate_history(HistoryDirection::Up), "date");
    assert_eq!(session.navigate_history(HistoryDirection::Up), "skills");
    assert_eq!(session.navigate_history(HistoryDirection::Up), "about");
    // Oldest command stays put
    assert_eq!(session.navigate_history(HistoryDirection::Up), "about");
    assert_eq!(session.state().history_index, 2);

    assert_eq!(session.navigate_history(HistoryDirection::Down), "skills");
    assert_eq!(session.navigate_history(HistoryDirection::Down), "date");
    assert_eq!(session.navigate_history(HistoryDirection::Down), "");

    let state = session.state();
    assert_eq!(state.history_index, -1);
    assert!(state.current_input.is_empty());
}

#[tokio::test]
async fn test_navigation_on_empty_history_keeps_input() {
    let session = test_session();
    session.set_input("typed");

    assert_eq!(session.navigate_history(HistoryDirection::Up), "");
    let state = session.state();
    assert_eq!(state.current_input, "typed");
    assert_eq!(state.history_index, -1);
}

#[tokio::test]
async fn test_clear_and_cls_empty_the_history() {
    let session = test_session();
    session.submit("help").await;
    session.submit("whoami").await;

    assert!(session.submit("clear").await.is_none());
    let state = session.state();
    assert!(state.history.is_empty());
    assert_eq!(state.command_history, ["help", "whoami"]);

    session.submit("date").await;
    assert!(session.submit("cls").await.is_none());
    assert!(session.state().history.is_empty());

    // Recall still works after clearing
    assert_eq!(session.navigate_history(HistoryDirection::Up), "date");
}

#[tokio::test]
async fn test_autocomplete_single_and_multiple() {
    let session = test_session();

    session.set_input("he");
    let result = session.autocomplete();
    assert_eq!(result.candidates, ["help"]);
    assert_eq!(session.state().current_input, "help");

    session.set_input("e");
    let result = session.autocomplete();
    assert_eq!(result.candidates, ["experience", "education"]);
    assert_eq!(session.state().current_input, "e");

    session.set_input("zzz");
    assert!(session.autocomplete().is_empty());
    assert_eq!(session.state().current_input, "zzz");
}

#[tokio::test]
async fn test_theme_command_and_shortcut() {
    let session = test_session();
    assert_eq!(session.state().theme, Theme::Dark);

    let output = session.submit("theme").await.unwrap();
    assert_eq!(output.content, builtin::THEME_TOGGLED);
    assert_eq!(session.state().theme, Theme::Light);

    assert_eq!(session.toggle_theme(), Theme::Dark);
}

#[tokio::test]
async fn test_export_does_not_change_state() {
    let session = test_session();
    session.submit("whoami").await;
    let before = session.state();

    let first = session.export_session();
    let second = session.export_session();

    assert_eq!(session.state(), before);
    assert_eq!(first.history, second.history);
    assert_eq!(first.theme, second.theme);
    assert!(first.default_file_name().starts_with("terminal-session-"));

    let parsed = SessionExport::from_json(&first.to_json().unwrap()).unwrap();
    assert_eq!(parsed, first);
}

#[tokio::test]
async fn test_export_json_shape() {
    let session = test_session();
    session.submit("date").await;
    let json: serde_json::Value =
        serde_json::from_str(&session.export_session().to_json().unwrap()).unwrap();

    assert!(json["timestamp"].is_string());
    assert_eq!(json["theme"], "dark");
    assert_eq!(json["history"].as_array().unwrap().len(), 2);
    assert_eq!(json["history"][1]["command"], "date");
}

#[tokio::test]
async fn test_subscribers_see_submitted_state() {
    let session = test_session();
    let mut rx = session.subscribe();
    rx.borrow_and_update();

    session.submit("whoami").await;

    assert!(rx.has_changed().unwrap());
    let state = rx.borrow_and_update().clone();
    assert_eq!(state.command_history, ["whoami"]);
    assert!(!state.is_processing);
}

#[tokio::test]
async fn test_key_actions_map_to_operations() {
    let (session, _bus) = session_with_bus();

    match session.handle_key(KeyAction::Submit).await {
        KeyOutcome::Executed(None) => {}
        other => panic!("blank submit produced {other:?}"),
    }

    session.set_input("whoami");
    match session.handle_key(KeyAction::Submit).await {
        KeyOutcome::Executed(Some(output)) => assert_eq!(output.kind, OutputKind::Info),
        other => panic!("submit produced {other:?}"),
    }

    session.handle_key(KeyAction::HistoryUp).await;
    assert_eq!(session.state().current_input, "whoami");
    session.handle_key(KeyAction::HistoryDown).await;
    assert_eq!(session.state().current_input, "");

    session.set_input("junk");
    session.handle_key(KeyAction::ClearInput).await;
    assert_eq!(session.state().current_input, "");

    session.handle_key(KeyAction::ClearHistory).await;
    assert!(session.state().history.is_empty());
}

/// Sleeps, and records how many executions overlap
struct SlowCommand {
    running: Arc<AtomicUsize>,
    max_running: Arc<AtomicUsize>,
}

#[async_trait]
impl CommandHandler for SlowCommand {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        args: &[String],
    ) -> matrixterm::Result<Output> {
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_running.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.running.fetch_sub(1, Ordering::SeqCst);
        Ok(Output::success(format!("{} {}", ctx.invoked_as, args.join(" "))))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submits_run_one_at_a_time() {
    let running = Arc::new(AtomicUsize::new(0));
    let max_running = Arc::new(AtomicUsize::new(0));

    let mut registry = CommandRegistry::new();
    registry.register(Command::new(
        "slow",
        "Sleeps for a while",
        SlowCommand {
            running: Arc::clone(&running),
            max_running: Arc::clone(&max_running),
        },
    ));
    let session = Arc::new(TerminalSession::new(
        Dispatcher::new(Arc::new(registry)),
        Theme::Dark,
        "",
    ));

    let tasks: Vec<_> = (0..5)
        .map(|i| {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.submit(&format!("slow {i}")).await })
        })
        .collect();
    for task in tasks {
        assert!(task.await.unwrap().is_some());
    }

    assert_eq!(max_running.load(Ordering::SeqCst), 1);

    let state = session.state();
    assert_eq!(state.history.len(), 5);
    assert_eq!(state.command_history.len(), 5);
    for (entry, command) in state.history.iter().zip(&state.command_history) {
        assert_eq!(&entry.command, command);
        let output = entry.output.as_ref().unwrap();
        assert_eq!(output.content, *command);
    }
}

#[tokio::test(start_paused = true)]
async fn test_long_output_is_revealed_progressively() {
    let config = Config::default();
    assert!(config.terminal.typing_delay_ms > 0);
    let session = TerminalSession::from_config(&config, Arc::new(ControlBus::default()));

    let output = session.submit("about").await.unwrap();
    let entry_id = session.state().history.last().unwrap().id;

    assert!(session.reveals().is_revealing(entry_id));
    let shown = session.reveals().visible(entry_id, &output.content);
    assert!(shown.len() < output.content.len());

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(!session.reveals().is_revealing(entry_id));
    assert_eq!(
        session.reveals().visible(entry_id, &output.content),
        output.content
    );
}

#[tokio::test(start_paused = true)]
async fn test_clearing_history_cancels_reveals() {
    let session = TerminalSession::from_config(&Config::default(), Arc::new(ControlBus::default()));
    session.submit("projects").await;
    session.submit("experience").await;
    assert!(session.reveals().active() > 0);

    session.submit("clear").await;
    assert_eq!(session.reveals().active(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_reveals() {
    let session = TerminalSession::from_config(&Config::default(), Arc::new(ControlBus::default()));
    session.submit("about").await;
    assert!(session.reveals().active() > 0);

    session.shutdown();
    assert_eq!(session.reveals().active(), 0);
}
