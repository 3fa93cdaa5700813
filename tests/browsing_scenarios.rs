//! End-to-end browsing scenarios against a scripted source.
//!
//! Exercises the state machine the way the event loop does: key actions go
//! through `dispatch`, the list notifies its listeners, the detail view
//! follows the highlight.

use ghscout::clipboard::MemoryClipboard;
use ghscout::model::{FetchError, KeyAction, PageIndex, RepositorySummary};
use ghscout::source::{RetryPolicy, ScriptedSource, Sleeper};
use ghscout::state::{
    dispatch, AppState, Control, FetchStatus, FocusPane, Navigation, PaginationController,
    QueryInput,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Clone, Default)]
struct RecordingSleeper(Rc<RefCell<Vec<Duration>>>);

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.0.borrow_mut().push(duration);
    }
}

fn repo(name: &str, stars: u64) -> RepositorySummary {
    RepositorySummary::new(name, format!("https://github.com/{name}")).with_stars(stars)
}

fn app_with(source: &Rc<ScriptedSource>) -> AppState {
    AppState::new(PaginationController::new(
        Box::new(Rc::clone(source)),
        RetryPolicy::immediate(3),
    ))
}

fn submit(app: &mut AppState, query: &str, clipboard: &mut MemoryClipboard) {
    app.query_input = QueryInput::with_text(query);
    app.focus = FocusPane::Query;
    dispatch(app, KeyAction::SubmitQuery, clipboard);
}

fn detail_field(app: &AppState, label: &str) -> Option<String> {
    app.detail()
        .repository()?
        .detail_fields()
        .into_iter()
        .find(|(l, _)| *l == label)
        .map(|(_, v)| v)
}

#[test]
fn raft_single_page_scenario() {
    let source = Rc::new(ScriptedSource::new().with_pages(
        "raft",
        vec![vec![repo("A", 10), repo("B", 20), repo("C", 30)]],
    ));
    let mut app = app_with(&source);
    let mut clipboard = MemoryClipboard::new();

    submit(&mut app, "raft", &mut clipboard);

    assert_eq!(
        app.controller().buffer().labels(),
        vec!["0: A", "1: B", "2: C"]
    );
    assert_eq!(detail_field(&app, "Full name").as_deref(), Some("A"));
    assert_eq!(detail_field(&app, "Number of stars").as_deref(), Some("10"));

    dispatch(&mut app, KeyAction::SelectNext, &mut clipboard);
    dispatch(&mut app, KeyAction::SelectNext, &mut clipboard);

    assert_eq!(app.results().selected(), Some(2));
    assert_eq!(detail_field(&app, "Full name").as_deref(), Some("C"));
    assert_eq!(detail_field(&app, "Number of stars").as_deref(), Some("30"));

    dispatch(&mut app, KeyAction::NextPage, &mut clipboard);

    assert_eq!(app.controller().page(), PageIndex::FIRST);
    assert_eq!(
        app.controller().buffer().labels(),
        vec!["0: A", "1: B", "2: C"]
    );
    assert_eq!(app.controller().page_label(), "Page 1/-");
    // The list was not replaced, so the highlight stays where it was.
    assert_eq!(app.results().selected(), Some(2));
}

#[test]
fn rate_limited_twice_then_success_installs_page_once() {
    let source = Rc::new(ScriptedSource::new().with_pages("q", vec![vec![repo("only/one", 1)]]));
    source.fail_next(FetchError::RateLimited { attempts: 1 });
    source.fail_next(FetchError::RateLimited { attempts: 1 });
    let sleeper = RecordingSleeper::default();
    let controller = PaginationController::new(Box::new(Rc::clone(&source)), RetryPolicy::default())
        .with_sleeper(Box::new(sleeper.clone()));
    let mut app = AppState::new(controller);

    submit(&mut app, "q", &mut MemoryClipboard::new());

    assert_eq!(app.controller().buffer().labels(), vec!["0: only/one"]);
    assert_eq!(source.calls().len(), 3);
    assert_eq!(
        *sleeper.0.borrow(),
        vec![Duration::from_millis(500), Duration::from_millis(1000)]
    );
    assert_eq!(
        app.controller().status(),
        &FetchStatus::Loaded {
            page: PageIndex::FIRST,
            count: 1
        }
    );
}

#[test]
fn copy_yields_url_of_backing_entry_and_ends_session() {
    let source = Rc::new(ScriptedSource::new().with_pages(
        "q",
        vec![vec![repo("x/zero", 0), repo("x/one", 0), repo("x/two", 0)]],
    ));
    for index in 0..3 {
        let mut app = app_with(&source);
        let mut clipboard = MemoryClipboard::new();
        submit(&mut app, "q", &mut clipboard);
        for _ in 0..index {
            app.navigate_results(Navigation::Down);
        }

        let control = dispatch(&mut app, KeyAction::CopyUrl, &mut clipboard);

        let expected = app.controller().buffer().get(index).unwrap().html_url.clone();
        assert_eq!(control, Control::CopiedAndExit(expected.clone()));
        assert_eq!(clipboard.copied(), [expected]);
    }
}

#[test]
fn listeners_fire_in_order_and_removal_is_isolated() {
    let source = Rc::new(
        ScriptedSource::new().with_pages("q", vec![vec![repo("a/a", 0), repo("b/b", 0)]]),
    );
    let mut app = app_with(&source);
    submit(&mut app, "q", &mut MemoryClipboard::new());

    let log = Rc::new(RefCell::new(Vec::new()));
    let ids: Vec<_> = ["first", "second", "third"]
        .into_iter()
        .map(|name| {
            let log = Rc::clone(&log);
            app.results_mut()
                .add_listener(move |_: &mut AppState| log.borrow_mut().push(name))
        })
        .collect();

    app.navigate_results(Navigation::Down);
    assert_eq!(*log.borrow(), vec!["first", "second", "third"]);

    assert!(app.results_mut().remove_listener(ids[1]));
    log.borrow_mut().clear();
    app.navigate_results(Navigation::Up);

    assert_eq!(*log.borrow(), vec!["first", "third"]);
    // The built-in detail listener still runs.
    assert_eq!(
        app.detail().repository().map(|r| r.full_name.as_str()),
        Some("a/a")
    );
}

#[test]
fn failed_page_change_keeps_display_and_reports_status() {
    let source = Rc::new(
        ScriptedSource::new().with_pages("q", vec![vec![repo("a/a", 0)], vec![repo("b/b", 0)]]),
    );
    let mut app = app_with(&source);
    let mut clipboard = MemoryClipboard::new();
    submit(&mut app, "q", &mut clipboard);
    source.fail_next(FetchError::Transport("connection reset".to_string()));

    let control = dispatch(&mut app, KeyAction::NextPage, &mut clipboard);

    assert_eq!(control, Control::Continue);
    assert_eq!(app.controller().buffer().labels(), vec!["0: a/a"]);
    assert_eq!(app.controller().page_label(), "Page 1/-");
    assert_eq!(
        app.controller().status(),
        &FetchStatus::Failed {
            reason: "network error".to_string()
        }
    );
}
