//! # View Controller
//!
//! Executes interpreted commands against the remote service, owns the single
//! [`ViewState`] instance, and writes every render wholesale through the
//! configured [`Surface`].
//!
//! ## State machine
//!
//! Each command requiring a remote call moves `Idle -> Loading` (rendering a
//! placeholder immediately), then `Loading -> Rendered` on success or
//! `Loading -> Error` on failure. An error never ends the session: the
//! controller resets to `Idle` when the next command arrives. There is no
//! terminal state.
//!
//! ## Scheduling
//!
//! A successful create schedules a deferred `show_list` so the new post
//! becomes visible once the service has committed it (the create response is
//! only an id, not proof of visibility in listings). The task is detached; a
//! [`RefreshHandle`] is kept and [`ViewController::cancel_pending_refresh`]
//! can void it, but the REPL never does, so a refresh fired after the user
//! navigated away still overwrites the display. Accepted behavior.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::command::{self, Command};
use crate::form::{CompositionForm, FormStep};
use crate::model::{CurrentView, ViewState};
use crate::price::PriceFeed;
use crate::render;
use crate::service::RemoteService;
use crate::surface::{RenderKind, Surface};

/// Delay before the post-create list refresh fires.
pub const REFRESH_DELAY: Duration = Duration::from_millis(2000);

const CANCEL_KEYWORD: &str = "cancel";
const VALIDATION_TEXT: &str = "Title and content are required.";
const FORM_INTRO: &str = "Composing a new post. Type \"cancel\" at any prompt to abort.";
const PRICE_UNAVAILABLE_TEXT: &str = "Price feed unavailable.";

/// Where the controller is in its command lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Rendered,
    Error,
}

/// Outcome of a create submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The post was created with this id.
    Created(u64),
    /// Title or content was empty; no remote call was made.
    Invalid,
    /// The remote call failed.
    Failed,
}

/// Handle to a scheduled list refresh.
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub fn abort(&self) {
        self.task.abort();
    }
}

#[derive(Default)]
struct ControllerState {
    view: ViewState,
    phase: Phase,
    form: CompositionForm,
    pending_refresh: Option<RefreshHandle>,
}

struct Inner {
    service: Arc<dyn RemoteService>,
    surface: Arc<dyn Surface>,
    state: Mutex<ControllerState>,
}

/// The view-state controller. One per session.
pub struct ViewController {
    inner: Arc<Inner>,
    price_feed: Option<Arc<dyn PriceFeed>>,
    refresh_delay: Duration,
}

impl ViewController {
    pub fn new(service: Arc<dyn RemoteService>, surface: Arc<dyn Surface>) -> Self {
        Self {
            inner: Arc::new(Inner {
                service,
                surface,
                state: Mutex::new(ControllerState::default()),
            }),
            price_feed: None,
            refresh_delay: REFRESH_DELAY,
        }
    }

    /// Attach the optional price-feed collaborator. Without one, the `price`
    /// command degrades to an "unavailable" notice.
    pub fn with_price_feed(mut self, feed: Arc<dyn PriceFeed>) -> Self {
        self.price_feed = Some(feed);
        self
    }

    /// Override the post-create refresh delay (tests use short delays).
    pub fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    /// Interpret and execute one (pre-trimmed) command line.
    ///
    /// While the composition form is open, lines are routed to it instead of
    /// the interpreter.
    pub async fn handle(&self, line: &str) {
        let line = line.trim();

        // The form sees empty lines too ("keep the current value").
        if self.form_open().await {
            self.form_input(line).await;
            return;
        }
        if line.is_empty() {
            return;
        }

        // A failed command reported its error already; the next command
        // starts from Idle.
        {
            let mut st = self.inner.state.lock().await;
            if st.phase == Phase::Error {
                st.phase = Phase::Idle;
            }
        }

        match command::parse(line) {
            Command::List => self.show_list().await,
            Command::View(id) => self.show_post(id).await,
            Command::Create => self.open_form().await,
            Command::Search(query) => self.run_search(&query).await,
            Command::Price => self.show_price().await,
            Command::Help => {
                self.inner
                    .surface
                    .render(RenderKind::Content, command::HELP_TEXT)
            }
            Command::Usage(hint) => self.inner.surface.render(RenderKind::Notice, hint),
            Command::Unknown(_) => self
                .inner
                .surface
                .render(RenderKind::Notice, command::UNKNOWN_TEXT),
        }
    }

    /// Fetch and render all posts; switches the current view to the list.
    pub async fn show_list(&self) {
        self.inner.show_list().await;
    }

    /// Fetch and render a single post. An unknown id renders "Post not
    /// found." and leaves the current view untouched.
    pub async fn show_post(&self, id: u64) {
        self.inner.begin_loading("Loading post...").await;
        match self.inner.service.get_post(id).await {
            Ok(Some(post)) => {
                self.inner
                    .surface
                    .render(RenderKind::Content, &render::full_post(&post));
                let mut st = self.inner.state.lock().await;
                st.view.current_view = CurrentView::Post;
                st.view.current_post_id = Some(id);
                st.phase = Phase::Rendered;
            }
            Ok(None) => {
                self.inner
                    .surface
                    .render(RenderKind::Content, render::POST_NOT_FOUND_TEXT);
                let mut st = self.inner.state.lock().await;
                st.phase = Phase::Rendered;
            }
            Err(err) => self.inner.fail(&err.to_string()).await,
        }
    }

    /// Search and render matches in summary form. Never mutates the current
    /// view; zero matches render as an empty list.
    pub async fn run_search(&self, query: &str) {
        self.inner.begin_loading("Searching posts...").await;
        match self.inner.service.search_posts(query).await {
            Ok(posts) => {
                self.inner
                    .surface
                    .render(RenderKind::Content, &render::post_list(&posts));
                let mut st = self.inner.state.lock().await;
                st.phase = Phase::Rendered;
            }
            Err(err) => self.inner.fail(&err.to_string()).await,
        }
    }

    /// Validate and submit a new post.
    ///
    /// Empty (after trimming) title or content fails validation without
    /// contacting the service. On success the new id is rendered, the form
    /// closes, and a delayed [`show_list`](Self::show_list) refresh is
    /// scheduled so the post shows up once the service has committed it.
    pub async fn submit_create(
        &self,
        title: &str,
        content: &str,
        tags: Vec<String>,
    ) -> CreateOutcome {
        if title.trim().is_empty() || content.trim().is_empty() {
            self.inner.surface.render(RenderKind::Error, VALIDATION_TEXT);
            return CreateOutcome::Invalid;
        }

        self.inner.begin_loading("Creating post...").await;
        match self.inner.service.create_post(title, content, &tags).await {
            Ok(id) => {
                self.inner
                    .surface
                    .render(RenderKind::Content, &format!("Post created with ID: {}", id));
                let handle = self.schedule_refresh();
                let mut st = self.inner.state.lock().await;
                st.form.close();
                st.view.form_open = false;
                st.phase = Phase::Rendered;
                st.pending_refresh = Some(handle);
                CreateOutcome::Created(id)
            }
            Err(err) => {
                {
                    let mut st = self.inner.state.lock().await;
                    st.form.close();
                    st.view.form_open = false;
                }
                self.inner.fail(&err.to_string()).await;
                CreateOutcome::Failed
            }
        }
    }

    /// Abort a scheduled post-create refresh, if any. Nothing in the REPL
    /// calls this yet; a stale refresh overwriting the display is accepted.
    pub async fn cancel_pending_refresh(&self) {
        let mut st = self.inner.state.lock().await;
        if let Some(handle) = st.pending_refresh.take() {
            handle.abort();
        }
    }

    pub async fn phase(&self) -> Phase {
        self.inner.state.lock().await.phase
    }

    pub async fn view_state(&self) -> ViewState {
        self.inner.state.lock().await.view.clone()
    }

    async fn form_open(&self) -> bool {
        self.inner.state.lock().await.view.form_open
    }

    async fn open_form(&self) {
        let prompt = {
            let mut st = self.inner.state.lock().await;
            let prompt = st.form.open();
            st.view.form_open = true;
            prompt
        };
        self.inner
            .surface
            .render(RenderKind::Notice, &format!("{}\n{}", FORM_INTRO, prompt));
    }

    async fn form_input(&self, line: &str) {
        if line.eq_ignore_ascii_case(CANCEL_KEYWORD) {
            {
                let mut st = self.inner.state.lock().await;
                st.form.cancel();
                st.view.form_open = false;
            }
            self.inner
                .surface
                .render(RenderKind::Notice, "Post creation cancelled.");
            return;
        }

        let step = self.inner.state.lock().await.form.input(line);
        match step {
            FormStep::Prompt(prompt) => self.inner.surface.render(RenderKind::Notice, &prompt),
            FormStep::Submit(submission) => {
                let outcome = self
                    .submit_create(&submission.title, &submission.content, submission.tags)
                    .await;
                if outcome == CreateOutcome::Invalid {
                    // Keep the fields; restart at the title prompt.
                    let prompt = self.inner.state.lock().await.form.reopen_for_correction();
                    self.inner.surface.render(RenderKind::Notice, &prompt);
                }
            }
        }
    }

    async fn show_price(&self) {
        let Some(feed) = self.price_feed.clone() else {
            self.inner
                .surface
                .render(RenderKind::Notice, PRICE_UNAVAILABLE_TEXT);
            return;
        };

        self.inner.begin_loading("Fetching price...").await;
        match feed.spot_price().await {
            Ok(quote) => {
                self.inner
                    .surface
                    .render(RenderKind::Content, &quote.display());
                let mut st = self.inner.state.lock().await;
                st.phase = Phase::Rendered;
            }
            Err(err) => self.inner.fail(&err.to_string()).await,
        }
    }

    fn schedule_refresh(&self) -> RefreshHandle {
        let inner = Arc::clone(&self.inner);
        let delay = self.refresh_delay;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!("post-create refresh firing");
            inner.show_list().await;
        });
        RefreshHandle { task }
    }
}

impl Inner {
    async fn begin_loading(&self, placeholder: &str) {
        self.state.lock().await.phase = Phase::Loading;
        self.surface.render(RenderKind::Loading, placeholder);
    }

    async fn fail(&self, description: &str) {
        warn!(description, "remote call failed");
        self.surface
            .render(RenderKind::Error, &format!("Error: {}", description));
        self.state.lock().await.phase = Phase::Error;
    }

    async fn show_list(&self) {
        self.begin_loading("Loading posts...").await;
        match self.service.get_posts().await {
            Ok(posts) => {
                self.surface
                    .render(RenderKind::Content, &render::post_list(&posts));
                let mut st = self.state.lock().await;
                st.view.current_view = CurrentView::List;
                st.phase = Phase::Rendered;
            }
            Err(err) => self.fail(&err.to_string()).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::{Quote, StaticPriceFeed};
    use crate::service::memory::InMemoryService;
    use crate::surface::RecordingSurface;

    fn fixture() -> (Arc<InMemoryService>, Arc<RecordingSurface>, ViewController) {
        let service = Arc::new(InMemoryService::new());
        let surface = Arc::new(RecordingSurface::new());
        let controller = ViewController::new(service.clone(), surface.clone());
        (service, surface, controller)
    }

    #[tokio::test]
    async fn list_renders_summaries_and_switches_view() {
        let (service, surface, ctrl) = fixture();
        service.seed("First", &"x".repeat(150), &["a", "b"]);
        service.seed("Second", "short", &[]);

        ctrl.handle("list").await;

        let frames = surface.frames();
        assert_eq!(
            frames[0],
            (RenderKind::Loading, "Loading posts...".to_string())
        );
        let (kind, text) = surface.last().unwrap();
        assert_eq!(kind, RenderKind::Content);
        assert!(text.contains("First"));
        assert!(text.contains("Second"));
        // Content is truncated to 100 chars plus ellipsis.
        assert!(text.contains(&format!("{}...", "x".repeat(100))));
        assert!(!text.contains(&"x".repeat(101)));
        assert_eq!(ctrl.phase().await, Phase::Rendered);
        assert_eq!(ctrl.view_state().await.current_view, CurrentView::List);
        assert_eq!(service.call_counts().get_posts, 1);
    }

    #[tokio::test]
    async fn view_renders_full_content_and_tracks_the_post() {
        let (service, surface, ctrl) = fixture();
        let long = "y".repeat(300);
        let id = service.seed("Deep dive", &long, &["tag"]);

        ctrl.handle(&format!("view {}", id)).await;

        let (_, text) = surface.last().unwrap();
        assert!(text.contains(&long));
        let state = ctrl.view_state().await;
        assert_eq!(state.current_view, CurrentView::Post);
        assert_eq!(state.current_post_id, Some(id));
    }

    #[tokio::test]
    async fn missing_post_leaves_the_view_unchanged() {
        let (service, surface, ctrl) = fixture();
        let id = service.seed("Here", "body", &[]);
        ctrl.handle(&format!("view {}", id)).await;

        ctrl.handle("view 999").await;

        assert_eq!(surface.last().unwrap().1, "Post not found.");
        let state = ctrl.view_state().await;
        assert_eq!(state.current_view, CurrentView::Post);
        assert_eq!(state.current_post_id, Some(id));
    }

    #[tokio::test]
    async fn search_never_mutates_the_view() {
        let (service, surface, ctrl) = fixture();
        let id = service.seed("Anchor", "body", &[]);
        service.seed("Other", "body", &[]);
        ctrl.handle(&format!("view {}", id)).await;

        ctrl.handle("search no such thing").await;
        assert_eq!(surface.last().unwrap().1, "No posts found.");

        ctrl.handle("search Other").await;
        assert!(surface.last().unwrap().1.contains("Other"));

        let state = ctrl.view_state().await;
        assert_eq!(state.current_view, CurrentView::Post);
        assert_eq!(state.current_post_id, Some(id));
        assert_eq!(service.call_counts().search_posts, 2);
    }

    #[tokio::test]
    async fn empty_title_or_content_fails_validation_without_remote_calls() {
        let (service, surface, ctrl) = fixture();

        let first = ctrl.submit_create("", "body", vec![]).await;
        let second = ctrl.submit_create("title", "", vec![]).await;
        let third = ctrl.submit_create("   ", "body", vec![]).await;

        assert_eq!(first, CreateOutcome::Invalid);
        assert_eq!(second, CreateOutcome::Invalid);
        assert_eq!(third, CreateOutcome::Invalid);
        assert_eq!(service.call_counts().total(), 0);
        let (kind, text) = surface.last().unwrap();
        assert_eq!(kind, RenderKind::Error);
        assert_eq!(text, "Title and content are required.");
    }

    #[tokio::test(start_paused = true)]
    async fn created_post_appears_in_the_delayed_refresh() {
        let (service, surface, ctrl) = fixture();

        let outcome = ctrl
            .submit_create("T", "C", vec!["a".into(), "b".into()])
            .await;
        let CreateOutcome::Created(id) = outcome else {
            panic!("create failed: {:?}", outcome);
        };
        assert!(surface
            .last()
            .unwrap()
            .1
            .contains(&format!("Post created with ID: {}", id)));

        // Nothing fires before the delay elapses.
        tokio::time::sleep(REFRESH_DELAY - Duration::from_millis(100)).await;
        assert!(surface.last().unwrap().1.starts_with("Post created"));

        tokio::time::sleep(Duration::from_millis(200)).await;

        let (_, text) = surface.last().unwrap();
        assert!(text.starts_with("T\n"));
        assert!(text.contains("a, b"));
        assert_eq!(ctrl.view_state().await.current_view, CurrentView::List);

        let post = service.get_post(id).await.unwrap().unwrap();
        assert_eq!(post.title, "T");
        assert_eq!(post.content, "C");
        assert_eq!(post.tags, vec!["a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_refresh_never_fires() {
        let (_service, surface, ctrl) = fixture();
        ctrl.submit_create("T", "C", vec![]).await;
        ctrl.cancel_pending_refresh().await;

        tokio::time::sleep(Duration::from_secs(5)).await;

        assert!(surface.last().unwrap().1.starts_with("Post created with ID:"));
    }

    #[tokio::test]
    async fn remote_failure_is_reported_and_recovered_from() {
        let (service, surface, ctrl) = fixture();
        service.fail_next("connection reset");

        ctrl.handle("list").await;

        let (kind, text) = surface.last().unwrap();
        assert_eq!(kind, RenderKind::Error);
        assert!(text.starts_with("Error: "));
        assert!(text.contains("connection reset"));
        assert_eq!(ctrl.phase().await, Phase::Error);

        // The next command starts clean.
        ctrl.handle("list").await;
        assert_eq!(ctrl.phase().await, Phase::Rendered);
    }

    #[tokio::test]
    async fn help_is_static_and_makes_no_remote_call() {
        let (service, surface, ctrl) = fixture();
        ctrl.handle("help").await;

        assert_eq!(surface.last().unwrap().1, command::HELP_TEXT);
        for name in ["list", "view", "create", "search", "price"] {
            assert!(command::HELP_TEXT.contains(name), "help misses {}", name);
        }
        assert_eq!(service.call_counts().total(), 0);
    }

    #[tokio::test]
    async fn unknown_and_usage_render_hints_without_remote_calls() {
        let (service, surface, ctrl) = fixture();

        ctrl.handle("frobnicate").await;
        assert_eq!(surface.last().unwrap().1, command::UNKNOWN_TEXT);

        ctrl.handle("view").await;
        assert_eq!(surface.last().unwrap().1, "Usage: view [post_id]");

        ctrl.handle("view seven").await;
        assert_eq!(surface.last().unwrap().1, "Usage: view [post_id]");

        assert_eq!(service.call_counts().total(), 0);
    }

    #[tokio::test]
    async fn price_degrades_gracefully_without_a_feed() {
        let (service, surface, ctrl) = fixture();
        ctrl.handle("price").await;
        assert_eq!(surface.last().unwrap().1, "Price feed unavailable.");
        assert_eq!(service.call_counts().total(), 0);
    }

    #[tokio::test]
    async fn price_renders_the_quote() {
        let service = Arc::new(InMemoryService::new());
        let surface = Arc::new(RecordingSurface::new());
        let feed = StaticPriceFeed {
            quote: Quote {
                base: "ICP".into(),
                currency: "USD".into(),
                amount: "12.34".into(),
            },
        };
        let ctrl = ViewController::new(service, surface.clone()).with_price_feed(Arc::new(feed));

        ctrl.handle("price").await;

        assert_eq!(surface.last().unwrap().1, "1 ICP = 12.34 USD");
    }

    #[tokio::test]
    async fn create_command_drives_the_form_to_submission() {
        let (service, surface, ctrl) = fixture();

        ctrl.handle("create").await;
        assert!(ctrl.view_state().await.form_open);
        assert!(surface.last().unwrap().1.ends_with("Title:"));

        ctrl.handle("My title").await;
        ctrl.handle("a, b ,c").await;
        ctrl.handle("The body").await;

        assert!(!ctrl.view_state().await.form_open);
        let posts = service.get_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "My title");
        assert_eq!(posts[0].content, "The body");
        assert_eq!(posts[0].tags, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn form_stays_open_after_validation_failure() {
        let (service, _surface, ctrl) = fixture();

        ctrl.handle("create").await;
        ctrl.handle("").await; // title left empty
        ctrl.handle("tag").await;
        ctrl.handle("body").await; // submit -> validation fails

        assert!(ctrl.view_state().await.form_open);
        assert_eq!(service.call_counts().total(), 0);

        // Correction pass: supply the title, keep the rest.
        ctrl.handle("Now titled").await;
        ctrl.handle("").await;
        ctrl.handle("").await;

        assert!(!ctrl.view_state().await.form_open);
        assert_eq!(service.call_counts().create_post, 1);
        let posts = service.get_posts().await.unwrap();
        assert_eq!(posts[0].title, "Now titled");
        assert_eq!(posts[0].content, "body");
        assert_eq!(posts[0].tags, vec!["tag"]);
    }

    #[tokio::test]
    async fn cancel_closes_the_form_and_discards_fields() {
        let (service, surface, ctrl) = fixture();

        ctrl.handle("create").await;
        ctrl.handle("Doomed title").await;
        ctrl.handle("cancel").await;

        assert!(!ctrl.view_state().await.form_open);
        assert_eq!(surface.last().unwrap().1, "Post creation cancelled.");
        assert_eq!(service.call_counts().total(), 0);

        // Reopening starts from a blank form.
        ctrl.handle("create").await;
        assert!(surface.last().unwrap().1.ends_with("Title:"));
    }
}
