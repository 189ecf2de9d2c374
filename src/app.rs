//! The blog page: store, renderers and view state wired together

use chrono::Utc;
use tokio::sync::Mutex;

use crate::config::BlogConfig;
use crate::content::{MarkdownRenderer, Post};
use crate::export::PostExporter;
use crate::store::{Fetcher, PostStore, Storage};
use crate::view::layout::Page;
use crate::view::{ClickTarget, CreatePostForm, DetailView, PostsGrid, Sidebar, SubmitOutcome};

/// Presentation state of the page
#[derive(Debug, Clone)]
pub struct Screen {
    pub posts: Vec<Post>,
    pub grid: PostsGrid,
    pub detail: DetailView,
    pub sidebar: Sidebar,
    pub form: CreatePostForm,
}

impl Screen {
    pub fn new(breakpoint: u32) -> Self {
        Self {
            posts: Vec::new(),
            grid: PostsGrid::new(),
            detail: DetailView::new(),
            sidebar: Sidebar::new(breakpoint),
            form: CreatePostForm::new(),
        }
    }

    fn show_posts(&mut self, posts: Vec<Post>) {
        self.grid.render(&posts);
        self.posts = posts;
    }

    /// Replace an error left in the grid with the previews again
    fn restore_grid(&mut self) {
        if self.grid.has_error() {
            self.grid.render(&self.posts);
        }
    }
}

/// One blog page shared by every request.
///
/// UI state sits behind an async mutex; fetches run with the lock released.
pub struct BlogApp<F, S> {
    config: BlogConfig,
    store: PostStore<F, S>,
    renderer: MarkdownRenderer,
    exporter: PostExporter,
    screen: Mutex<Screen>,
}

impl<F: Fetcher, S: Storage> BlogApp<F, S> {
    pub fn new(config: BlogConfig, store: PostStore<F, S>, exporter: PostExporter) -> Self {
        let renderer = MarkdownRenderer::with_config(&config.highlight);
        let screen = Mutex::new(Screen::new(config.sidebar.breakpoint));
        Self {
            config,
            store,
            renderer,
            exporter,
            screen,
        }
    }

    pub fn config(&self) -> &BlogConfig {
        &self.config
    }

    pub fn store(&self) -> &PostStore<F, S> {
        &self.store
    }

    /// Load the post list and render the grid
    pub async fn initialize(&self) {
        let posts = self.store.load_posts().await;
        tracing::info!("Showing {} posts", posts.len());
        self.screen.lock().await.show_posts(posts);
    }

    /// Open the detail view for post `id`
    pub async fn open_post(&self, id: &str) {
        let ticket = self.screen.lock().await.detail.begin_show(id);

        let rendered = self
            .store
            .fetch_post_body(id)
            .await
            .map(|markdown| self.renderer.render(&markdown));

        let mut screen = self.screen.lock().await;
        let Screen { grid, detail, .. } = &mut *screen;
        detail.finish_show(ticket, rendered, grid);
    }

    /// Back to the grid, with the previews in place of any error
    pub async fn close_post(&self) {
        let mut screen = self.screen.lock().await;
        let Screen { grid, detail, .. } = &mut *screen;
        detail.hide(grid);
        screen.restore_grid();
    }

    /// Show the previews again if the grid is holding an error
    pub async fn restore_grid(&self) {
        self.screen.lock().await.restore_grid();
    }

    pub async fn open_create_form(&self) {
        self.screen.lock().await.form.open();
    }

    /// Submit the create-post form with the given inputs.
    ///
    /// Blank markdown is ignored. Otherwise the post is appended to a freshly
    /// loaded list, cached, exported, and the grid is re-rendered from the
    /// updated list.
    pub async fn submit_post(&self, title: &str, markdown: &str) -> SubmitOutcome {
        if markdown.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }
        let form = {
            let mut screen = self.screen.lock().await;
            screen.form.fill(title, markdown);
            screen.form.clone()
        };

        let mut posts = self.store.load_posts().await;
        let Some(post) = form.compose(Utc::now(), &posts, &self.config.new_post) else {
            return SubmitOutcome::Ignored;
        };
        posts.push(post.clone());
        tracing::info!("Created post {} ({} posts)", post.id, posts.len());

        if let Err(e) = self.store.cache_posts(&posts) {
            tracing::warn!("Failed to cache post list: {}", e);
        }

        let exported = self.exporter.export(&posts).await;

        let mut screen = self.screen.lock().await;
        screen.show_posts(posts);
        match exported {
            Ok(target) => {
                screen.form.clear();
                screen.form.hide();
                screen.grid.set_visible(true);
                SubmitOutcome::Created { post, target }
            }
            Err(e) => {
                let message = format!("Error saving posts to JSON: {}", e);
                screen.grid.display_error(&message);
                SubmitOutcome::ExportFailed { post, message }
            }
        }
    }

    pub async fn toggle_sidebar(&self) {
        self.screen.lock().await.sidebar.toggle();
    }

    /// Returns whether the click closed the sidebar
    pub async fn click(&self, target: ClickTarget) -> bool {
        self.screen.lock().await.sidebar.on_click(target)
    }

    /// Returns whether the resize closed the sidebar
    pub async fn resize(&self, width: u32) -> bool {
        self.screen.lock().await.sidebar.on_resize(width)
    }

    /// Copy of the current presentation state
    pub async fn snapshot(&self) -> Screen {
        self.screen.lock().await.clone()
    }

    /// Render the full page
    pub async fn render_page(&self) -> String {
        let screen = self.screen.lock().await;
        Page {
            config: &self.config,
            sidebar: &screen.sidebar,
            grid: &screen.grid,
            detail: &screen.detail,
            form: &screen.form,
        }
        .render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportTarget;
    use crate::store::tests::sample_posts;
    use crate::store::{MemoryFetcher, MemoryStorage, ResourceLayout};
    use crate::view::ViewMode;
    use tempfile::TempDir;

    fn app(posts: &[Post]) -> (BlogApp<MemoryFetcher, MemoryStorage>, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = MemoryFetcher::new();
        fetcher.insert("/resources/posts.json", serde_json::to_string(posts).unwrap());
        let store = PostStore::new(fetcher, MemoryStorage::new(), ResourceLayout::default());
        let exporter = PostExporter::download_only(dir.path().join("downloads"));
        (BlogApp::new(BlogConfig::default(), store, exporter), dir)
    }

    #[tokio::test]
    async fn test_initialize_renders_every_post() {
        let (app, _dir) = app(&sample_posts(5));
        app.initialize().await;

        let screen = app.snapshot().await;
        assert_eq!(screen.posts.len(), 5);
        assert_eq!(screen.grid.preview_count(), 5);
    }

    #[tokio::test]
    async fn test_initialize_offline_without_cache_is_empty() {
        let (app, _dir) = app(&sample_posts(5));
        app.store().fetcher().set_offline(true);
        app.initialize().await;

        let screen = app.snapshot().await;
        assert!(screen.posts.is_empty());
        assert_eq!(screen.grid.preview_count(), 0);
        assert!(!screen.grid.has_error());
    }

    #[tokio::test]
    async fn test_open_and_close_post() {
        let (app, _dir) = app(&sample_posts(2));
        app.store().fetcher().insert("/resources/2.md", "# Second");
        app.initialize().await;

        app.open_post("2").await;
        let screen = app.snapshot().await;
        assert_eq!(screen.detail.mode(), ViewMode::Detail);
        assert!(screen.detail.content().contains("<h1>Second</h1>"));
        assert!(!screen.grid.is_visible());

        app.close_post().await;
        let screen = app.snapshot().await;
        assert_eq!(screen.detail.mode(), ViewMode::List);
        assert!(!screen.detail.is_active());
        assert!(screen.grid.is_visible());
        assert!(app.render_page().await.contains(r#"style="display: flex""#));
    }

    #[tokio::test]
    async fn test_open_missing_post_shows_error() {
        let (app, _dir) = app(&sample_posts(1));
        app.initialize().await;
        app.open_post("404").await;

        let screen = app.snapshot().await;
        assert_eq!(screen.detail.mode(), ViewMode::List);
        assert!(screen.grid.has_error());
        assert!(app
            .render_page()
            .await
            .contains("Error loading post detail: Failed to load post 404: 404 Not Found"));
    }

    #[tokio::test]
    async fn test_close_after_failed_show_restores_grid() {
        let (app, _dir) = app(&sample_posts(3));
        app.store().fetcher().insert("/resources/2.md", "# Second");
        app.initialize().await;

        app.open_post("missing").await;
        assert!(app.snapshot().await.grid.has_error());

        app.open_post("2").await;
        assert_eq!(app.snapshot().await.detail.mode(), ViewMode::Detail);

        app.close_post().await;
        let screen = app.snapshot().await;
        assert!(!screen.grid.has_error());
        assert_eq!(screen.grid.preview_count(), 3);
        assert!(app.render_page().await.contains(r#"class="post-preview""#));
    }

    #[tokio::test]
    async fn test_restore_grid_after_failed_show() {
        let (app, _dir) = app(&sample_posts(2));
        app.initialize().await;
        app.open_post("missing").await;

        app.restore_grid().await;
        let screen = app.snapshot().await;
        assert!(!screen.grid.has_error());
        assert_eq!(screen.grid.preview_count(), 2);
    }

    #[tokio::test]
    async fn test_blank_submission_changes_nothing() {
        let (app, dir) = app(&sample_posts(2));
        app.initialize().await;

        let outcome = app.submit_post("Draft", "  ").await;
        assert_eq!(outcome, SubmitOutcome::Ignored);
        let screen = app.snapshot().await;
        assert_eq!(screen.posts.len(), 2);
        assert!(screen.form.title().is_empty());
        assert!(screen.form.markdown().is_empty());
        assert_eq!(app.store().cached_posts().len(), 2);
        assert!(!dir.path().join("downloads/posts.json").exists());
    }

    #[tokio::test]
    async fn test_submission_appends_caches_and_exports() {
        let (app, dir) = app(&sample_posts(2));
        app.initialize().await;
        app.open_create_form().await;

        let body = "x".repeat(150);
        let outcome = app.submit_post("", &body).await;
        let SubmitOutcome::Created { post, target } = outcome else {
            panic!("expected a created post, got {:?}", outcome);
        };

        assert_eq!(post.excerpt, format!("{}...", "x".repeat(100)));
        assert_eq!(post.read_time, 5);
        assert_eq!(post.title, "New Post");
        assert_eq!(
            target,
            ExportTarget::Downloaded(dir.path().join("downloads/posts.json"))
        );

        let screen = app.snapshot().await;
        assert_eq!(screen.posts.len(), 3);
        assert_eq!(screen.grid.preview_count(), 3);
        assert!(!screen.form.is_visible());
        assert!(screen.form.markdown().is_empty());

        let cached = app.store().cached_posts();
        assert_eq!(cached.len(), 3);
        assert_eq!(cached.last(), Some(&post));

        let exported: Vec<Post> =
            serde_json::from_str(&std::fs::read_to_string(target.path()).unwrap()).unwrap();
        assert_eq!(exported.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_export_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // a file where the downloads directory should be
        let blocked = dir.path().join("downloads");
        std::fs::write(&blocked, "").unwrap();

        let store = PostStore::new(
            MemoryFetcher::new(),
            MemoryStorage::new(),
            ResourceLayout::default(),
        );
        let app = BlogApp::new(
            BlogConfig::default(),
            store,
            PostExporter::download_only(&blocked),
        );
        app.initialize().await;

        let outcome = app.submit_post("Title", "Body").await;
        assert!(matches!(outcome, SubmitOutcome::ExportFailed { .. }));
        assert_eq!(app.store().cached_posts().len(), 1);
        assert!(app
            .render_page()
            .await
            .contains("Error saving posts to JSON"));
    }

    #[tokio::test]
    async fn test_sidebar_events() {
        let (app, _dir) = app(&[]);
        app.toggle_sidebar().await;
        assert!(app.snapshot().await.sidebar.is_open());

        assert!(!app.click(ClickTarget::Sidebar).await);
        assert!(app.snapshot().await.sidebar.is_open());

        assert!(!app.resize(1024).await);
        assert!(app.resize(320).await);
        assert!(!app.snapshot().await.sidebar.is_open());
        assert!(!app.resize(320).await);

        app.toggle_sidebar().await;
        assert!(app.click(ClickTarget::Elsewhere).await);
    }
}
