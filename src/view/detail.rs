//! Post detail pane and the list/detail state machine

use super::PostsGrid;
use crate::Result;

/// Which region of the main content is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    List,
    Detail,
}

/// Handle for one in-flight `show`; only the newest ticket may complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowTicket {
    generation: u64,
    id: String,
}

impl ShowTicket {
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Detail pane state.
///
/// Starts in [`ViewMode::List`]. A show that fails leaves the mode alone and
/// puts the error message in the grid. Every `begin_show` and `hide` moves
/// the generation forward, so a response that arrives after a newer request
/// (or after the pane was closed) is dropped.
#[derive(Debug, Clone)]
pub struct DetailView {
    mode: ViewMode,
    post_id: Option<String>,
    content: String,
    error: Option<String>,
    generation: u64,
}

impl DetailView {
    pub fn new() -> Self {
        Self {
            mode: ViewMode::List,
            post_id: None,
            content: String::new(),
            error: None,
            generation: 0,
        }
    }

    /// Start showing post `id`; complete with [`DetailView::finish_show`]
    pub fn begin_show(&mut self, id: &str) -> ShowTicket {
        self.generation += 1;
        ShowTicket {
            generation: self.generation,
            id: id.to_string(),
        }
    }

    /// Apply the rendered body (or the failure) of a show.
    ///
    /// Returns false when the ticket was superseded and nothing changed.
    pub fn finish_show(
        &mut self,
        ticket: ShowTicket,
        rendered: Result<String>,
        grid: &mut PostsGrid,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!("Dropping stale detail response for post {}", ticket.id);
            return false;
        }

        match rendered {
            Ok(html) => {
                self.content = html;
                self.post_id = Some(ticket.id);
                self.error = None;
                self.toggle_views(true, grid);
            }
            Err(e) => {
                let message = format!("Error loading post detail: {}", e);
                grid.display_error(&message);
                self.error = Some(message);
            }
        }
        true
    }

    /// Go back to the grid; the rendered content stays until the next show
    pub fn hide(&mut self, grid: &mut PostsGrid) {
        self.generation += 1;
        self.toggle_views(false, grid);
    }

    fn toggle_views(&mut self, show_detail: bool, grid: &mut PostsGrid) {
        self.mode = if show_detail {
            ViewMode::Detail
        } else {
            ViewMode::List
        };
        grid.set_visible(!show_detail);
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Whether the pane carries the `active` class
    pub fn is_active(&self) -> bool {
        self.mode == ViewMode::Detail
    }

    /// Id of the post whose body is in the pane
    pub fn post_id(&self) -> Option<&str> {
        self.post_id.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Message of the last failed show, cleared by a successful one
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl Default for DetailView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn not_found(id: &str) -> Error {
        Error::PostLoad {
            id: id.to_string(),
            status: 404,
            status_text: "Not Found".to_string(),
        }
    }

    #[test]
    fn test_show_then_hide() {
        let mut grid = PostsGrid::new();
        let mut detail = DetailView::new();
        assert_eq!(detail.mode(), ViewMode::List);

        let ticket = detail.begin_show("1");
        assert!(detail.finish_show(ticket, Ok("<h1>One</h1>".to_string()), &mut grid));
        assert_eq!(detail.mode(), ViewMode::Detail);
        assert!(detail.is_active());
        assert_eq!(detail.post_id(), Some("1"));
        assert_eq!(grid.display(), "none");

        detail.hide(&mut grid);
        assert_eq!(detail.mode(), ViewMode::List);
        assert!(!detail.is_active());
        assert_eq!(grid.display(), "flex");
        assert_eq!(detail.content(), "<h1>One</h1>");
    }

    #[test]
    fn test_failed_show_stays_in_list() {
        let mut grid = PostsGrid::new();
        let mut detail = DetailView::new();

        let ticket = detail.begin_show("9");
        assert!(detail.finish_show(ticket, Err(not_found("9")), &mut grid));

        assert_eq!(detail.mode(), ViewMode::List);
        assert_eq!(
            detail.error(),
            Some("Error loading post detail: Failed to load post 9: 404 Not Found")
        );
        assert!(grid.has_error());
        assert!(grid.is_visible());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut grid = PostsGrid::new();
        let mut detail = DetailView::new();

        let slow = detail.begin_show("a");
        let fast = detail.begin_show("b");
        assert!(detail.finish_show(fast, Ok("<p>B</p>".to_string()), &mut grid));
        assert!(!detail.finish_show(slow, Ok("<p>A</p>".to_string()), &mut grid));

        assert_eq!(detail.post_id(), Some("b"));
        assert_eq!(detail.content(), "<p>B</p>");
    }

    #[test]
    fn test_response_after_hide_is_dropped() {
        let mut grid = PostsGrid::new();
        let mut detail = DetailView::new();

        let ticket = detail.begin_show("a");
        detail.hide(&mut grid);
        assert!(!detail.finish_show(ticket, Ok("<p>A</p>".to_string()), &mut grid));
        assert_eq!(detail.mode(), ViewMode::List);
        assert!(grid.is_visible());
    }
}
