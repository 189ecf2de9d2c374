//! Page shell: header, sidebar, main content and footer

use super::{html_escape, CreatePostForm, DetailView, PostsGrid, Sidebar};
use crate::config::BlogConfig;

/// Reports outside clicks and breakpoint-crossing resizes while the sidebar
/// is open. A close is mirrored onto the classes in place, without a reload.
const SIDEBAR_SCRIPT: &str = r#"<script>
(function() {
    var sidebar = document.getElementById('sidebar');
    var menuBtn = document.getElementById('menu-btn');
    var main = document.getElementById('main-content');
    var breakpoint = parseInt(sidebar.dataset.breakpoint, 10);
    function report(path, body) {
        fetch(path, {
            method: 'POST',
            headers: { 'Content-Type': 'application/x-www-form-urlencoded' },
            body: body
        }).then(function(res) { return res.json(); }).then(function(state) {
            if (state.closed) {
                sidebar.classList.remove('open');
                main.classList.remove('sidebar-open');
            }
        });
    }
    document.addEventListener('click', function(e) {
        if (!sidebar.classList.contains('open')) return;
        if (sidebar.contains(e.target) || menuBtn.contains(e.target)) return;
        report('/sidebar/click', 'target=elsewhere');
    });
    window.addEventListener('resize', function() {
        if (!sidebar.classList.contains('open')) return;
        if (window.innerWidth > breakpoint) return;
        report('/viewport', 'width=' + window.innerWidth);
    });
})();
</script>
"#;

/// Everything the page shell needs to render
pub struct Page<'a> {
    pub config: &'a BlogConfig,
    pub sidebar: &'a Sidebar,
    pub grid: &'a PostsGrid,
    pub detail: &'a DetailView,
    pub form: &'a CreatePostForm,
}

impl Page<'_> {
    pub fn render(&self) -> String {
        let title = html_escape(&self.config.title);
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="generator" content="blogfront {version}">
<meta name="author" content="{author}">
<title>{title}</title>
</head>
<body>
<div class="app-container">
{header}<div class="content-container">
{sidebar}{main}</div>
{footer}</div>
{script}</body>
</html>
"#,
            version = env!("CARGO_PKG_VERSION"),
            title = title,
            author = html_escape(&self.config.author),
            header = self.render_header(),
            sidebar = self.render_sidebar(),
            main = self.render_main(),
            footer = self.render_footer(),
            script = SIDEBAR_SCRIPT,
        )
    }

    fn render_header(&self) -> String {
        format!(
            r#"<header>
  <form method="post" action="/sidebar/toggle"><button id="menu-btn" type="submit">☰</button></form>
  <h1>{}</h1>
</header>
"#,
            html_escape(&self.config.title)
        )
    }

    fn render_sidebar(&self) -> String {
        let links: String = self
            .config
            .sidebar
            .links
            .iter()
            .map(|link| {
                format!(
                    "  <a href=\"{}\">{}</a>\n",
                    html_escape(&link.href),
                    html_escape(&link.title)
                )
            })
            .collect();
        format!(
            r#"<div id="sidebar" class="{class}" data-breakpoint="{breakpoint}">
{links}  <a id="create-post-link" href="/create">Create Post</a>
</div>
"#,
            class = self.sidebar.class(),
            breakpoint = self.sidebar.breakpoint(),
            links = links,
        )
    }

    fn render_main(&self) -> String {
        let detail_class = if self.detail.is_active() {
            "post-detail active"
        } else {
            "post-detail"
        };
        format!(
            r#"<div class="{main_class}" id="main-content">
<div class="posts-grid" id="posts-grid" style="display: {grid_display}">
{grid}</div>
<div id="post-detail" class="{detail_class}">
<div class="detail-content">
{detail}</div>
<form method="post" action="/back"><button class="back-button" type="submit">← Back to Posts</button></form>
</div>
{form}</div>
"#,
            main_class = self.sidebar.main_class(),
            grid_display = self.grid.display(),
            grid = self.grid.content(),
            detail_class = detail_class,
            detail = self.detail.content(),
            form = self.form.render(),
        )
    }

    fn render_footer(&self) -> String {
        format!(
            "<footer>\n  <p>{}</p>\n</footer>\n",
            html_escape(&self.config.copyright)
        )
    }
}
