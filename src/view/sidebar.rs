//! Sidebar navigation state

/// What a click on the page landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Sidebar,
    MenuButton,
    Elsewhere,
}

impl ClickTarget {
    /// Parse the target name sent by the page script
    pub fn from_name(name: &str) -> Self {
        match name {
            "sidebar" => ClickTarget::Sidebar,
            "menu-btn" | "menu" => ClickTarget::MenuButton,
            _ => ClickTarget::Elsewhere,
        }
    }
}

/// Open/closed state of the navigation panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sidebar {
    open: bool,
    breakpoint: u32,
}

impl Sidebar {
    pub fn new(breakpoint: u32) -> Self {
        Self {
            open: false,
            breakpoint,
        }
    }

    /// Menu button pressed
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Clicks outside both the panel and the menu button close it.
    ///
    /// Returns whether the panel was closed.
    pub fn on_click(&mut self, target: ClickTarget) -> bool {
        let closes = self.open && target == ClickTarget::Elsewhere;
        if closes {
            self.close();
        }
        closes
    }

    /// Narrowing the viewport to the breakpoint closes an open panel.
    ///
    /// Returns whether the panel was closed.
    pub fn on_resize(&mut self, width: u32) -> bool {
        let closes = self.open && width <= self.breakpoint;
        if closes {
            self.close();
        }
        closes
    }

    pub fn breakpoint(&self) -> u32 {
        self.breakpoint
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Class of the sidebar element
    pub fn class(&self) -> &'static str {
        if self.open {
            "open"
        } else {
            ""
        }
    }

    /// Class of the main content, shifted while the panel is open
    pub fn main_class(&self) -> &'static str {
        if self.open {
            "main-content sidebar-open"
        } else {
            "main-content"
        }
    }
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::new(480)
    }
}
