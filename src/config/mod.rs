//! Configuration module

mod site;

pub use site::BlogConfig;
pub use site::HighlightConfig;
pub use site::NavLink;
pub use site::NewPostConfig;
pub use site::SidebarConfig;
