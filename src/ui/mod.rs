pub mod chart;
pub mod format;
pub mod layout;
pub mod statusbar;

pub use chart::ChartPanes;
pub use layout::LayoutManager;
pub use statusbar::StatusBar;
