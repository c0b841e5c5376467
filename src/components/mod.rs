pub mod force_graph;
pub mod modals;
pub mod search_box;
pub mod weekly_sidebar;
