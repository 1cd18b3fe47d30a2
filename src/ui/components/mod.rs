pub mod keyboard_diagram;
pub mod results_panel;
pub mod stats_header;
pub mod typing_area;
