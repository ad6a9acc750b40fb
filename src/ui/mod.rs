pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dim, empty, error, header, info, resource_card, resource_line, section, success};
pub use table::{stats_table, TableBuilder};
pub use theme::{theme, Theme};
