// Layout core: word-wrap engine, row formatter, wire encoding.
// Pure functions over plain data — safe to call from any thread, no I/O.

pub mod encode;
pub mod engine;
pub mod table;

// Re-export the public API consumed by the page builders and the driver.
pub use encode::strip_control_codes;
pub use engine::{layout, layout_block, ROW_WIDTH};
pub use table::{table_row, TableAlign, TableColumn};
