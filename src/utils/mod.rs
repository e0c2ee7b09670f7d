pub mod colors;
pub mod date;
pub mod formatting;
pub mod table;
pub mod time;

pub use formatting::format_amount;
pub use formatting::mins2readable;
