pub mod payload;

pub use payload::{parse_id, ValidatedJson};
