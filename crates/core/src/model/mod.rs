mod item;
mod quiz;
mod value;

pub use item::{Expectation, QuizItem, QuizItemError};
pub use quiz::{Quiz, QuizError};
pub use value::{CellValue, ResultSet, Row, format_row};
