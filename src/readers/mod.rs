pub mod day_reader;

pub use day_reader::DayReader;
