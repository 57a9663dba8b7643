pub mod event_reader;
pub mod summary_writer;
