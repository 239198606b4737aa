mod entries;
mod records;

pub use records::ZoneRecords;
