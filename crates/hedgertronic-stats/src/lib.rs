// Career pitching statistics: the table model, classification into seasons
// and careers, per-category summaries, the stats panel renderer with its
// category filter, and the ingest pipeline that produces the table.

pub mod category;
pub mod classify;
pub mod filter;
pub mod ingest;
pub mod lookups;
pub mod render;
pub mod row;
pub mod summary;
