// Library root: section rendering, the training subsection and page assembly,
// shared by the `hedgertronic` binary and the integration tests.

pub mod page;
pub mod sections;
pub mod training;
