//! Creative triage engine — partitions each ad group's creatives into
//! winners, losers, and unclear, and tags them on the account.

pub mod classifier;
pub mod labeler;
pub mod runner;

pub use classifier::Classifier;
pub use labeler::Labeler;
pub use runner::run;
