pub mod feed;
pub mod pipeline;
pub mod store;

pub use feed::{sync_store, FeedError, JsonFileFeed, RecordFeed};
pub use pipeline::{rank, RankingPipeline};
pub use store::{RecordStore, ReplaceOutcome};
