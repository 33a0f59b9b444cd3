//! The result-binding pipeline: partitions a point-in-time snapshot of the
//! workspace around the currently viewed page, chunks it into bounded
//! batches, and schedules delivery to the consumer in strict order.

pub mod chunk;
pub mod consumer;
pub mod merge;
pub mod partition;
pub mod pipeline;
pub mod stores;

pub use chunk::dispatch_chunked;
pub use consumer::{ConsumerHandle, WorkspaceConsumer};
pub use merge::NewWorkspaceItems;
pub use partition::{partition_by_screen, sort_spatially};
pub use pipeline::BindPipeline;
pub use stores::{ItemStore, SpaceFinder, StoreError, WidgetCatalogProvider};

#[cfg(test)]
pub mod testing;
