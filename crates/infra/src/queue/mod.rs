//! Queue store helpers shared by the durable and in-memory stores

mod ids;
mod in_memory;

pub use ids::generate_queue_id;
pub use in_memory::InMemoryApplicationQueue;
