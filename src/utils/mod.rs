pub mod fence;

pub use fence::MutationFence;
