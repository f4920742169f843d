pub mod clock;
pub mod notifier;
pub mod store;
pub mod sweeper;
