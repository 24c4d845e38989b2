// Application layer - Catalog service and use case interactors

pub mod catalog;
pub mod container;
pub mod remove_interactor;
pub mod save_interactor;

// Re-export interactors
pub use catalog::ClipCatalog;
pub use container::{AppContainer, DefaultAppContainer};
pub use remove_interactor::{RemoveClipInteractor, RemoveOutcome};
pub use save_interactor::{SaveClipInteractor, SaveClipRequest, SavedClip, TrimmedClip};
