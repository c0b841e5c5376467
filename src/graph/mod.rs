//! Graph state: seed catalog, incremental store, camera targeting and highlight.

pub mod catalog;
pub mod highlight;
pub mod store;
pub mod types;
pub mod viewport;

pub use catalog::{EntityCatalog, FallbackInfo, fallback_info};
pub use highlight::{Emphasis, HighlightState};
pub use store::{AddResult, IncrementalGraphStore, InferenceRule, default_rules};
pub use types::{
	EdgeKey, EntityCategory, EntityRecord, GraphSnapshot, RelationCategory, RelationshipRecord,
	normalize_id,
};
pub use viewport::{
	CameraDirective, LayoutPosition, PositionSource, ViewportController, ZoomState,
};
