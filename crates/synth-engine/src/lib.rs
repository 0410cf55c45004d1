pub mod apply;
pub mod combination;
pub mod provenance;
pub mod scheduler;
pub mod state;
pub mod types;
pub mod validate;

pub use apply::apply_feature;
pub use combination::{canonical_order, random_combination};
pub use scheduler::{generate_part, GeneratedPart};
pub use state::{BottomMap, InstanceGroup, LabelMap, PartState};
pub use types::ApplyError;
