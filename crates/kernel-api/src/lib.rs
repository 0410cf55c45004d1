pub mod mesh;
pub mod mock;
pub mod traits;
pub mod types;

pub use mesh::SurfaceMesh;
pub use mock::{MockAnomaly, MockKernel};
pub use traits::*;
pub use types::*;
