pub mod additive;
pub mod execute;
pub mod gears;
pub mod holes;
pub mod kernel_ext;
pub mod pockets;
pub mod profiles;
pub mod sampler;
pub mod slots;
pub mod steps;
pub mod transitions;
pub mod types;

pub use execute::execute_stage;
pub use kernel_ext::KernelBundle;
pub use sampler::{sample_feature, sample_transition};
pub use types::*;
