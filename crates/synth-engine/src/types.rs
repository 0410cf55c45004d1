use kernel_api::KernelError;

/// Why a feature application was rejected. The feature is reverted and
/// the scheduler moves on; none of these abort part generation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApplyError {
    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("edit left {shards} disconnected shells")]
    TopologyInvalid { shards: usize },

    #[error("inconsistent face correspondence: {reason}")]
    InconsistentCorrespondence { reason: String },
}

impl From<feature_ops::OpError> for ApplyError {
    fn from(e: feature_ops::OpError) -> Self {
        match e {
            feature_ops::OpError::Kernel(k) => ApplyError::Kernel(k),
        }
    }
}
