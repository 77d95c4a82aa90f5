pub mod model;
pub mod state;

pub use model::{PropagationPath, RiskModel, DEFAULT_PROPAGATION_THRESHOLD};
pub use state::SystemState;
