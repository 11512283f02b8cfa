// Document generation: project plan → feasibility study → RFP.
// Each stage tries the remote generator once and falls back to a deterministic
// local generator; the dispatcher is the only place that sees remote errors.

pub mod dispatcher;
pub mod feasibility;
pub mod handlers;
pub mod plan;
pub mod prompts;
pub mod rfp;
pub mod scoring;
