pub(crate) mod cues;
pub(crate) mod dispatch;
pub(crate) mod orchestrator;
