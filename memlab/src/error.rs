use sim::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("simulation error: {0}")]
    Sim(#[from] SimError),

    #[error("{bench}: cycle {cycle}: expected {expected}, observed {observed}")]
    Mismatch {
        bench: &'static str,
        cycle: usize,
        expected: String,
        observed: String,
    },

    #[error("unknown scenario '{0}' (expected one of: fifo, ram, rom, all)")]
    UnknownScenario(String),
}
