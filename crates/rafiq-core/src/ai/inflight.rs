//! Per-operation duplicate-submission guard.
//!
//! Each logical operation (plan generation, hadith search, ...) registers
//! under a stable key while its request is outstanding; a second submission
//! of the same key is rejected with `AiError::Busy` instead of racing the
//! first. Independent operations are never ordered against each other.

use std::collections::HashSet;

use crate::error::AiError;

#[derive(Default)]
pub struct InFlight {
    active: HashSet<&'static str>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an operation key. Fails if the same key is already claimed.
    pub fn begin(&mut self, op: &'static str) -> Result<(), AiError> {
        if !self.active.insert(op) {
            return Err(AiError::Busy(op));
        }
        Ok(())
    }

    /// Release an operation key once its result (or error) has landed.
    pub fn finish(&mut self, op: &'static str) {
        self.active.remove(op);
    }

    pub fn is_busy(&self, op: &'static str) -> bool {
        self.active.contains(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_submission_of_same_operation_is_rejected() {
        let mut inflight = InFlight::new();
        inflight.begin("plan").unwrap();
        assert!(matches!(inflight.begin("plan"), Err(AiError::Busy("plan"))));
    }

    #[test]
    fn independent_operations_do_not_block_each_other() {
        let mut inflight = InFlight::new();
        inflight.begin("plan").unwrap();
        inflight.begin("hadith").unwrap();
        assert!(inflight.is_busy("plan"));
        assert!(inflight.is_busy("hadith"));
    }

    #[test]
    fn finish_releases_the_key_for_reuse() {
        let mut inflight = InFlight::new();
        inflight.begin("mcq").unwrap();
        inflight.finish("mcq");
        assert!(!inflight.is_busy("mcq"));
        inflight.begin("mcq").unwrap();
    }
}
