//! Exit status classification.

use crate::{CompilationFailure, WorkResult};

/// Maps a compiler exit status to the outcome of the compile step.
///
/// `0` means the compiler did its work. Every other value, negative included,
/// is a [`CompilationFailure`] carrying that exact value.
pub fn classify(exit_status: i32) -> Result<WorkResult, CompilationFailure> {
    match exit_status {
        0 => Ok(WorkResult::new(true)),
        status => Err(CompilationFailure::new(status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_did_work() {
        let result = classify(0).unwrap();
        assert!(result.did_work());
    }

    #[test]
    fn non_zero_carries_the_exact_status() {
        for status in [1, 2, 127, 255, 256, -1, -9, i32::MAX, i32::MIN] {
            assert_eq!(classify(status), Err(CompilationFailure::new(status)));
        }
    }
}
