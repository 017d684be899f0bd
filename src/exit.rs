// src/exit.rs
//! Process exit codes for `uxscan`.
//!
//! Provides a stable contract for CI scripts.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum UxscanExit {
    /// Analysis completed with no blocking findings.
    Success = 0,
    /// Generic error (IO, config).
    Error = 1,
    /// Input could not be analyzed (parse error, invalid color argument).
    InvalidInput = 2,
    /// At least one critical or high finding.
    CheckFailed = 6,
}

impl UxscanExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for UxscanExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}


#[cfg(test)]
mod tests {
    use super::UxscanExit;

    #[test]
    fn codes_are_stable() {
        let codes: Vec<i32> = [
            UxscanExit::Success,
            UxscanExit::Error,
            UxscanExit::InvalidInput,
            UxscanExit::CheckFailed,
        ]
        .into_iter()
        .map(UxscanExit::code)
        .collect();
        assert_eq!(codes, vec![0, 1, 2, 6]);
    }
}
