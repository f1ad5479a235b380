// Command Runner Port
// Abstraction over invoking the external device tools

use crate::domain::{Invocation, RawResponse};
use async_trait::async_trait;

/// Command Runner trait
///
/// Implementations:
/// - SubprocessRunner: spawns the real program (infra-system)
/// - ScriptedCommandRunner: canned responses for tests
///
/// Every failure (launch error, nonzero exit, timeout) collapses into
/// `RawResponse::Absent`; callers never learn why a command failed.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run one invocation to completion and return its trimmed combined output
    async fn run(&self, invocation: &Invocation) -> RawResponse;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Mock runner answering from a table keyed by rendered command line
    ///
    /// Unscripted invocations answer `Absent`, like a missing tool would.
    #[derive(Clone, Default)]
    pub struct ScriptedCommandRunner {
        responses: Arc<Mutex<HashMap<String, RawResponse>>>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl ScriptedCommandRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer `command_line` with captured output
        pub fn with_output(self, command_line: &str, output: &str) -> Self {
            self.set(command_line, RawResponse::captured(output));
            self
        }

        /// Answer `command_line` with a failure
        pub fn with_failure(self, command_line: &str) -> Self {
            self.set(command_line, RawResponse::Absent);
            self
        }

        pub fn set(&self, command_line: &str, response: RawResponse) {
            self.responses
                .lock()
                .unwrap()
                .insert(command_line.to_string(), response);
        }

        /// Command lines seen so far, in call order
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        pub fn was_called(&self, command_line: &str) -> bool {
            self.calls.lock().unwrap().iter().any(|c| c == command_line)
        }
    }

    #[async_trait]
    impl CommandRunner for ScriptedCommandRunner {
        async fn run(&self, invocation: &Invocation) -> RawResponse {
            let command_line = invocation.to_string();
            self.calls.lock().unwrap().push(command_line.clone());

            self.responses
                .lock()
                .unwrap()
                .get(&command_line)
                .cloned()
                .unwrap_or(RawResponse::Absent)
        }
    }
}
