use crate::plugin::PluginCall;

/// Identifies one sign-in attempt. Ids increase monotonically per bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId(u64);

impl std::fmt::Display for AttemptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The single in-flight sign-in slot.
#[derive(Debug, Default)]
pub(crate) struct PendingSignIn {
    last_attempt: u64,
    tracked: Option<(AttemptId, PluginCall)>,
}

impl PendingSignIn {
    /// Starts tracking `call` under a fresh attempt id, handing back the call
    /// it supersedes, if any.
    pub(crate) fn track(&mut self, call: PluginCall) -> (AttemptId, Option<PluginCall>) {
        self.last_attempt += 1;
        let attempt = AttemptId(self.last_attempt);
        let superseded = self
            .tracked
            .replace((attempt, call))
            .map(|(_, previous)| previous);
        (attempt, superseded)
    }

    /// Releases the tracked call if `attempt` is still the current one.
    pub(crate) fn take(&mut self, attempt: AttemptId) -> Option<PluginCall> {
        match &self.tracked {
            Some((current, _)) if *current == attempt => self.tracked.take().map(|(_, call)| call),
            _ => None,
        }
    }

    pub(crate) fn current(&self) -> Option<AttemptId> {
        self.tracked.as_ref().map(|(attempt, _)| *attempt)
    }
}
