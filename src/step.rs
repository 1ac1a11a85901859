use serde::Serialize;

/// One replayable algorithm decision.
///
/// Solvers record these for the caller to animate at its own pace; the
/// algorithm never reads them back. `decision` says what was considered,
/// `before` and `after` snapshot the solver's running state around it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Step<D, S> {
    pub accepted: bool,
    pub decision: D,
    pub description: String,
    pub before: S,
    pub after: S,
}

impl<D, S> Step<D, S> {
    pub fn accepted(decision: D, description: String, before: S, after: S) -> Self {
        Self {
            accepted: true,
            decision,
            description,
            before,
            after,
        }
    }

    pub fn rejected(decision: D, description: String, before: S, after: S) -> Self {
        Self {
            accepted: false,
            decision,
            description,
            before,
            after,
        }
    }
}
