//! Precedence rules between deployment toggles and per-call attributes
//!
//! Optional features are resolved in a fixed order: the deployment toggle
//! gates the feature, a per-call attribute requests or overrides it, and a
//! documented default applies when neither says anything.

/// How a per-call request for a gated feature was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Requested and enabled for the deployment
    Applied,
    /// Not requested by the call
    NotRequested,
    /// Requested, but the deployment has the feature switched off
    Suppressed,
}

/// Resolve a feature the call can only ask for, never force
pub fn gate(deployment_enabled: bool, requested: bool) -> Gate {
    match (deployment_enabled, requested) {
        (_, false) => Gate::NotRequested,
        (true, true) => Gate::Applied,
        (false, true) => Gate::Suppressed,
    }
}

/// Resolve a setting where an explicit per-call value replaces the deployment default
pub fn override_or(deployment_default: bool, per_call: Option<bool>) -> bool {
    per_call.unwrap_or(deployment_default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_table() {
        let table = [
            (true, true, Gate::Applied),
            (true, false, Gate::NotRequested),
            (false, true, Gate::Suppressed),
            (false, false, Gate::NotRequested),
        ];
        for (deployment, requested, expected) in table {
            assert_eq!(
                gate(deployment, requested),
                expected,
                "deployment={deployment} requested={requested}"
            );
        }
    }

    #[test]
    fn test_override_table() {
        assert!(override_or(true, None));
        assert!(!override_or(false, None));
        assert!(!override_or(true, Some(false)));
        assert!(override_or(false, Some(true)));
    }
}
