//! Hook registry for end-of-combat hooks.

use std::sync::Arc;

use tracing::{debug, error};

use super::{EncounterHook, HookContext, HookCriticality, HookError};

/// Ordered set of end-of-combat hooks.
#[derive(Clone)]
pub struct HookRegistry {
    hooks: Arc<[Arc<dyn EncounterHook>]>,
}

impl HookRegistry {
    /// Creates a registry; hooks are sorted by priority (lower values first).
    pub fn new(mut hooks: Vec<Arc<dyn EncounterHook>>) -> Self {
        hooks.sort_by_key(|hook| hook.priority());
        Self {
            hooks: hooks.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Creates a registry with the default set of hooks.
    ///
    /// Default hooks include:
    /// - OutcomeLogHook: logs the outcome and survivors
    pub fn default_hooks() -> Self {
        Self::new(vec![Arc::new(super::OutcomeLogHook) as Arc<dyn EncounterHook>])
    }

    /// Returns a registry with `hook` added.
    pub fn with(self, hook: Arc<dyn EncounterHook>) -> Self {
        let mut hooks = self.hooks.to_vec();
        hooks.push(hook);
        Self::new(hooks)
    }

    /// Runs every hook in priority order. Failures are logged, never
    /// propagated.
    pub fn run(&self, ctx: &HookContext<'_>) {
        for hook in self.hooks.iter() {
            if let Err(e) = hook.on_combat_end(ctx) {
                Self::handle_hook_error(hook.as_ref(), &e);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Returns an iterator over hook names and priorities (for debugging).
    pub fn hooks(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.hooks.iter().map(|h| (h.name(), h.priority()))
    }

    fn handle_hook_error(hook: &dyn EncounterHook, error: &HookError) {
        match hook.criticality() {
            HookCriticality::Important => error!(
                target: "runtime::hooks",
                hook = hook.name(),
                error = %error,
                "Hook failed"
            ),
            HookCriticality::Optional => debug!(
                target: "runtime::hooks",
                hook = hook.name(),
                error = %error,
                "Optional hook failed"
            ),
        }
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::default_hooks()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use combat_core::{Outcome, Roster};

    use super::*;

    struct Recorder {
        name: &'static str,
        priority: i32,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl EncounterHook for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn on_combat_end(&self, _ctx: &HookContext<'_>) -> Result<(), HookError> {
            self.log.lock().expect("log lock").push(self.name);
            Err(HookError::new("boom"))
        }
    }

    #[test]
    fn hooks_run_in_priority_order_despite_failures() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = HookRegistry::new(vec![
            Arc::new(Recorder {
                name: "late",
                priority: 10,
                log: Arc::clone(&log),
            }),
            Arc::new(Recorder {
                name: "early",
                priority: -10,
                log: Arc::clone(&log),
            }),
        ]);

        let roster = Roster::default();
        registry.run(&HookContext::new(Outcome::Victory, 1, &roster));

        assert_eq!(*log.lock().expect("log lock"), vec!["early", "late"]);
    }
}
