//! Compile-and-run primitive for user-authored command sources.
//!
//! This is deliberately a thin "run this text" facility: no sandboxing, no
//! timeout, no resource limits. The one hard guarantee is the failure
//! boundary: nothing a script does at parse or run time ever propagates to
//! the caller. Errors surface as a single host notification instead.
//!
//! Keeping the capability behind [`ScriptRunner`] means a safer evaluator
//! can later replace the engine without touching the registry or the entry
//! list.

use std::sync::Arc;

use rhai::{Dynamic, Engine};
use tracing::{debug, warn};

use crate::host::Host;

/// An invocable wrapper around a source string.
///
/// Units are transient: they are created per invocation and never cached,
/// so an invocation always reflects the latest persisted source. Syntax
/// errors are deferred to [`ScriptRunner::invoke`].
pub struct ScriptUnit {
    source: String,
}

impl ScriptUnit {
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Evaluates user-authored sources against the host.
///
/// Scripts see two host functions: `notify(message)` raises a toast and
/// `log(message)` writes a tracing event.
pub struct ScriptRunner {
    engine: Engine,
    host: Arc<dyn Host>,
}

impl ScriptRunner {
    pub fn new(host: Arc<dyn Host>) -> Self {
        let mut engine = Engine::new();

        let notify_host = Arc::clone(&host);
        engine.register_fn("notify", move |message: &str| notify_host.notify(message));
        engine.register_fn("log", |message: &str| {
            tracing::info!(target: "scrawl::script", "{message}");
        });

        Self { engine, host }
    }

    /// Wrap a source string into an invocable unit. Never fails; parse
    /// errors only surface at invocation time.
    pub fn compile(&self, source: &str) -> ScriptUnit {
        ScriptUnit {
            source: source.to_string(),
        }
    }

    /// Execute a unit with no arguments and no observed return value.
    ///
    /// Any parse or runtime error is caught here and reported through the
    /// host notification API; it never reaches the caller.
    pub fn invoke(&self, unit: &ScriptUnit) {
        debug!("invoking script unit ({} bytes)", unit.source.len());
        if let Err(err) = self.engine.eval::<Dynamic>(&unit.source) {
            warn!("user script failed: {err}");
            self.host.notify(&format!("Error in your code: {err}"));
        }
    }

    /// Convenience: compile the given source and invoke it immediately.
    pub fn run_source(&self, source: &str) {
        let unit = self.compile(source);
        self.invoke(&unit);
    }
}
