use libc::{sighandler_t, signal, SIGINT, SIG_ERR, SIG_IGN};

use crate::process::ProcessError;

/// Previous SIGINT disposition, returned so it can be restored once the
/// child has exited.
pub struct SigintGuard {
    previous: sighandler_t,
}

/// Ignores SIGINT in the shell while a foreground child runs; the child
/// keeps the default disposition and receives the interrupt itself.
pub fn ignore_sigint() -> Result<SigintGuard, ProcessError> {
    let previous = unsafe { signal(SIGINT, SIG_IGN) };
    if previous == SIG_ERR {
        return Err(ProcessError::SignalError(
            "failed to ignore SIGINT".to_string(),
        ));
    }
    Ok(SigintGuard { previous })
}

pub fn restore_sigint(guard: SigintGuard) {
    unsafe {
        signal(SIGINT, guard.previous);
    }
}
