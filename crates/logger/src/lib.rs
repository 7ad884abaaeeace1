// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use tracing::dispatcher::DefaultGuard;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Subscriber for the current test thread, writing through the test harness so output is
/// captured per test. Keep the guard alive for the duration of the test.
pub fn setup_test_tracing() -> DefaultGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .finish()
        .set_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::debug;

    #[test]
    fn test_guard_scopes_subscriber() {
        {
            let _guard = setup_test_tracing();
            debug!(test = "logger", "scoped subscriber active");
        }
        // a second guard can be taken once the first is dropped
        let _guard = setup_test_tracing();
    }
}
