//! Logging and error-reporting bootstrap
//!
//! Every error-level tracing event is also forwarded to Sentry, so failures
//! that are only logged (a cache outage the lookaside swallows) reach the
//! error sink the same way as the ones that become a 500. Warnings and
//! info events ride along as breadcrumbs. Without a configured DSN the
//! forwarding is a no-op.

use tracing_subscriber::{prelude::*, EnvFilter};

use crate::error::Result;

/// Install the global subscriber. `json` selects the Cloud Logging format.
pub fn init_logging(json: bool) -> Result<()> {
    let env_filter = EnvFilter::from_default_env().add_directive("lab_gateway=info".parse()?);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(tracing_stackdriver::layer))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .with(sentry::integrations::tracing::layer())
        .init();

    Ok(())
}

/// Run `fut` to completion with only the Sentry layer installed and return
/// its output together with every event that reached the error sink.
#[cfg(test)]
pub(crate) fn capture_reported<F: std::future::Future>(
    fut: F,
) -> (F::Output, Vec<sentry::protocol::Event<'static>>) {
    let mut output = None;
    let events = sentry::test::with_captured_events(|| {
        let subscriber =
            tracing_subscriber::registry().with(sentry::integrations::tracing::layer());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        output = Some(tracing::subscriber::with_default(subscriber, || {
            runtime.block_on(fut)
        }));
    });
    (output.unwrap(), events)
}
