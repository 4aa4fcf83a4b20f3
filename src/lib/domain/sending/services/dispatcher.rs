//! Background dispatch of a send job
//!
//! Exactly one task runs per job. It is a plain sequential loop: no fan-out
//! across recipients, so delivery stays ordered and rate-limited and there
//! is always a single well-defined current recipient. The task suspends
//! only on the inter-send delay and while awaiting the transport.

use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{
    communication::{mailer::Mailer, message::OutgoingEmail},
    sending::services::session::{SendPlan, SessionStore},
};

/// Spawn the background task that drains `plan` for `owner`
pub fn spawn_send_job<M: Mailer>(
    store: Arc<SessionStore>,
    mailer: Arc<M>,
    owner: Uuid,
    plan: SendPlan,
    send_delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(run_send_job(store, mailer, owner, plan, send_delay))
}

/// Dispatch every recipient in the plan, in order, publishing progress to
/// the session store after each one.
///
/// A per-recipient delivery failure is recorded and the loop continues;
/// only failure to establish the transport itself aborts the job.
pub async fn run_send_job<M: Mailer>(
    store: Arc<SessionStore>,
    mailer: Arc<M>,
    owner: Uuid,
    plan: SendPlan,
    send_delay: Duration,
) {
    info!(%owner, total = plan.recipients.len(), "send job started");

    if let Err(err) = mailer.verify(&plan.credential).await {
        warn!(%owner, error = %err, "transport could not be established");
        store
            .update_job(owner, |job| job.abort(&err.to_string()))
            .await;
        return;
    }

    let last = plan.recipients.len().saturating_sub(1);

    for (index, recipient) in plan.recipients.iter().enumerate() {
        store
            .update_job(owner, |job| job.set_current(recipient.email.as_str()))
            .await;

        let rendered = plan.template.render(recipient);
        let email = OutgoingEmail {
            to: recipient.email.clone(),
            subject: rendered.subject,
            body: rendered.body,
        };

        match mailer.send(&plan.credential, &email).await {
            Ok(()) => {
                debug!(%owner, to = %email.to, "delivery accepted");
                store.update_job(owner, |job| job.record_sent()).await;
            }
            Err(err) => {
                warn!(%owner, to = %email.to, error = %err, "delivery failed");
                store
                    .update_job(owner, |job| {
                        job.record_failure(email.to.as_str(), &err.to_string())
                    })
                    .await;
            }
        }

        if index < last {
            tokio::time::sleep(send_delay).await;
        }
    }

    store.update_job(owner, |job| job.complete()).await;
    info!(%owner, "send job completed");
}
