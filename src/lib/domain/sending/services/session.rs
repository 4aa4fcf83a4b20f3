//! Session store — the single source of truth for per-owner send state
//!
//! The store decouples the connection that starts a job from any number of
//! connections that later observe it. One background task writes a session's
//! job while SSE loops and status requests read cloned snapshots; the lock
//! is never held across an await, so readers cannot observe a torn update.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::sending::{
    errors::{SessionNotFound, StartSendError},
    models::{
        credential::SmtpCredential, job::SendJob, recipient::RecipientList,
        template::MessageTemplate,
    },
};

/// All state scoped to one operator session
#[derive(Clone, Debug, Default)]
pub struct Session {
    /// The verified outbound credential, once captured
    pub credential: Option<SmtpCredential>,

    /// The current recipient list
    pub recipients: RecipientList,

    /// The current message template
    pub template: MessageTemplate,

    /// The session's send job (idle until the first start)
    pub job: SendJob,
}

/// The inputs handed to the dispatcher when a job starts.
///
/// These are clones taken under the store's write lock, so later edits to
/// the session's list, template or credential cannot alter an in-flight job.
#[derive(Clone, Debug)]
pub struct SendPlan {
    /// The verified sender credential
    pub credential: SmtpCredential,

    /// The recipient snapshot, in dispatch order
    pub recipients: RecipientList,

    /// The template snapshot
    pub template: MessageTemplate,
}

/// Concurrency-safe holder of at most one active send job per session
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fresh empty session and return its id
    pub async fn create(&self) -> Uuid {
        let id = Uuid::now_v7();
        self.sessions.write().await.insert(id, Session::default());
        id
    }

    /// A cloned snapshot of the whole session
    pub async fn get(&self, owner: Uuid) -> Result<Session, SessionNotFound> {
        self.sessions
            .read()
            .await
            .get(&owner)
            .cloned()
            .ok_or(SessionNotFound(owner))
    }

    /// A cloned snapshot of the session's job
    pub async fn job_snapshot(&self, owner: Uuid) -> Result<SendJob, SessionNotFound> {
        self.sessions
            .read()
            .await
            .get(&owner)
            .map(|session| session.job.clone())
            .ok_or(SessionNotFound(owner))
    }

    /// Attach a credential to the session
    pub async fn set_credential(
        &self,
        owner: Uuid,
        credential: SmtpCredential,
    ) -> Result<(), SessionNotFound> {
        self.with_session(owner, |session| session.credential = Some(credential))
            .await
    }

    /// Replace the session's recipient list
    pub async fn set_recipients(
        &self,
        owner: Uuid,
        recipients: RecipientList,
    ) -> Result<(), SessionNotFound> {
        self.with_session(owner, |session| session.recipients = recipients)
            .await
    }

    /// Replace the session's message template
    pub async fn set_template(
        &self,
        owner: Uuid,
        template: MessageTemplate,
    ) -> Result<(), SessionNotFound> {
        self.with_session(owner, |session| session.template = template)
            .await
    }

    /// Atomically check prerequisites and install a fresh `sending` job.
    ///
    /// Fails with [`StartSendError::AlreadySending`] while a job is being
    /// dispatched for this owner, leaving the running job untouched. On
    /// success the returned [`SendPlan`] carries the fixed snapshots the
    /// background task will work from.
    pub async fn start_job(&self, owner: Uuid) -> Result<SendPlan, StartSendError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&owner).ok_or(SessionNotFound(owner))?;

        if session.job.is_sending() {
            return Err(StartSendError::AlreadySending);
        }

        let credential = match &session.credential {
            Some(credential) if credential.is_verified() => credential.clone(),
            _ => return Err(StartSendError::MissingCredential),
        };

        if session.recipients.is_empty() {
            return Err(StartSendError::NoRecipients);
        }

        if !session.template.is_complete() {
            return Err(StartSendError::MissingTemplate);
        }

        session.job = SendJob::started(session.recipients.len());

        Ok(SendPlan {
            credential,
            recipients: session.recipients.clone(),
            template: session.template.clone(),
        })
    }

    /// Atomically apply a state transition to the session's job.
    ///
    /// A missing owner makes this a no-op: a session cleared mid-run simply
    /// stops recording the remainder of its dispatch.
    pub async fn update_job<F>(&self, owner: Uuid, mutate: F)
    where
        F: FnOnce(&mut SendJob),
    {
        if let Some(session) = self.sessions.write().await.get_mut(&owner) {
            mutate(&mut session.job);
        }
    }

    /// Discard the session and everything scoped to it
    pub async fn clear(&self, owner: Uuid) -> Result<(), SessionNotFound> {
        self.sessions
            .write()
            .await
            .remove(&owner)
            .map(|_| ())
            .ok_or(SessionNotFound(owner))
    }

    async fn with_session<F>(&self, owner: Uuid, mutate: F) -> Result<(), SessionNotFound>
    where
        F: FnOnce(&mut Session),
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&owner).ok_or(SessionNotFound(owner))?;
        mutate(session);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::domain::sending::{
        models::{job::JobStatus, recipient::Recipient},
        value_objects::email_address::EmailAddress,
    };

    use super::*;

    fn credential() -> Result<SmtpCredential, Box<dyn std::error::Error>> {
        Ok(
            SmtpCredential::new(EmailAddress::new("operator@example.com")?, "app-password")
                .into_verified(),
        )
    }

    fn recipients() -> Result<RecipientList, Box<dyn std::error::Error>> {
        Ok(RecipientList::new(vec![
            Recipient::new("Ann", "a@x.com")?,
            Recipient::new("Bo", "b@x.com")?,
        ]))
    }

    async fn ready_session(store: &SessionStore) -> Result<Uuid, Box<dyn std::error::Error>> {
        let owner = store.create().await;
        store.set_credential(owner, credential()?).await?;
        store.set_recipients(owner, recipients()?).await?;
        store
            .set_template(owner, MessageTemplate::new("Hi {{name}}", "Hello {{name}}!"))
            .await?;
        Ok(owner)
    }

    #[tokio::test]
    async fn test_created_session_starts_empty_and_idle() -> TestResult {
        let store = SessionStore::new();

        let owner = store.create().await;
        let session = store.get(owner).await?;

        assert!(session.credential.is_none());
        assert!(session.recipients.is_empty());
        assert_eq!(session.job.status, JobStatus::Idle);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_unknown_session_fails() {
        let store = SessionStore::new();
        let owner = Uuid::now_v7();

        let result = store.get(owner).await;

        assert_eq!(result.unwrap_err(), SessionNotFound(owner));
    }

    #[tokio::test]
    async fn test_start_job_installs_sending_job_with_fixed_snapshots() -> TestResult {
        let store = SessionStore::new();
        let owner = ready_session(&store).await?;

        let plan = store.start_job(owner).await?;

        assert_eq!(plan.recipients.len(), 2);
        assert_eq!(plan.template.subject, "Hi {{name}}");

        let job = store.job_snapshot(owner).await?;
        assert_eq!(job.status, JobStatus::Sending);
        assert_eq!(job.total, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_second_start_fails_and_leaves_running_job_unchanged() -> TestResult {
        let store = SessionStore::new();
        let owner = ready_session(&store).await?;

        store.start_job(owner).await?;
        store.update_job(owner, |job| job.record_sent()).await;
        let before = store.job_snapshot(owner).await?;

        let result = store.start_job(owner).await;

        assert_eq!(result.unwrap_err(), StartSendError::AlreadySending);
        assert_eq!(store.job_snapshot(owner).await?, before);

        Ok(())
    }

    #[tokio::test]
    async fn test_start_job_requires_a_verified_credential() -> TestResult {
        let store = SessionStore::new();
        let owner = store.create().await;
        store.set_recipients(owner, recipients()?).await?;
        store
            .set_template(owner, MessageTemplate::new("s", "b"))
            .await?;

        let result = store.start_job(owner).await;
        assert_eq!(result.unwrap_err(), StartSendError::MissingCredential);

        // an unverified credential is not enough
        let unverified =
            SmtpCredential::new(EmailAddress::new("operator@example.com")?, "app-password");
        store.set_credential(owner, unverified).await?;

        let result = store.start_job(owner).await;
        assert_eq!(result.unwrap_err(), StartSendError::MissingCredential);

        Ok(())
    }

    #[tokio::test]
    async fn test_start_job_requires_recipients_and_template() -> TestResult {
        let store = SessionStore::new();
        let owner = store.create().await;
        store.set_credential(owner, credential()?).await?;
        store
            .set_template(owner, MessageTemplate::new("s", "b"))
            .await?;

        let result = store.start_job(owner).await;
        assert_eq!(result.unwrap_err(), StartSendError::NoRecipients);

        store.set_recipients(owner, recipients()?).await?;
        store
            .set_template(owner, MessageTemplate::new("s", ""))
            .await?;

        let result = store.start_job(owner).await;
        assert_eq!(result.unwrap_err(), StartSendError::MissingTemplate);

        Ok(())
    }

    #[tokio::test]
    async fn test_a_finished_job_can_be_replaced() -> TestResult {
        let store = SessionStore::new();
        let owner = ready_session(&store).await?;

        store.start_job(owner).await?;
        store.update_job(owner, |job| job.complete()).await;

        let plan = store.start_job(owner).await?;

        assert_eq!(plan.recipients.len(), 2);
        assert_eq!(store.job_snapshot(owner).await?.sent, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_editing_the_session_does_not_touch_the_plan_snapshots() -> TestResult {
        let store = SessionStore::new();
        let owner = ready_session(&store).await?;

        let plan = store.start_job(owner).await?;

        store
            .set_template(owner, MessageTemplate::new("changed", "changed"))
            .await?;
        store
            .set_recipients(owner, RecipientList::default())
            .await?;

        assert_eq!(plan.template.subject, "Hi {{name}}");
        assert_eq!(plan.recipients.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_job_after_clear_is_a_no_op() -> TestResult {
        let store = SessionStore::new();
        let owner = ready_session(&store).await?;

        store.start_job(owner).await?;
        store.clear(owner).await?;

        // the dispatch task may still be running; its writes must not fail
        store.update_job(owner, |job| job.record_sent()).await;

        assert!(store.get(owner).await.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_unknown_session_fails() {
        let store = SessionStore::new();
        let owner = Uuid::now_v7();

        assert_eq!(store.clear(owner).await.unwrap_err(), SessionNotFound(owner));
    }

    #[tokio::test]
    async fn test_snapshots_are_isolated_from_the_store() -> TestResult {
        let store = SessionStore::new();
        let owner = ready_session(&store).await?;
        store.start_job(owner).await?;

        let mut snapshot = store.job_snapshot(owner).await?;
        snapshot.record_sent();

        assert_eq!(store.job_snapshot(owner).await?.sent, 0);

        Ok(())
    }
}
