//! SMTP mail transport implementation

use async_trait::async_trait;
use clap::Parser;
use lettre::{
    message::header::ContentType,
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::domain::{
    communication::{
        errors::{DeliveryError, TransportError},
        mailer::Mailer,
        message::OutgoingEmail,
    },
    sending::models::credential::SmtpCredential,
};

/// SMTP relay configuration.
///
/// The relay is fixed server-side; the authenticating identity comes from
/// the per-session operator credential.
#[derive(Clone, Debug, Parser)]
pub struct SmtpConfig {
    /// The SMTP host
    #[clap(long, env = "SMTP_HOST", default_value = "smtp.gmail.com")]
    pub host: String,

    /// The SMTP port
    #[clap(long, env = "SMTP_PORT", default_value = "587")]
    pub port: u16,

    /// Verify the TLS certificate
    #[clap(long, env = "SMTP_VERIFY_TLS", default_value = "true")]
    pub verify_tls: bool,

    /// Enable STARTTLS (TLS upgrade on connection)
    #[clap(long, env = "SMTP_STARTTLS", default_value = "true")]
    pub starttls: bool,
}

/// SMTP mailer
#[derive(Clone, Debug)]
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    /// Create a new SMTP mailer
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn transport(
        &self,
        credential: &SmtpCredential,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, TransportError> {
        let creds = Credentials::new(
            credential.email.to_string(),
            credential.app_password.clone(),
        );

        let relay = if self.config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)?
        };

        Ok(relay
            .credentials(creds)
            .port(self.config.port)
            .tls(Tls::Opportunistic(
                TlsParameters::builder(self.config.host.to_string())
                    .dangerous_accept_invalid_certs(!self.config.verify_tls)
                    .build()?,
            ))
            .build())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn verify(&self, credential: &SmtpCredential) -> Result<(), TransportError> {
        let transport = self.transport(credential)?;

        match transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(TransportError::Connection(
                "the SMTP relay refused the connection".to_string(),
            )),
            Err(err) => Err(err.into()),
        }
    }

    async fn send(
        &self,
        credential: &SmtpCredential,
        email: &OutgoingEmail,
    ) -> Result<(), DeliveryError> {
        let message = Message::builder()
            .from(credential.email.as_str().parse()?)
            .to(email.to.as_str().parse()?)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(email.body.clone())?;

        let transport = self
            .transport(credential)
            .map_err(|err| DeliveryError::UnknownError(anyhow::anyhow!(err)))?;

        transport.send(message).await?;

        Ok(())
    }
}
