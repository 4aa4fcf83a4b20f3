//! Recipients and the recipient list

use thiserror::Error;

use crate::domain::sending::value_objects::email_address::{EmailAddress, EmailAddressError};

/// An error that can occur when building a recipient
#[derive(Debug, Error)]
pub enum RecipientError {
    /// The recipient's name is empty
    #[error("recipient name is empty")]
    EmptyName,

    /// The recipient's email address is invalid
    #[error(transparent)]
    Email(#[from] EmailAddressError),
}

/// A single mail-merge recipient
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipient {
    /// Display name, substituted for `{{name}}` at render time
    pub name: String,

    /// Delivery address
    pub email: EmailAddress,
}

impl Recipient {
    /// Create a recipient from raw name and address strings
    pub fn new(name: &str, email: &str) -> Result<Self, RecipientError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(RecipientError::EmptyName);
        }

        Ok(Self {
            name: name.to_string(),
            email: EmailAddress::new(email)?,
        })
    }

    /// The placeholder identity previews fall back to when the list is empty
    pub fn sample() -> Self {
        Self {
            name: "Sample Name".to_string(),
            email: EmailAddress::new("sample@example.com").expect("static sample address"),
        }
    }
}

/// An ordered, validated recipient list
///
/// Order is significant: it is the dispatch order of a send job, and the
/// first entry is the sample identity used by template previews.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipientList(Vec<Recipient>);

/// Outcome of a CSV import
#[derive(Debug)]
pub struct CsvImport {
    /// The recipients parsed from valid rows, in file order
    pub list: RecipientList,

    /// Rows rejected by validation (header-like rows are not counted)
    pub skipped: usize,
}

impl RecipientList {
    /// Wrap an already-validated collection
    pub fn new(recipients: Vec<Recipient>) -> Self {
        Self(recipients)
    }

    /// Parse a two-column `name,email` CSV document.
    ///
    /// Rows failing validation are skipped and counted, except rows whose
    /// values are the literal column labels (`name` / `email`) which are
    /// ignored outright, so a pasted header line produces neither a
    /// recipient nor a skip.
    pub fn from_csv(input: &str) -> CsvImport {
        let mut recipients = Vec::new();
        let mut skipped = 0;

        for line in input.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let (name, email) = match line.split_once(',') {
                Some((name, rest)) => {
                    // extra columns beyond the second are dropped
                    let email = rest.split(',').next().unwrap_or_default();
                    (name.trim(), email.trim())
                }
                None => (line.trim(), ""),
            };

            match Recipient::new(name, email) {
                Ok(recipient) => recipients.push(recipient),
                Err(_) => {
                    if name != "name" && email != "email" {
                        skipped += 1;
                    }
                }
            }
        }

        CsvImport {
            list: Self(recipients),
            skipped,
        }
    }

    /// Number of recipients
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list holds no recipients
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first recipient, if any
    pub fn first(&self) -> Option<&Recipient> {
        self.0.first()
    }

    /// Iterate in dispatch order
    pub fn iter(&self) -> std::slice::Iter<'_, Recipient> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_recipient_trims_name_and_email() -> TestResult {
        let recipient = Recipient::new("  Ann ", " a@x.com ")?;

        assert_eq!(recipient.name, "Ann");
        assert_eq!(recipient.email.as_str(), "a@x.com");

        Ok(())
    }

    #[test]
    fn test_recipient_with_empty_name_is_invalid() {
        let result = Recipient::new("   ", "a@x.com");
        assert!(matches!(result, Err(RecipientError::EmptyName)));
    }

    #[test]
    fn test_recipient_with_bad_email_is_invalid() {
        let result = Recipient::new("Ann", "not-an-address");
        assert!(matches!(result, Err(RecipientError::Email(_))));
    }

    #[test]
    fn test_csv_import_preserves_row_order() {
        let import = RecipientList::from_csv("Ann,a@x.com\nBo,b@x.com\nCy,c@x.com\n");

        let addresses: Vec<&str> = import
            .list
            .iter()
            .map(|r| r.email.as_str())
            .collect();

        assert_eq!(addresses, vec!["a@x.com", "b@x.com", "c@x.com"]);
        assert_eq!(import.skipped, 0);
    }

    #[test]
    fn test_csv_import_counts_invalid_rows() {
        let import = RecipientList::from_csv("Ann,a@x.com\n,missing@x.com\nBo,broken\n");

        assert_eq!(import.list.len(), 1);
        assert_eq!(import.skipped, 2);
    }

    #[test]
    fn test_csv_header_row_is_ignored_without_counting() {
        let import = RecipientList::from_csv("name,email\nAnn,a@x.com\n");

        assert_eq!(import.list.len(), 1);
        assert_eq!(import.skipped, 0);
    }

    #[test]
    fn test_csv_blank_lines_are_ignored() {
        let import = RecipientList::from_csv("\nAnn,a@x.com\n\n\nBo,b@x.com\n");

        assert_eq!(import.list.len(), 2);
        assert_eq!(import.skipped, 0);
    }

    #[test]
    fn test_csv_extra_columns_are_dropped() {
        let import = RecipientList::from_csv("Ann,a@x.com,vip,extra\n");

        assert_eq!(import.list.len(), 1);
        assert_eq!(import.list.first().unwrap().email.as_str(), "a@x.com");
    }

    #[test]
    fn test_csv_row_without_comma_is_skipped() {
        let import = RecipientList::from_csv("just-a-name\n");

        assert_eq!(import.list.len(), 0);
        assert_eq!(import.skipped, 1);
    }
}
