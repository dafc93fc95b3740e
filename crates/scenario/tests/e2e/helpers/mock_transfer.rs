//! Recording file transfer.

use lifecheck_transfer::{FileTransfer, TransferError, TransferTarget};

use super::journal::Journal;

pub struct MockTransfer {
    journal: Journal,
    fail: bool,
}

#[allow(dead_code)]
impl MockTransfer {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            fail: false,
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl FileTransfer for MockTransfer {
    async fn upload(&self, target: &TransferTarget) -> Result<(), TransferError> {
        self.journal.record(format!(
            "sftp upload {}@{}",
            target.fqdn, target.api_endpoint
        ));
        if self.fail {
            return Err(TransferError::CommandFailed {
                status: "exit status: 1".to_owned(),
                hint: format!("sshpass -p\"$PASSWORD\" sftp -P 222 admin@{}@{}", target.fqdn, target.api_endpoint),
            });
        }
        Ok(())
    }
}
