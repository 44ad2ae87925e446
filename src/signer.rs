use solana_sdk::{
    message::VersionedMessage,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::SignerError,
    transaction::VersionedTransaction,
};

/// A compiled message carrying exactly one signature, from the fee payer.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedTransaction {
    transaction: VersionedTransaction,
    signature: Signature,
}

impl SignedTransaction {
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn payer(&self) -> Option<&Pubkey> {
        self.transaction.message.static_account_keys().first()
    }

    pub fn transaction(&self) -> &VersionedTransaction {
        &self.transaction
    }

    pub fn into_inner(self) -> VersionedTransaction {
        self.transaction
    }

    /// Checks the signature against the payer key and the message bytes.
    pub fn verify(&self) -> bool {
        match self.payer() {
            Some(payer) => self
                .signature
                .verify(payer.as_ref(), &self.transaction.message.serialize()),
            None => false,
        }
    }
}

/// Signs the exact bytes of `message` with `keypair`. Fails if the message
/// expects any signer other than this one key.
pub fn sign(message: VersionedMessage, keypair: &Keypair) -> Result<SignedTransaction, SignerError> {
    let transaction = VersionedTransaction::try_new(message, &[keypair])?;
    let signature = match transaction.signatures.as_slice() {
        [signature] => *signature,
        _ => return Err(SignerError::NotEnoughSigners),
    };

    Ok(SignedTransaction {
        transaction,
        signature,
    })
}
