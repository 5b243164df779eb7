use std::time::SystemTime;

use crate::foundation::error::{CardError, CardResult};
use crate::ledger::entry::{SignatureEntry, SignatureImage};
use crate::ledger::slot::Face;

/// Append-only, index-ordered record of accepted signatures.
///
/// An entry's index equals its position, so per-face views are plain strided walks.
#[derive(Clone, Debug, Default)]
pub struct SignatureLedger {
    entries: Vec<SignatureEntry>,
}

impl SignatureLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a signature stamped with the current wall-clock time.
    pub fn append(
        &mut self,
        signer_name: &str,
        image: SignatureImage,
    ) -> CardResult<&SignatureEntry> {
        self.append_at(signer_name, image, SystemTime::now())
    }

    /// Append a signature with an explicit submission time.
    ///
    /// Fails with [`CardError::Validation`] and leaves the ledger untouched when the name is blank
    /// or the image has no bytes. The ledger never decodes: an encoded image of a blank canvas is
    /// accepted, so whether anything was drawn is the signature pad's call
    /// ([`SignaturePad::is_empty`](crate::SignaturePad::is_empty)).
    pub fn append_at(
        &mut self,
        signer_name: &str,
        image: SignatureImage,
        submitted_at: SystemTime,
    ) -> CardResult<&SignatureEntry> {
        let signer_name = validate_signer_name(signer_name)?;
        if image.is_empty() {
            return Err(CardError::validation("signature is empty"));
        }

        let index = self.entries.len() as u64;
        self.entries.push(SignatureEntry {
            index,
            signer_name: signer_name.to_owned(),
            image,
            submitted_at,
        });
        tracing::debug!(index, face = %Face::for_index(index), "signature appended");
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Entries stamped on `face`, in ascending index order.
    ///
    /// The iterator is cheap to clone, so the view can be walked again from the start.
    pub fn entries_for_face(
        &self,
        face: Face,
    ) -> impl Iterator<Item = &SignatureEntry> + Clone {
        self.entries.iter().skip(face.ordinal()).step_by(2)
    }

    /// Entry at `index`, if appended.
    pub fn get(&self, index: u64) -> Option<&SignatureEntry> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.entries.get(i))
    }

    /// All entries in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, SignatureEntry> {
        self.entries.iter()
    }

    /// Number of accepted signatures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been signed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Trim `name`, rejecting blank names.
pub(crate) fn validate_signer_name(name: &str) -> CardResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CardError::validation("signer name is empty"));
    }
    Ok(trimmed)
}

#[cfg(test)]
#[path = "../../tests/unit/ledger/store.rs"]
mod tests;
