/// Owned card context wiring hinge, ledger and compositor to the host.
pub mod card_session;
