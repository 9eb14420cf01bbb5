use crate::card::ActionCard;
use crate::state::CardId;

/// Read access to the card table.
pub trait CardOracle: Send + Sync {
    fn card(&self, id: &CardId) -> Option<ActionCard>;
}
