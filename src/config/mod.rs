/// Card session configuration and its JSON boundary.
pub mod card;
