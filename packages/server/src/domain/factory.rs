//! Domain factories for creating domain entities and value objects.

use super::{error::ValueObjectError, value_object::RoomKey};

/// Factory for generating RoomKey instances.
///
/// This factory encapsulates the logic for generating new room keys,
/// separating the generation concern from the validation logic in RoomKey.
pub struct RoomKeyFactory;

impl RoomKeyFactory {
    /// Generate a new short RoomKey from a random UUID v4.
    ///
    /// # Returns
    ///
    /// A Result containing a new 8-character hexadecimal RoomKey
    ///
    /// # Errors
    ///
    /// This method should not fail in practice, but returns Result for consistency
    /// with the domain error handling pattern.
    pub fn generate() -> Result<RoomKey, ValueObjectError> {
        let uuid = uuid::Uuid::new_v4();
        let short = uuid.simple().to_string()[..8].to_string();
        RoomKey::new(short)
    }
}
