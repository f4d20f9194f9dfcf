//! Domain-level constants.
//!
//! These constants define the guest provisioning contract: field names,
//! user-facing messages, config namespaces and random string shapes.

// =============================================================================
// Field errors and messages
// =============================================================================

/// Field key used for every email-related validation error
pub const FIELD_EMAIL: &str = "email";

/// Email is empty or fails mail-address syntax validation
pub const MSG_INVALID_MAIL_ADDRESS: &str = "Invalid mail address";

/// Derived username is already taken in the directory
pub const MSG_USERNAME_EXISTS: &str = "A username with that email already exists.";

/// Guest account was provisioned
pub const MSG_USER_CREATED: &str = "User successfully created";

// =============================================================================
// Config namespaces and keys
// =============================================================================

/// App namespace owning the guest metadata
pub const APP_ID_GUESTS: &str = "guests";

/// Host platform namespace (the guest flag lives here)
pub const APP_ID_CORE: &str = "owncloud";

/// Key of the per-user registration token
pub const KEY_REGISTER_TOKEN: &str = "registerToken";

/// Key of the creation timestamp (Unix seconds)
pub const KEY_CREATED: &str = "created";

/// Key of the guest flag
pub const KEY_IS_GUEST: &str = "isGuest";

/// Value of the guest flag for accounts created as guests
pub const IS_GUEST_VALUE: &str = "1";

// =============================================================================
// Random strings
// =============================================================================

/// Digits alphabet
pub const CHAR_DIGITS: &str = "0123456789";

/// Lowercase letters alphabet
pub const CHAR_LOWER: &str = "abcdefghijklmnopqrstuvwxyz";

/// Uppercase letters alphabet
pub const CHAR_UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Symbols completing the password-strength alphabet
pub const CHAR_SYMBOLS: &str = "+/";

/// Length of the generated initial password
pub const GENERATED_PASSWORD_LENGTH: usize = 20;

/// Length of the registration token
pub const REGISTER_TOKEN_LENGTH: usize = 21;

/// Alphabet of the registration token (digits, lower, upper)
pub fn register_token_alphabet() -> String {
    [CHAR_DIGITS, CHAR_LOWER, CHAR_UPPER].concat()
}

/// Default alphabet of the password-strength generator
pub fn password_alphabet() -> String {
    [CHAR_UPPER, CHAR_LOWER, CHAR_DIGITS, CHAR_SYMBOLS].concat()
}

// =============================================================================
// Passwords
// =============================================================================

/// Minimum password length accepted by the directory
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_token_alphabet_is_alphanumeric() {
        let alphabet = register_token_alphabet();
        assert_eq!(alphabet.len(), 62);
        assert!(alphabet.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn password_alphabet_extends_alphanumerics() {
        let alphabet = password_alphabet();
        assert_eq!(alphabet.len(), 64);
        assert!(alphabet.contains('+'));
        assert!(alphabet.contains('/'));
    }
}
