//! `SecureRandom` backed by the thread-local CSPRNG.

use rand::Rng;

use domain::password_alphabet;

use super::ports::SecureRandom;

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl SecureRandom for RandomGenerator {
    fn generate(&self, length: usize) -> String {
        self.generate_medium(length, &password_alphabet())
    }

    fn generate_medium(&self, length: usize, alphabet: &str) -> String {
        let chars: Vec<char> = alphabet.chars().collect();
        if chars.is_empty() {
            return String::new();
        }

        let mut rng = rand::thread_rng();
        (0..length)
            .map(|_| chars[rng.gen_range(0..chars.len())])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{register_token_alphabet, REGISTER_TOKEN_LENGTH};

    #[test]
    fn medium_strings_stay_in_alphabet() {
        let alphabet = register_token_alphabet();
        let token = RandomGenerator.generate_medium(REGISTER_TOKEN_LENGTH, &alphabet);

        assert_eq!(token.chars().count(), REGISTER_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn passwords_use_password_alphabet() {
        let alphabet = password_alphabet();
        let password = RandomGenerator.generate(20);

        assert_eq!(password.len(), 20);
        assert!(password.chars().all(|c| alphabet.contains(c)));
    }

    #[test]
    fn empty_alphabet_yields_empty_string() {
        assert_eq!(RandomGenerator.generate_medium(10, ""), "");
    }

    #[test]
    fn zero_length_is_empty() {
        assert!(RandomGenerator.generate(0).is_empty());
    }
}
