//! Session code generation.
//!
//! The generator produces candidate codes under a [`CodePolicy`]; it knows
//! nothing about which codes are taken. Uniqueness is handled by the
//! registry's retry loop, because only the registry can check membership and
//! insert atomically.

use drop_types::{CodePolicy, SessionCode};

/// Generator for session codes.
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator {
    policy: CodePolicy,
}

impl CodeGenerator {
    /// Create a generator for the given policy.
    pub fn new(policy: CodePolicy) -> Self {
        Self { policy }
    }

    /// The policy this generator mints under.
    pub fn policy(&self) -> CodePolicy {
        self.policy
    }

    /// Generate a random candidate code.
    ///
    /// Pure aside from randomness; the caller checks uniqueness.
    pub fn generate(&self) -> SessionCode {
        let mut rng = rand::thread_rng();
        self.policy.generate(&mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_satisfy_the_policy() {
        let generator = CodeGenerator::new(CodePolicy::alphanumeric());
        for _ in 0..100 {
            let code = generator.generate();
            assert!(generator.policy().matches(&code));
            assert_eq!(code.as_str().len(), 6);
        }
    }

    #[test]
    fn repeated_digit_generator_covers_small_space() {
        // 10 possible codes; 200 draws should hit several distinct ones.
        let generator = CodeGenerator::new(CodePolicy::repeated_digit());
        let distinct: std::collections::HashSet<String> = (0..200)
            .map(|_| generator.generate().as_str().to_string())
            .collect();
        assert!(distinct.len() > 1);
        for code in &distinct {
            assert_eq!(code.len(), 4);
        }
    }
}
