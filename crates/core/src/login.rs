//! Login form input: CPF identifiers and credentials.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const CPF_DIGITS: usize = 11;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CpfError {
    #[error("a CPF has 11 digits, got {digits}")]
    InvalidLength { digits: usize },
}

/// Apply the `000.000.000-00` mask to partial keyboard input.
///
/// Non-digits are dropped and at most eleven digits are kept.
#[must_use]
pub fn format_cpf(input: &str) -> String {
    let digits: Vec<char> = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(CPF_DIGITS)
        .collect();

    let mut out = String::with_capacity(CPF_DIGITS + 3);
    for (i, digit) in digits.iter().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(*digit);
    }
    out
}

/// Brazilian taxpayer number, stored as its eleven digits.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Cpf(String);

impl Cpf {
    /// Accepts raw or masked input; punctuation is ignored.
    ///
    /// # Errors
    ///
    /// Returns `CpfError::InvalidLength` unless exactly eleven digits remain.
    pub fn parse(input: &str) -> Result<Self, CpfError> {
        let digits: String = input.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != CPF_DIGITS {
            return Err(CpfError::InvalidLength {
                digits: digits.len(),
            });
        }
        Ok(Self(digits))
    }

    /// Build from known digits. Each value is reduced to one decimal digit.
    #[must_use]
    pub fn from_digits(digits: [u8; CPF_DIGITS]) -> Self {
        Self(digits.iter().map(|d| char::from(b'0' + d % 10)).collect())
    }

    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl FromStr for Cpf {
    type Err = CpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_cpf(&self.0))
    }
}

impl fmt::Debug for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cpf({self})")
    }
}

/// What the login form submits.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub cpf: Cpf,
    pub password: String,
}

impl Credentials {
    /// # Errors
    ///
    /// Returns `CpfError` if the CPF field is malformed.
    pub fn parse(cpf: &str, password: impl Into<String>) -> Result<Self, CpfError> {
        Ok(Self {
            cpf: Cpf::parse(cpf)?,
            password: password.into(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("cpf", &self.cpf)
            .finish_non_exhaustive()
    }
}
