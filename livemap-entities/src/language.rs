use std::{fmt, str::FromStr};

use thiserror::Error;

const PRIMARY_SUBTAG_MIN_LEN: usize = 2;
const PRIMARY_SUBTAG_MAX_LEN: usize = 8;
const REGION_SUBTAG_MAX_LEN: usize = 8;

/// A normalized, lowercase language code like `en`, `kn` or `pt-br`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Language(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid language code '{0}'")]
pub struct LanguageParseError(String);

impl Language {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary subtag, e.g. `pt` for `pt-br`.
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }
}

fn is_valid_subtag(subtag: &str, min_len: usize, max_len: usize) -> bool {
    (min_len..=max_len).contains(&subtag.len()) && subtag.bytes().all(|b| b.is_ascii_alphabetic())
}

impl FromStr for Language {
    type Err = LanguageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        let valid = match normalized.split_once('-') {
            Some((primary, region)) => {
                is_valid_subtag(primary, PRIMARY_SUBTAG_MIN_LEN, PRIMARY_SUBTAG_MAX_LEN)
                    && is_valid_subtag(region, 1, REGION_SUBTAG_MAX_LEN)
            }
            None => is_valid_subtag(&normalized, PRIMARY_SUBTAG_MIN_LEN, PRIMARY_SUBTAG_MAX_LEN),
        };
        if valid {
            Ok(Self(normalized))
        } else {
            Err(LanguageParseError(s.to_owned()))
        }
    }
}

impl AsRef<str> for Language {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_language() {
        assert_eq!("en".parse::<Language>().unwrap().as_str(), "en");
        assert_eq!(" KN ".parse::<Language>().unwrap().as_str(), "kn");
        let lang: Language = "pt_BR".parse().unwrap();
        assert_eq!(lang.as_str(), "pt-br");
        assert_eq!(lang.primary(), "pt");
    }

    #[test]
    fn reject_invalid_language() {
        assert!("".parse::<Language>().is_err());
        assert!("e".parse::<Language>().is_err());
        assert!("e1".parse::<Language>().is_err());
        assert!("en-".parse::<Language>().is_err());
        assert!("en-us-x".parse::<Language>().is_err());
        assert!("verylonglang".parse::<Language>().is_err());
    }
}
