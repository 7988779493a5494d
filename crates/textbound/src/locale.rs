//! Locale names and the charset used to interpret narrow text.

use core::fmt;
use core::str::FromStr;

use crate::error::{BoundaryError, Result};

/// Charset of narrow (8-bit) text under a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    Utf8,
    Latin1,
    Ascii,
}

impl Charset {
    /// Canonical name, as used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Latin1 => "ISO-8859-1",
            Charset::Ascii => "US-ASCII",
        }
    }

    /// Look up a charset by name, ignoring case, `-` and `_`.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "utf8" => Some(Charset::Utf8),
            "iso88591" | "latin1" => Some(Charset::Latin1),
            "usascii" | "ascii" | "ansix3.41968" => Some(Charset::Ascii),
            _ => None,
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed locale name of the form `lang[_COUNTRY][.charset][@variant]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    country: Option<String>,
    charset: Charset,
    variant: Option<String>,
}

impl Locale {
    /// The classic `C` locale with UTF-8 narrow text.
    pub fn classic() -> Self {
        Self {
            language: "C".to_string(),
            country: None,
            charset: Charset::Utf8,
            variant: None,
        }
    }

    /// Parse a locale name.
    ///
    /// # Errors
    /// Returns [`BoundaryError::Locale`] for empty or malformed names and for
    /// charsets other than UTF-8, ISO-8859-1 and US-ASCII.
    pub fn parse(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BoundaryError::Locale("empty locale name".to_string()));
        }

        let (rest, variant) = match name.split_once('@') {
            Some((rest, variant)) => (rest, Some(variant)),
            None => (name, None),
        };
        let (rest, charset) = match rest.split_once('.') {
            Some((rest, charset)) => (rest, Some(charset)),
            None => (rest, None),
        };
        let (language, country) = match rest.split_once(['_', '-']) {
            Some((language, country)) => (language, Some(country)),
            None => (rest, None),
        };

        let charset = match charset {
            Some(charset) => Charset::from_name(charset).ok_or_else(|| {
                BoundaryError::Locale(format!("unsupported charset `{charset}` in `{name}`"))
            })?,
            None => Charset::Utf8,
        };

        let language = if language == "C" || language == "POSIX" {
            "C".to_string()
        } else if !language.is_empty() && language.chars().all(|c| c.is_ascii_alphabetic()) {
            language.to_ascii_lowercase()
        } else {
            return Err(BoundaryError::Locale(format!("invalid language in `{name}`")));
        };

        let country = match country {
            Some(c) if !c.is_empty() && c.chars().all(|c| c.is_ascii_alphanumeric()) => {
                Some(c.to_ascii_uppercase())
            }
            Some(_) => {
                return Err(BoundaryError::Locale(format!("invalid country in `{name}`")));
            }
            None => None,
        };

        let variant = match variant {
            Some("") => {
                return Err(BoundaryError::Locale(format!("empty variant in `{name}`")));
            }
            Some(v) => Some(v.to_ascii_lowercase()),
            None => None,
        };

        Ok(Self {
            language,
            country,
            charset,
            variant,
        })
    }

    /// The locale named by `LC_ALL`, `LC_CTYPE` or `LANG`, in that order,
    /// or the classic locale when none of them is set.
    ///
    /// # Errors
    /// Returns [`BoundaryError::Locale`] when the selected variable holds an
    /// unparsable name.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        ["LC_ALL", "LC_CTYPE", "LANG"]
            .into_iter()
            .filter_map(&lookup)
            .find(|value| !value.is_empty())
            .map_or_else(|| Ok(Self::classic()), |name| Self::parse(&name))
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Returns `true` if narrow text under this locale is UTF-8.
    pub fn is_utf8(&self) -> bool {
        self.charset == Charset::Utf8
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::classic()
    }
}

impl FromStr for Locale {
    type Err = BoundaryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(country) = &self.country {
            write!(f, "_{country}")?;
        }
        write!(f, ".{}", self.charset)?;
        if let Some(variant) = &self.variant {
            write!(f, "@{variant}")?;
        }
        Ok(())
    }
}
