//! Field-name mangling for record keys.
//!
//! A record field travels as a single string key that carries both its name
//! and its access qualifier:
//!
//! - public: `name`
//! - protected: `\0*\0name`
//! - private: `\0Owner\0name`, where `Owner` is the record's type name
//!
//! `Owner` must not contain NUL; the encoder rejects such type names.

use std::fmt;

const NUL: u8 = 0x00;
const PROTECTED_MARK: u8 = b'*';

/// Access qualifier of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        };
        f.write_str(name)
    }
}

/// Why a wire key could not be demangled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemangleError {
    /// A private key names a different owner type.
    OwnerMismatch { found: Vec<u8> },
    /// A key starting with NUL has no second NUL.
    Unterminated,
}

impl fmt::Display for DemangleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OwnerMismatch { found } => {
                write!(f, "private key owner {:?}", String::from_utf8_lossy(found))
            }
            Self::Unterminated => write!(f, "mangled key has no closing NUL"),
        }
    }
}

/// Builds the wire key for a field of the record type `owner`.
#[must_use]
pub fn mangle(name: &str, visibility: Visibility, owner: &str) -> Vec<u8> {
    match visibility {
        Visibility::Public => name.as_bytes().to_vec(),
        Visibility::Protected => {
            let mut key = Vec::with_capacity(name.len() + 3);
            key.extend_from_slice(&[NUL, PROTECTED_MARK, NUL]);
            key.extend_from_slice(name.as_bytes());
            key
        }
        Visibility::Private => {
            let mut key = Vec::with_capacity(owner.len() + name.len() + 2);
            key.push(NUL);
            key.extend_from_slice(owner.as_bytes());
            key.push(NUL);
            key.extend_from_slice(name.as_bytes());
            key
        }
    }
}

/// Splits a wire key into its visibility and field name, checking private
/// keys against `owner`.
pub fn demangle<'a>(key: &'a [u8], owner: &str) -> Result<(Visibility, &'a [u8]), DemangleError> {
    let Some(rest) = key.strip_prefix(&[NUL]) else {
        return Ok((Visibility::Public, key));
    };
    if let Some(name) = rest.strip_prefix(&[PROTECTED_MARK, NUL]) {
        return Ok((Visibility::Protected, name));
    }
    let split = rest
        .iter()
        .position(|&byte| byte == NUL)
        .ok_or(DemangleError::Unterminated)?;
    let (found, name) = (&rest[..split], &rest[split + 1..]);
    if found != owner.as_bytes() {
        return Err(DemangleError::OwnerMismatch {
            found: found.to_vec(),
        });
    }
    Ok((Visibility::Private, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mangle_layouts() {
        assert_eq!(mangle("x", Visibility::Public, "Point"), b"x");
        assert_eq!(mangle("x", Visibility::Protected, "Point"), b"\0*\0x");
        assert_eq!(mangle("x", Visibility::Private, "Point"), b"\0Point\0x");
    }

    #[test]
    fn demangle_each_visibility() {
        assert_eq!(
            demangle(b"x", "Point").unwrap(),
            (Visibility::Public, &b"x"[..])
        );
        assert_eq!(
            demangle(b"\0*\0x", "Point").unwrap(),
            (Visibility::Protected, &b"x"[..])
        );
        assert_eq!(
            demangle(b"\0Point\0x", "Point").unwrap(),
            (Visibility::Private, &b"x"[..])
        );
    }

    #[test]
    fn demangle_owner_mismatch() {
        assert_eq!(
            demangle(b"\0Other\0x", "Point").unwrap_err(),
            DemangleError::OwnerMismatch {
                found: b"Other".to_vec()
            }
        );
        // A prefix of the owner is not the owner.
        assert!(demangle(b"\0Poin\0x", "Point").is_err());
    }

    #[test]
    fn demangle_unterminated() {
        assert_eq!(
            demangle(b"\0Point", "Point").unwrap_err(),
            DemangleError::Unterminated
        );
    }

    #[test]
    fn protected_wins_over_owner_named_star() {
        // An owner literally named "*" is indistinguishable from protected.
        assert_eq!(
            demangle(&mangle("f", Visibility::Private, "*"), "*").unwrap().0,
            Visibility::Protected
        );
    }

    #[test]
    fn empty_field_names() {
        assert_eq!(
            demangle(&mangle("", Visibility::Private, "T"), "T").unwrap(),
            (Visibility::Private, &b""[..])
        );
        assert_eq!(demangle(b"", "T").unwrap(), (Visibility::Public, &b""[..]));
    }
}
