//! Feature matrix
//!
//! Records which optional capabilities the server advertised in its FEAT reply.

use serde::Serialize;
use std::collections::BTreeSet;

/// Simple FEAT tokens whose presence is recorded as a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Feature {
    Utf8,
    Eprt,
    Idle,
    Mdtm,
    Size,
    Mfmt,
    Mlsd,
    Pret,
    Pbsz,
    Prot,
    Tvfs,
    Esta,
    Pasv,
    Epsv,
    Estp,
}

impl Feature {
    pub const ALL: [Feature; 15] = [
        Feature::Utf8,
        Feature::Eprt,
        Feature::Idle,
        Feature::Mdtm,
        Feature::Size,
        Feature::Mfmt,
        Feature::Mlsd,
        Feature::Pret,
        Feature::Pbsz,
        Feature::Prot,
        Feature::Tvfs,
        Feature::Esta,
        Feature::Pasv,
        Feature::Epsv,
        Feature::Estp,
    ];

    /// The token as it appears in a FEAT reply.
    pub fn token(self) -> &'static str {
        match self {
            Feature::Utf8 => "UTF8",
            Feature::Eprt => "EPRT",
            Feature::Idle => "IDLE",
            Feature::Mdtm => "MDTM",
            Feature::Size => "SIZE",
            Feature::Mfmt => "MFMT",
            Feature::Mlsd => "MLSD",
            Feature::Pret => "PRET",
            Feature::Pbsz => "PBSZ",
            Feature::Prot => "PROT",
            Feature::Tvfs => "TVFS",
            Feature::Esta => "ESTA",
            Feature::Pasv => "PASV",
            Feature::Epsv => "EPSV",
            Feature::Estp => "ESTP",
        }
    }
}

/// Capabilities discovered with FEAT during `connect`.
///
/// Built once from the FEAT reply and never mutated afterwards. The compound
/// features hold their sub-tokens, `None` meaning "not advertised".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureMatrix {
    flags: BTreeSet<Feature>,
    rest: Option<Vec<String>>,
    mlst: Option<Vec<String>>,
    auth: Option<Vec<String>>,
}

/// Returns the remainder of `line` when it starts with the `token` word.
fn strip_token<'a>(line: &'a str, token: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(token)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

impl FeatureMatrix {
    /// Builds the matrix from the message of a FEAT reply.
    ///
    /// Every line is trimmed; a line starting with a known token sets its flag.
    /// `MLST` facts are split on `;`, `AUTH` and `REST` arguments on spaces.
    pub fn from_feat_reply(message: &str) -> Self {
        let lines: Vec<&str> = message.lines().map(str::trim).collect();

        let flags = Feature::ALL
            .into_iter()
            .filter(|feat| lines.iter().any(|l| strip_token(l, feat.token()).is_some()))
            .collect();

        let compound = |token: &str, separator: char| {
            lines.iter().find_map(|l| strip_token(l, token)).map(|args| {
                args.split(separator)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
        };

        Self {
            mlst: compound("MLST", ';'),
            auth: compound("AUTH", ' '),
            rest: compound("REST", ' '),
            flags,
        }
    }

    /// Whether the server advertised `feature`.
    pub fn has(&self, feature: Feature) -> bool {
        self.flags.contains(&feature)
    }

    /// Facts listed after `MLST`, if advertised.
    pub fn mlst(&self) -> Option<&[String]> {
        self.mlst.as_deref()
    }

    /// Mechanisms listed after `AUTH`, if advertised.
    pub fn auth(&self) -> Option<&[String]> {
        self.auth.as_deref()
    }

    /// Restart modes listed after `REST`, if advertised.
    pub fn rest(&self) -> Option<&[String]> {
        self.rest.as_deref()
    }

    /// Whether `AUTH TLS` was advertised.
    pub fn supports_tls(&self) -> bool {
        self.auth()
            .is_some_and(|mechs| mechs.iter().any(|m| m.eq_ignore_ascii_case("TLS")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEAT: &str = "Features:\r\n EPSV\r\n MDTM\r\n MLST type*;size*;modify*;\r\n \
                        AUTH TLS SSL\r\n REST STREAM\r\n PBSZ\r\n PROT\r\n SIZE\r\n UTF8\r\nEnd";

    #[test]
    fn test_flags() {
        let feats = FeatureMatrix::from_feat_reply(FEAT);
        assert!(feats.has(Feature::Epsv));
        assert!(feats.has(Feature::Mdtm));
        assert!(feats.has(Feature::Utf8));
        assert!(!feats.has(Feature::Pasv));
        assert!(!feats.has(Feature::Mlsd));
    }

    #[test]
    fn test_compound_features() {
        let feats = FeatureMatrix::from_feat_reply(FEAT);
        assert_eq!(
            feats.mlst().unwrap(),
            &["type*".to_string(), "size*".into(), "modify*".into()]
        );
        assert_eq!(feats.auth().unwrap(), &["TLS".to_string(), "SSL".into()]);
        assert_eq!(feats.rest().unwrap(), &["STREAM".to_string()]);
        assert!(feats.supports_tls());
    }

    #[test]
    fn test_absent_compound_features() {
        let feats = FeatureMatrix::from_feat_reply("Features:\r\n SIZE\r\nEnd");
        assert!(feats.mlst().is_none());
        assert!(feats.auth().is_none());
        assert!(feats.rest().is_none());
        assert!(!feats.supports_tls());
    }

    #[test]
    fn test_token_must_be_whole_word() {
        let feats = FeatureMatrix::from_feat_reply("Features:\r\n MLSDX\r\n MLSTfoo\r\nEnd");
        assert!(!feats.has(Feature::Mlsd));
        assert!(feats.mlst().is_none());
    }
}
