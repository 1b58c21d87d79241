use crate::{definition::ProxyDefinition, fragments};
use sha2::{Digest, Sha256};
use std::fmt;
use wraith_core::error::ProxyError;

///
/// DefinitionFingerprint
///
/// Digest over a definition's rendered fragments. The external caching
/// layer compares fingerprints to decide on-disk regeneration.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DefinitionFingerprint([u8; 32]);

impl DefinitionFingerprint {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for DefinitionFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Fingerprint a definition from its rendered fragments.
/// Length-prefixed and domain-tagged; identical metadata hashes identically.
pub fn fingerprint(def: &ProxyDefinition) -> Result<DefinitionFingerprint, ProxyError> {
    let mut hasher = Sha256::new();
    hasher.update(b"proxydef:v1");
    write_str(&mut hasher, def.model.path);

    for (name, generate) in fragments::FRAGMENTS {
        write_str(&mut hasher, name);
        write_str(&mut hasher, &generate(def)?.to_string());
    }

    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);

    Ok(DefinitionFingerprint::from_bytes(out))
}

fn write_str(hasher: &mut Sha256, value: &str) {
    let len = u32::try_from(value.len()).unwrap_or(u32::MAX);
    hasher.update(len.to_be_bytes());
    hasher.update(value.as_bytes());
}
