// Capability detection: probes a host document for a known naming variant
// and resolves the canonical mapping every later call goes through.

pub mod mapping;
pub mod variants;

pub use mapping::CanonicalMapping;
pub use variants::{NamingVariant, Slot, NAMING_VARIANTS, SLOT_COUNT};

use crate::host::HostDocument;

/// Result of probing a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// No known variant is present; the facade stays disabled.
    Unsupported,
    Supported(CanonicalMapping),
}

impl Capability {
    pub fn is_supported(&self) -> bool {
        matches!(self, Capability::Supported(_))
    }

    pub fn mapping(&self) -> Option<&CanonicalMapping> {
        match self {
            Capability::Supported(mapping) => Some(mapping),
            Capability::Unsupported => None,
        }
    }
}

/// Scans a variant table against a host, first match wins.
#[derive(Debug, Clone, Copy)]
pub struct Detector {
    variants: &'static [NamingVariant],
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector {
    /// Detector over the built-in variant table.
    pub fn new() -> Self {
        Self {
            variants: &NAMING_VARIANTS,
        }
    }

    /// Detector over a caller-supplied table, probed in the given order.
    pub fn with_variants(variants: &'static [NamingVariant]) -> Self {
        Self { variants }
    }

    pub fn variants(&self) -> &'static [NamingVariant] {
        self.variants
    }

    pub fn detect<H: HostDocument + ?Sized>(&self, host: &H) -> Capability {
        let matched = self
            .variants
            .iter()
            .find(|variant| host.has_member(variant.existence_proof()));

        match matched {
            Some(variant) => {
                let mapping = CanonicalMapping::from_variant(variant);
                log::info!(
                    "[Detect] Full-screen available via '{}' names: {}",
                    variant.label,
                    mapping.to_json()
                );
                Capability::Supported(mapping)
            }
            None => {
                log::warn!(
                    "[Detect] No full-screen naming variant found (probed {} variants)",
                    self.variants.len()
                );
                Capability::Unsupported
            }
        }
    }
}

/// Probe `host` against the built-in variant table.
pub fn detect<H: HostDocument + ?Sized>(host: &H) -> Capability {
    Detector::new().detect(host)
}
