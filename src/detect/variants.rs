// Static table of the naming conventions hosts have used for full-screen.
// Order is priority order: the standard names first, then vendor variants
// from the newest convention to the oldest.

/// Number of logical slots in a naming variant.
pub const SLOT_COUNT: usize = 6;

/// The six logical concepts every variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Method on an element that enters full-screen
    Request,
    /// Method on the document that leaves full-screen
    Exit,
    /// Document property holding the current full-screen element
    Element,
    /// Document property telling whether full-screen is allowed at all
    Enabled,
    /// Event fired on every full-screen state change
    ChangeEvent,
    /// Event fired when a transition fails
    ErrorEvent,
}

impl Slot {
    pub const ALL: [Slot; SLOT_COUNT] = [
        Slot::Request,
        Slot::Exit,
        Slot::Element,
        Slot::Enabled,
        Slot::ChangeEvent,
        Slot::ErrorEvent,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The slot's key in a canonical mapping (its standard name).
    pub fn canonical_name(self) -> &'static str {
        STANDARD.name(self)
    }

    pub fn from_canonical_name(name: &str) -> Option<Slot> {
        Slot::ALL
            .into_iter()
            .find(|slot| slot.canonical_name() == name)
    }
}

/// One historical convention for exposing full-screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamingVariant {
    /// Short tag used in logs ("standard", "webkit", ...)
    pub label: &'static str,
    /// Concrete names, positionally matching `Slot::ALL`
    pub names: [&'static str; SLOT_COUNT],
}

impl NamingVariant {
    pub const fn new(label: &'static str, names: [&'static str; SLOT_COUNT]) -> Self {
        Self { label, names }
    }

    pub fn name(&self, slot: Slot) -> &'static str {
        self.names[slot.index()]
    }

    /// The member whose presence on the document proves the variant is
    /// implemented. Exit methods are only present where the feature
    /// works; request methods sometimes exist as no-ops.
    pub fn existence_proof(&self) -> &'static str {
        self.name(Slot::Exit)
    }
}

pub const STANDARD: NamingVariant = NamingVariant::new(
    "standard",
    [
        "requestFullscreen",
        "exitFullscreen",
        "fullscreenElement",
        "fullscreenEnabled",
        "fullscreenchange",
        "fullscreenerror",
    ],
);

pub const WEBKIT: NamingVariant = NamingVariant::new(
    "webkit",
    [
        "webkitRequestFullscreen",
        "webkitExitFullscreen",
        "webkitFullscreenElement",
        "webkitFullscreenEnabled",
        "webkitfullscreenchange",
        "webkitfullscreenerror",
    ],
);

// Legacy WebKit never had an enabled flag; the cancel method doubles as one.
pub const WEBKIT_LEGACY: NamingVariant = NamingVariant::new(
    "webkit-legacy",
    [
        "webkitRequestFullScreen",
        "webkitCancelFullScreen",
        "webkitCurrentFullScreenElement",
        "webkitCancelFullScreen",
        "webkitfullscreenchange",
        "webkitfullscreenerror",
    ],
);

pub const MOZ: NamingVariant = NamingVariant::new(
    "moz",
    [
        "mozRequestFullScreen",
        "mozCancelFullScreen",
        "mozFullScreenElement",
        "mozFullScreenEnabled",
        "mozfullscreenchange",
        "mozfullscreenerror",
    ],
);

pub const MS: NamingVariant = NamingVariant::new(
    "ms",
    [
        "msRequestFullscreen",
        "msExitFullscreen",
        "msFullscreenElement",
        "msFullscreenEnabled",
        "MSFullscreenChange",
        "MSFullscreenError",
    ],
);

/// Every known variant, in probe order.
pub static NAMING_VARIANTS: [NamingVariant; 5] = [STANDARD, WEBKIT, WEBKIT_LEGACY, MOZ, MS];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_order() {
        let labels: Vec<&str> = NAMING_VARIANTS.iter().map(|v| v.label).collect();
        assert_eq!(labels, ["standard", "webkit", "webkit-legacy", "moz", "ms"]);
    }

    #[test]
    fn test_legacy_webkit_reuses_cancel_method_as_enabled_flag() {
        assert_eq!(WEBKIT_LEGACY.name(Slot::Exit), "webkitCancelFullScreen");
        assert_eq!(WEBKIT_LEGACY.name(Slot::Enabled), "webkitCancelFullScreen");
        // no other variant shares a name between two of its own slots
        for variant in [STANDARD, WEBKIT, MOZ, MS] {
            let mut names = variant.names.to_vec();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), SLOT_COUNT, "{}", variant.label);
        }
    }

    #[test]
    fn test_existence_proofs_are_distinct() {
        let mut proofs: Vec<&str> = NAMING_VARIANTS.iter().map(|v| v.existence_proof()).collect();
        proofs.sort_unstable();
        proofs.dedup();
        assert_eq!(proofs.len(), NAMING_VARIANTS.len());
    }

    #[test]
    fn test_canonical_names_round_trip() {
        for slot in Slot::ALL {
            assert_eq!(Slot::from_canonical_name(slot.canonical_name()), Some(slot));
        }
        assert_eq!(Slot::from_canonical_name("webkitExitFullscreen"), None);
    }
}
