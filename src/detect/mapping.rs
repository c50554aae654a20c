// The canonical mapping: six logical slots resolved to the concrete names of
// exactly one naming variant.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::variants::{NamingVariant, Slot, SLOT_COUNT};
use crate::events::EventKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalMapping {
    label: &'static str,
    slots: [&'static str; SLOT_COUNT],
}

impl CanonicalMapping {
    /// Zip the logical slots against `variant`'s names, positionally.
    pub fn from_variant(variant: &NamingVariant) -> Self {
        let mut slots = [""; SLOT_COUNT];
        for (slot, name) in Slot::ALL.iter().zip(variant.names) {
            slots[slot.index()] = name;
        }
        Self {
            label: variant.label,
            slots,
        }
    }

    /// Label of the variant the mapping was built from.
    pub fn variant_label(&self) -> &'static str {
        self.label
    }

    pub fn get(&self, slot: Slot) -> &'static str {
        self.slots[slot.index()]
    }

    /// Look a concrete name up by its canonical key (e.g. "exitFullscreen").
    pub fn lookup(&self, canonical_name: &str) -> Option<&'static str> {
        Slot::from_canonical_name(canonical_name).map(|slot| self.get(slot))
    }

    /// `(canonical, concrete)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        Slot::ALL
            .iter()
            .map(move |slot| (slot.canonical_name(), self.get(*slot)))
    }

    pub fn request_method(&self) -> &'static str {
        self.get(Slot::Request)
    }

    pub fn exit_method(&self) -> &'static str {
        self.get(Slot::Exit)
    }

    pub fn element_property(&self) -> &'static str {
        self.get(Slot::Element)
    }

    pub fn enabled_property(&self) -> &'static str {
        self.get(Slot::Enabled)
    }

    pub fn event_name(&self, kind: EventKind) -> &'static str {
        match kind {
            EventKind::Change => self.get(Slot::ChangeEvent),
            EventKind::Error => self.get(Slot::ErrorEvent),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

// Serialized as an object keyed by canonical names.
impl Serialize for CanonicalMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(SLOT_COUNT))?;
        for (canonical, concrete) in self.iter() {
            map.serialize_entry(canonical, concrete)?;
        }
        map.end()
    }
}
