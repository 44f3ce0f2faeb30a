//! Static table of waste categories with their labels and disposal tips.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

use crate::model::WasteCategory;

/// Label and disposal guidance for a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyEntry {
    /// Category the entry describes.
    #[serde(rename = "type")]
    pub category: WasteCategory,
    /// Display name.
    pub label: &'static str,
    /// Ordered disposal tips.
    pub tips: &'static [&'static str],
}

impl TaxonomyEntry {
    /// Tips as owned strings, ready to be placed in a response.
    #[must_use]
    pub fn suggestions(&self) -> Vec<String> {
        self.tips.iter().map(|tip| (*tip).to_owned()).collect()
    }
}

static WET: TaxonomyEntry = TaxonomyEntry {
    category: WasteCategory::Wet,
    label: "Wet Waste",
    tips: &[
        "Compostable",
        "Use green bin",
        "Avoid plastic bags",
        "Can be used for composting",
    ],
};

static DRY: TaxonomyEntry = TaxonomyEntry {
    category: WasteCategory::Dry,
    label: "Dry Waste",
    tips: &[
        "Recyclable",
        "Clean before disposal",
        "Use blue bin",
        "Separate paper from plastic",
    ],
};

static EWASTE: TaxonomyEntry = TaxonomyEntry {
    category: WasteCategory::EWaste,
    label: "E-Waste",
    tips: &[
        "Special disposal needed",
        "Find e-waste center",
        "Remove batteries",
        "Never throw in regular bin",
    ],
};

static HAZARDOUS: TaxonomyEntry = TaxonomyEntry {
    category: WasteCategory::Hazardous,
    label: "Hazardous",
    tips: &[
        "Handle with care",
        "Never mix with other waste",
        "Contact authorities",
        "Use designated collection points",
    ],
};

fn builtin_entry(category: WasteCategory) -> &'static TaxonomyEntry {
    match category {
        WasteCategory::Wet => &WET,
        WasteCategory::Dry => &DRY,
        WasteCategory::EWaste => &EWASTE,
        WasteCategory::Hazardous => &HAZARDOUS,
    }
}

static BUILTIN: LazyLock<Taxonomy> =
    LazyLock::new(|| Taxonomy::new(WasteCategory::ALL.map(builtin_entry).to_vec()));

/// Immutable lookup table from category to guidance.
///
/// Built once per process and shared read-only between requests.
#[derive(Debug)]
pub struct Taxonomy {
    entries: HashMap<WasteCategory, &'static TaxonomyEntry>,
    fallback: &'static TaxonomyEntry,
}

impl Taxonomy {
    fn new(entries: Vec<&'static TaxonomyEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| (entry.category, entry))
            .collect();
        Self {
            entries,
            fallback: builtin_entry(WasteCategory::DEFAULT),
        }
    }

    /// The process-wide built-in taxonomy.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Guidance for a category.
    #[must_use]
    pub fn entry(&self, category: WasteCategory) -> &TaxonomyEntry {
        self.entries.get(&category).copied().unwrap_or(self.fallback)
    }

    /// Map a raw model label onto the taxonomy.
    ///
    /// Labels outside the four categories resolve to [`WasteCategory::DEFAULT`].
    #[must_use]
    pub fn resolve(&self, raw: &str) -> (WasteCategory, &TaxonomyEntry) {
        let category = WasteCategory::from_label(raw).unwrap_or(WasteCategory::DEFAULT);
        (category, self.entry(category))
    }

    /// Entries in display order.
    pub fn entries(&self) -> impl Iterator<Item = &TaxonomyEntry> {
        WasteCategory::ALL
            .into_iter()
            .map(move |category| self.entry(category))
    }
}
