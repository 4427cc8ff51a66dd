use serde::{Deserialize, Serialize};

/// Expense category assigned by the zero-shot classifier.
///
/// The serde / `Display` form of each variant is the exact label string
/// handed to the classification model, so a top-ranked label maps back to a
/// variant via `FromStr`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Category {
    #[serde(rename = "Meals & Dining")]
    MealsAndDining,
    #[serde(rename = "Travel (Flights)")]
    TravelFlights,
    #[serde(rename = "Accommodation")]
    Accommodation,
    #[serde(rename = "Local Transport")]
    LocalTransport,
    #[serde(rename = "Office Supplies")]
    OfficeSupplies,
    #[serde(rename = "Client Entertainment")]
    ClientEntertainment,
    /// Fallback when classification fails or returns an unknown label.
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// The fixed label set submitted to the classifier. `Other` is the
    /// failure fallback and is never a candidate.
    pub const CANDIDATE_LABELS: [&'static str; 6] = [
        "Meals & Dining",
        "Travel (Flights)",
        "Accommodation",
        "Local Transport",
        "Office Supplies",
        "Client Entertainment",
    ];

    pub fn as_label(&self) -> &'static str {
        match self {
            Category::MealsAndDining => "Meals & Dining",
            Category::TravelFlights => "Travel (Flights)",
            Category::Accommodation => "Accommodation",
            Category::LocalTransport => "Local Transport",
            Category::OfficeSupplies => "Office Supplies",
            Category::ClientEntertainment => "Client Entertainment",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Meals & Dining" => Ok(Category::MealsAndDining),
            "Travel (Flights)" => Ok(Category::TravelFlights),
            "Accommodation" => Ok(Category::Accommodation),
            "Local Transport" => Ok(Category::LocalTransport),
            "Office Supplies" => Ok(Category::OfficeSupplies),
            "Client Entertainment" => Ok(Category::ClientEntertainment),
            "Other" => Ok(Category::Other),
            other => Err(format!("Unknown category label: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn candidate_labels_round_trip() {
        for label in Category::CANDIDATE_LABELS {
            let c = Category::from_str(label).unwrap();
            assert_eq!(c.to_string(), label);
        }
    }

    #[test]
    fn other_is_not_a_candidate() {
        assert!(!Category::CANDIDATE_LABELS.contains(&"Other"));
        assert_eq!(Category::from_str("Other").unwrap(), Category::Other);
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert!(Category::from_str("Groceries").is_err());
    }

    #[test]
    fn serde_uses_label_strings() {
        let json = serde_json::to_string(&Category::MealsAndDining).unwrap();
        assert_eq!(json, "\"Meals & Dining\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::MealsAndDining);
    }
}
