use crate::models::Condition;
use serde::Serialize;

const NO_YES: &[&str] = &["0 = No", "1 = Yes"];
const FEMALE_MALE: &[&str] = &["0 = Female", "1 = Male"];
const PAIN_SEVERITY: &[&str] = &["0 = No pain", "1 = Mild", "2 = Moderate", "3 = Severe"];

/// Declared domain of a questionnaire field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldDomain {
    /// 0 or 1
    Binary,

    /// Integer levels 0..levels
    Ordinal { levels: u8 },

    /// Age in years, bounded by the configured age range
    Age,
}

/// A single named column of a condition's feature vector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureField {
    pub name: &'static str,
    pub label: &'static str,
    pub domain: FieldDomain,
    /// Option descriptions for selectable fields, empty for age
    pub options: &'static [&'static str],
}

impl FeatureField {
    const fn binary(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            domain: FieldDomain::Binary,
            options: NO_YES,
        }
    }

    const fn sex(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            domain: FieldDomain::Binary,
            options: FEMALE_MALE,
        }
    }

    const fn age() -> Self {
        Self {
            name: "age",
            label: "Age",
            domain: FieldDomain::Age,
            options: &[],
        }
    }
}

/// Ordered list of fields for one condition.
///
/// The order is the column order the paired normalizer and classifier were
/// fit with. Changing it requires retraining the artifacts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSpec {
    pub condition: Condition,
    pub title: &'static str,
    pub fields: Vec<FeatureField>,
}

impl FeatureSpec {
    pub fn for_condition(condition: Condition) -> Self {
        match condition {
            Condition::Lung => Self::lung(),
            Condition::Heart => Self::heart(),
            Condition::Breast => Self::breast(),
        }
    }

    pub fn lung() -> Self {
        Self {
            condition: Condition::Lung,
            title: Condition::Lung.display_name(),
            fields: vec![
                FeatureField::sex("gender", "Gender"),
                FeatureField::age(),
                FeatureField::binary("smoking", "Smoking"),
                FeatureField::binary("chronic_disease", "Chronic Disease"),
                FeatureField::binary("wheezing", "Wheezing"),
                FeatureField::binary("coughing", "Coughing"),
                FeatureField::binary("shortness_of_breath", "Shortness of Breath"),
                FeatureField::binary("chest_pain", "Chest Pain"),
            ],
        }
    }

    pub fn heart() -> Self {
        Self {
            condition: Condition::Heart,
            title: Condition::Heart.display_name(),
            fields: vec![
                FeatureField::age(),
                FeatureField::sex("sex", "Sex"),
                FeatureField {
                    name: "chest_pain_severity",
                    label: "Chest Pain Severity",
                    domain: FieldDomain::Ordinal { levels: 4 },
                    options: PAIN_SEVERITY,
                },
                FeatureField::binary("exercise_induced_pain", "Chest Pain During Exercise"),
            ],
        }
    }

    pub fn breast() -> Self {
        Self {
            condition: Condition::Breast,
            title: Condition::Breast.display_name(),
            fields: vec![
                FeatureField::age(),
                FeatureField::binary("family_history", "Family History"),
                FeatureField::binary("pain", "Breast Pain"),
                FeatureField::binary("lump_felt", "Lump Felt"),
                FeatureField::binary("nipple_discharge", "Nipple Discharge"),
                FeatureField::binary("skin_changes", "Skin Changes"),
            ],
        }
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    pub fn field(&self, name: &str) -> Option<&FeatureField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}
