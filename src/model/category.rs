use serde::{Deserialize, Serialize};

/// The closed set of categories a transaction can be filed under. The serialized names are the
/// values stored in the `tipo_category` column and must not change.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "entretenimiento")]
    Entertainment,
    #[serde(rename = "servicios")]
    Services,
    #[serde(rename = "alimentos")]
    Food,
    #[serde(rename = "inmueble")]
    Housing,
    #[serde(rename = "viajes")]
    Travel,
    #[serde(rename = "salud")]
    Health,
    #[serde(rename = "rodados")]
    Vehicles,
    #[serde(rename = "educacion")]
    Education,
    #[serde(rename = "vestimenta")]
    Clothing,
    #[serde(rename = "tecnologia")]
    Technology,
    #[serde(rename = "trabajo")]
    Work,
    #[serde(rename = "otros")]
    Other,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Entertainment,
        Category::Services,
        Category::Food,
        Category::Housing,
        Category::Travel,
        Category::Health,
        Category::Vehicles,
        Category::Education,
        Category::Clothing,
        Category::Technology,
        Category::Work,
        Category::Other,
    ];
}
