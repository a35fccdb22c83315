use serde::{Deserialize, Serialize};

/// Canonical recipe record.
///
/// Both extraction passes produce one of these with whatever they could
/// recover; the merged record is built field by field from the two.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub prep_time: String,
    #[serde(default)]
    pub cook_time: String,
    #[serde(default)]
    pub total_time: String,
    #[serde(default)]
    pub serving_size: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<Step>,
    #[serde(default)]
    pub nutrition: Nutrition,
}

impl Recipe {
    /// Nothing worth rendering: no name, no ingredients, no instructions.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.ingredients.is_empty() && self.instructions.is_empty()
    }
}

/// One instruction group. Untitled for flat lists, titled for sections.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Step {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl Step {
    pub fn untitled(items: Vec<String>) -> Self {
        Self {
            title: String::new(),
            items,
        }
    }

    pub fn titled(title: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Calories,
    Protein,
    Carbohydrate,
    Fat,
}

impl Nutrient {
    pub const ALL: [Nutrient; 4] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Carbohydrate,
        Nutrient::Fat,
    ];

    /// Key used in rendered output.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Protein => "protein",
            Self::Carbohydrate => "carbohydrate",
            Self::Fat => "fat",
        }
    }

    /// schema.org `NutritionInformation` property.
    pub fn schema_property(&self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Protein => "proteinContent",
            Self::Carbohydrate => "carbohydrateContent",
            Self::Fat => "fatContent",
        }
    }

    /// Match a page label such as "Carbs" or "PROTEIN:" (already cleaned).
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "calories" | "kcal" | "energy" => Some(Self::Calories),
            "protein" => Some(Self::Protein),
            "carbs" | "carbohydrate" | "carbohydrates" => Some(Self::Carbohydrate),
            "fat" => Some(Self::Fat),
            _ => None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Nutrition {
    #[serde(default)]
    pub calories: String,
    #[serde(default)]
    pub protein: String,
    #[serde(default)]
    pub carbohydrate: String,
    #[serde(default)]
    pub fat: String,
}

impl Nutrition {
    pub fn get(&self, nutrient: Nutrient) -> &str {
        match nutrient {
            Nutrient::Calories => &self.calories,
            Nutrient::Protein => &self.protein,
            Nutrient::Carbohydrate => &self.carbohydrate,
            Nutrient::Fat => &self.fat,
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: String) {
        let slot = match nutrient {
            Nutrient::Calories => &mut self.calories,
            Nutrient::Protein => &mut self.protein,
            Nutrient::Carbohydrate => &mut self.carbohydrate,
            Nutrient::Fat => &mut self.fat,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        Nutrient::ALL.iter().all(|n| self.get(*n).is_empty())
    }

    /// Non-empty entries in fixed key order.
    pub fn entries(&self) -> impl Iterator<Item = (Nutrient, &str)> + '_ {
        Nutrient::ALL
            .into_iter()
            .map(move |n| (n, self.get(n)))
            .filter(|(_, v)| !v.is_empty())
    }
}

/// Output of a single extraction pass, before merging.
pub type RecipeCandidate = Recipe;
