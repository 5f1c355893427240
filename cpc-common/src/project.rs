//! Canonical project record
//!
//! Every source adapter produces [`Project`] values. Field names serialize in
//! camelCase and in declaration order, which fixes the layout of the catalog
//! file.
//!
//! Required fields (`title`, `description`, `organiser`, `category`, `craft`,
//! `materials`) are lenient about absence: a missing or `null` value reads as
//! empty so that the validator, not the parser, decides whether the record is
//! usable.
//!
//! Optional fields are [`Lenient`]: a value of the expected type is typed, any
//! other value (including `null`) is kept verbatim. Together with the `extra`
//! maps this makes reading and re-writing a canonical record lossless.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Placeholder used in diagnostics when a record has no title
pub const UNKNOWN_TITLE: &str = "Unknown";

/// A single charity craft project in canonical form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organiser: Option<Organiser>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,

    /// Crafts used, e.g. "Sewing", "Crochet"
    #[serde(default, deserialize_with = "null_as_default")]
    pub craft: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "keep_null")]
    pub equipment: Option<Lenient<Vec<String>>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub materials: Vec<Material>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "keep_null")]
    pub approximate_time: Option<Lenient<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "keep_null")]
    pub need: Option<Lenient<Need>>,

    /// Date string, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "keep_null")]
    pub last_updated: Option<Lenient<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "keep_null")]
    pub pattern: Option<Lenient<Pattern>>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "keep_null")]
    pub deadline: Option<Lenient<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "keep_null")]
    pub image: Option<Lenient<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "keep_null")]
    pub donation_instructions: Option<Lenient<String>>,

    /// Fields not part of the canonical schema, kept as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    /// Title for log messages, falling back to [`UNKNOWN_TITLE`]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            UNKNOWN_TITLE
        } else {
            &self.title
        }
    }

    /// Organiser name, or an empty string if there is none
    pub fn organiser_name(&self) -> &str {
        self.organiser.as_ref().map(Organiser::name).unwrap_or("")
    }
}

/// A field value that is either of the expected type or kept verbatim
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Typed(T),
    Raw(Value),
}

impl<T: DeserializeOwned> Lenient<T> {
    pub fn from_value(value: Value) -> Self {
        match serde_json::from_value(value.clone()) {
            Ok(typed) => Lenient::Typed(typed),
            Err(_) => Lenient::Raw(value),
        }
    }
}

impl<T> Lenient<T> {
    pub fn typed(&self) -> Option<&T> {
        match self {
            Lenient::Typed(value) => Some(value),
            Lenient::Raw(_) => None,
        }
    }
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Lenient::Typed(value)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Lenient<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Lenient::from_value)
    }
}

/// Typed value of an optional field, if it has one
pub fn typed<T>(field: &Option<Lenient<T>>) -> Option<&T> {
    field.as_ref().and_then(Lenient::typed)
}

/// Group running the project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organiser {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "keep_null")]
    pub name: Option<Lenient<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "keep_null")]
    pub url: Option<Lenient<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "keep_null")]
    pub location: Option<Lenient<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Organiser {
    pub fn new(name: impl Into<String>, url: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: Some(Lenient::Typed(name.into())),
            url: Some(Lenient::Typed(url.into())),
            location: Some(Lenient::Typed(location.into())),
            extra: Map::new(),
        }
    }

    /// Name as text, empty if missing or not a string
    pub fn name(&self) -> &str {
        typed(&self.name).map(String::as_str).unwrap_or("")
    }

    /// True for an object without any keys (`{}`)
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.url.is_none() && self.location.is_none() && self.extra.is_empty()
    }
}

/// Material needed for a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Material {
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "keep_null"
    )]
    pub kind: Option<Lenient<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "keep_null")]
    pub amount: Option<Lenient<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Material {
    pub fn new(kind: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            kind: Some(Lenient::Typed(kind.into())),
            amount: Some(Lenient::Typed(amount.into())),
            extra: Map::new(),
        }
    }
}

/// Link to a pattern or instructions sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "keep_null")]
    pub text: Option<Lenient<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "keep_null")]
    pub url: Option<Lenient<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Pattern {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: Some(Lenient::Typed(text.into())),
            url: Some(Lenient::Typed(url.into())),
            extra: Map::new(),
        }
    }
}

/// How urgently the organiser needs donations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Need {
    High,
    Medium,
    Low,
    None,
}

/// Treat an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A present key is `Some`, even when its value is `null`
fn keep_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Project {
        Project {
            title: "Quilt".to_string(),
            description: "A warm quilt".to_string(),
            organiser: Some(Organiser::new("ACME", "https://acme.example", "NSW")),
            category: "Hospitals".to_string(),
            craft: vec!["Sewing".to_string()],
            materials: vec![Material::new("Fabric", "2m")],
            need: Some(Need::High.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_serializes_in_canonical_field_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        let title = json.find("\"title\"").unwrap();
        let organiser = json.find("\"organiser\"").unwrap();
        let craft = json.find("\"craft\"").unwrap();
        let materials = json.find("\"materials\"").unwrap();
        let need = json.find("\"need\"").unwrap();
        assert!(title < organiser && organiser < craft && craft < materials && materials < need);
    }

    #[test]
    fn test_absent_optional_fields_are_omitted() {
        let value = serde_json::to_value(sample()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("equipment"));
        assert!(!obj.contains_key("pattern"));
        assert!(!obj.contains_key("donationInstructions"));
        assert_eq!(obj["need"], json!("High"));
    }

    #[test]
    fn test_camel_case_and_material_type_names() {
        let mut project = sample();
        project.approximate_time = Some("2 hours".to_string().into());
        let value = serde_json::to_value(project).unwrap();
        assert_eq!(value["approximateTime"], json!("2 hours"));
        assert_eq!(value["materials"][0]["type"], json!("Fabric"));
    }

    #[test]
    fn test_missing_and_null_required_fields_read_as_empty() {
        let project: Project = serde_json::from_value(json!({
            "title": null,
            "craft": null
        }))
        .unwrap();
        assert!(project.title.is_empty());
        assert!(project.craft.is_empty());
        assert!(project.materials.is_empty());
        assert!(project.organiser.is_none());
        assert_eq!(project.display_title(), UNKNOWN_TITLE);
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let input = json!({
            "title": "Beanies",
            "featured": true
        });
        let project: Project = serde_json::from_value(input).unwrap();
        assert_eq!(project.extra.get("featured"), Some(&json!(true)));

        let output = serde_json::to_value(&project).unwrap();
        assert_eq!(output["featured"], json!(true));
    }

    #[test]
    fn test_nested_extras_and_nulls_survive_round_trip() {
        let input = json!({
            "title": "Beanies",
            "description": "Newborn beanies",
            "organiser": { "name": "Org", "url": null, "email": "a@b.c" },
            "category": "Hospitals",
            "craft": ["Knitting"],
            "materials": [{ "type": "Yarn", "amount": "50g", "colour": "blue" }],
            "pattern": { "text": "Sheet", "url": "", "pages": 2 },
            "image": null
        });
        let project: Project = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(project.image, Some(Lenient::Raw(Value::Null)));
        assert_eq!(serde_json::to_value(&project).unwrap(), input);
    }

    #[test]
    fn test_off_type_optional_values_are_kept_raw() {
        let input = json!({ "need": "Urgent", "image": 5, "equipment": "Needles" });
        let project: Project = serde_json::from_value(input).unwrap();
        assert_eq!(project.need, Some(Lenient::Raw(json!("Urgent"))));
        assert_eq!(typed(&project.need), None);
        assert_eq!(project.image, Some(Lenient::Raw(json!(5))));

        let output = serde_json::to_value(&project).unwrap();
        assert_eq!(output["need"], json!("Urgent"));
        assert_eq!(output["image"], json!(5));
        assert_eq!(output["equipment"], json!("Needles"));
    }

    #[test]
    fn test_need_accepts_none_level() {
        let project: Project = serde_json::from_value(json!({ "need": "None" })).unwrap();
        assert_eq!(typed(&project.need), Some(&Need::None));
    }

    #[test]
    fn test_organiser_emptiness_is_about_keys() {
        assert!(Organiser::default().is_empty());
        assert!(!Organiser::new("", "", "").is_empty());

        let only_extra: Organiser = serde_json::from_value(json!({ "email": "a@b.c" })).unwrap();
        assert!(!only_extra.is_empty());
        assert_eq!(only_extra.name(), "");
    }
}
