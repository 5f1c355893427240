//! Canonical schema validation
//!
//! A record is accepted only if every required field is present and
//! non-empty. There is no partial validity. The organiser counts as present
//! when it is an object with at least one key, whatever the values.

use cpc_common::Project;
use thiserror::Error;

/// Required fields, in the order they are checked
pub const REQUIRED_FIELDS: [&str; 6] = [
    "title",
    "description",
    "organiser",
    "category",
    "craft",
    "materials",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field '{0}' is missing or empty")]
    MissingField(&'static str),
}

/// Check the required fields of a project
pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    let present = [
        !project.title.is_empty(),
        !project.description.is_empty(),
        project.organiser.as_ref().is_some_and(|o| !o.is_empty()),
        !project.category.is_empty(),
        !project.craft.is_empty(),
        !project.materials.is_empty(),
    ];

    match REQUIRED_FIELDS.iter().zip(present).find(|(_, ok)| !ok) {
        Some((field, _)) => Err(ValidationError::MissingField(*field)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpc_common::{Material, Organiser};
    use serde_json::json;

    fn complete() -> Project {
        Project {
            title: "Fidget Blankets".to_string(),
            description: "Sensory blankets".to_string(),
            organiser: Some(Organiser::new("Aged Care Crafters", "", "SA")),
            category: "Aged Care".to_string(),
            craft: vec!["Sewing".to_string()],
            materials: vec![Material::new("Fabric", "1m")],
            ..Default::default()
        }
    }

    #[test]
    fn test_complete_record_is_valid() {
        assert_eq!(validate_project(&complete()), Ok(()));
    }

    #[test]
    fn test_each_required_field_is_enforced() {
        let cases: Vec<(&str, fn(&mut Project))> = vec![
            ("title", |p: &mut Project| p.title.clear()),
            ("description", |p: &mut Project| p.description.clear()),
            ("organiser", |p: &mut Project| p.organiser = None),
            ("category", |p: &mut Project| p.category.clear()),
            ("craft", |p: &mut Project| p.craft.clear()),
            ("materials", |p: &mut Project| p.materials.clear()),
        ];

        for (field, break_it) in cases {
            let mut project = complete();
            break_it(&mut project);
            assert_eq!(
                validate_project(&project),
                Err(ValidationError::MissingField(field)),
                "field {field}"
            );
        }
    }

    #[test]
    fn test_organiser_without_keys_is_invalid() {
        let mut project = complete();
        project.organiser = Some(Organiser::default());
        assert_eq!(
            validate_project(&project),
            Err(ValidationError::MissingField("organiser"))
        );
    }

    #[test]
    fn test_organiser_with_blank_values_is_valid() {
        let project: Project = serde_json::from_value(json!({
            "title": "Fidget Blankets",
            "description": "Sensory blankets",
            "organiser": { "name": "", "url": "", "location": "" },
            "category": "Aged Care",
            "craft": ["Sewing"],
            "materials": [{ "type": "Fabric", "amount": "1m" }]
        }))
        .unwrap();
        assert_eq!(validate_project(&project), Ok(()));
    }

    #[test]
    fn test_null_organiser_is_invalid() {
        let project: Project = serde_json::from_value(json!({
            "title": "Fidget Blankets",
            "organiser": null
        }))
        .unwrap();
        assert!(project.organiser.is_none());
        assert_eq!(
            validate_project(&project),
            Err(ValidationError::MissingField("description"))
        );
    }

    #[test]
    fn test_first_missing_field_is_reported() {
        let project = Project::default();
        assert_eq!(
            validate_project(&project),
            Err(ValidationError::MissingField("title"))
        );
    }

    #[test]
    fn test_optional_fields_not_required() {
        let project = complete();
        assert!(project.equipment.is_none());
        assert!(project.need.is_none());
        assert_eq!(validate_project(&project), Ok(()));
    }
}
