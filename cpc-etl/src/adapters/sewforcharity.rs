//! Sewing for Charity Australia project sheets
//!
//! Raw records carry only a title, a traffic-light colour, a link to the
//! project sheet and an image. Everything else is filled in from fixed
//! organiser details and a title-based craft table.

use super::{AdapterError, RecordResult, SourceAdapter, TransformContext};
use cpc_common::time::format_date;
use cpc_common::{Lenient, Material, Need, Organiser, Pattern, Project};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

const ORGANISER_NAME: &str = "Sewing for Charity Australia";
const ORGANISER_URL: &str = "https://sewingforcharity.com/";
const ORGANISER_LOCATION: &str = "QLD";
const CATEGORY: &str = "Family Services";
const APPROXIMATE_TIME: &str = "Varies";
const DEADLINE: &str = "Ongoing";
const PATTERN_TEXT: &str = "Download Project Sheet";
const MATERIAL_AMOUNT: &str = "See pattern";
const DONATION_INSTRUCTIONS: &str = "Mail to: 38 Bladensburg Drive, Waterford QLD 4133. \
Deliver to: The Sewing Lair Beenleigh or Moorooka. Please label donations.";

/// Titles containing this are not craft projects
const EXCLUDED_TITLE: &str = "Savvy Shoppers";

/// Crafts, equipment and materials for a kind of project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CraftProfile {
    pub craft: &'static [&'static str],
    pub equipment: &'static [&'static str],
    pub material: &'static str,
}

/// One row of the craft table: any listed substring in the title selects the profile
#[derive(Debug, Clone, Copy)]
pub struct CraftRule {
    pub title_contains: &'static [&'static str],
    pub profile: CraftProfile,
}

impl CraftRule {
    fn matches(&self, title: &str) -> bool {
        self.title_contains.iter().any(|needle| title.contains(needle))
    }
}

/// Checked top to bottom, first match wins
pub const CRAFT_RULES: &[CraftRule] = &[
    CraftRule {
        title_contains: &["Worry Worms", "Heart String Hearts"],
        profile: CraftProfile {
            craft: &["Crochet"],
            equipment: &["Crochet Hook"],
            material: "Yarn",
        },
    },
    CraftRule {
        title_contains: &["Soft Toys"],
        profile: CraftProfile {
            craft: &["Sewing", "Knitting", "Crochet"],
            equipment: &["Sewing Machine", "Knitting Needles", "Crochet Hook"],
            material: "Fabric/Yarn",
        },
    },
];

/// Used when no rule matches
pub const DEFAULT_PROFILE: CraftProfile = CraftProfile {
    craft: &["Sewing"],
    equipment: &["Sewing Machine"],
    material: "Fabric",
};

/// Pick the craft profile for a title
pub fn craft_profile(title: &str) -> CraftProfile {
    CRAFT_RULES
        .iter()
        .find(|rule| rule.matches(title))
        .map(|rule| rule.profile)
        .unwrap_or(DEFAULT_PROFILE)
}

/// Map the source's traffic-light colour to a need level
///
/// `None` means the organiser has paused the project (red) and it must be
/// left out of the catalog.
pub fn need_for_colour(colour: Option<&str>) -> Option<Need> {
    match colour.map(str::to_lowercase).as_deref() {
        Some("red") => None,
        Some("green") => Some(Need::High),
        Some("yellow") => Some(Need::Low),
        _ => Some(Need::Medium),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSheet {
    title: Option<String>,
    colour: Option<String>,
    link: Option<String>,
    image: Option<String>,
}

pub struct SewForCharityAdapter;

impl SewForCharityAdapter {
    fn build_project(&self, sheet: RawSheet, need: Need, last_updated: &str) -> Project {
        let title = sheet.title.unwrap_or_default().trim().to_string();
        let profile = craft_profile(&title);

        Project {
            description: title.clone(),
            title,
            organiser: Some(Organiser::new(
                ORGANISER_NAME,
                ORGANISER_URL,
                ORGANISER_LOCATION,
            )),
            category: CATEGORY.to_string(),
            craft: profile.craft.iter().map(|c| c.to_string()).collect(),
            equipment: Some(Lenient::Typed(
                profile.equipment.iter().map(|e| e.to_string()).collect(),
            )),
            materials: vec![Material::new(profile.material, MATERIAL_AMOUNT)],
            approximate_time: Some(APPROXIMATE_TIME.to_string().into()),
            need: Some(need.into()),
            last_updated: Some(last_updated.to_string().into()),
            pattern: Some(Pattern::new(PATTERN_TEXT, sheet.link.unwrap_or_default()).into()),
            deadline: Some(DEADLINE.to_string().into()),
            image: Some(sheet.image.unwrap_or_default().into()),
            donation_instructions: Some(DONATION_INSTRUCTIONS.to_string().into()),
            extra: Default::default(),
        }
    }
}

impl SourceAdapter for SewForCharityAdapter {
    fn name(&self) -> &'static str {
        "SewForCharity"
    }

    fn source_file(&self) -> &'static str {
        "sewforcharity.json"
    }

    fn transform(
        &self,
        raw: Vec<Value>,
        ctx: &TransformContext,
    ) -> Result<Vec<RecordResult>, AdapterError> {
        let last_updated = format_date(ctx.today);
        let mut projects = Vec::with_capacity(raw.len());

        for (index, value) in raw.into_iter().enumerate() {
            if !value.is_object() {
                return Err(AdapterError::InvalidRecord {
                    source_name: self.name(),
                    index,
                    reason: "expected a JSON object".to_string(),
                });
            }
            let sheet: RawSheet =
                serde_json::from_value(value).map_err(|e| AdapterError::InvalidRecord {
                    source_name: self.name(),
                    index,
                    reason: e.to_string(),
                })?;

            let title = sheet.title.as_deref().unwrap_or("").trim();
            if title.contains(EXCLUDED_TITLE) {
                debug!(title, "Excluding non-craft listing");
                continue;
            }

            let Some(need) = need_for_colour(sheet.colour.as_deref()) else {
                debug!(title, "Excluding paused project (red)");
                continue;
            };

            projects.push(Ok(self.build_project(sheet, need, &last_updated)));
        }

        Ok(projects)
    }
}
