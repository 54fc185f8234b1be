//! USDA soil-texture classification.
//!
//! The triangle is encoded as an ordered rule table evaluated top to bottom;
//! the first matching rule wins, so precedence lives in [`TEXTURE_RULES`].

use serde::Serialize;

use super::SoilComposition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TextureClass {
    Sand,
    #[serde(rename = "Loamy Sand")]
    LoamySand,
    #[serde(rename = "Sandy Loam")]
    SandyLoam,
    Loam,
    #[serde(rename = "Silt Loam")]
    SiltLoam,
    Silt,
    #[serde(rename = "Sandy Clay Loam")]
    SandyClayLoam,
    #[serde(rename = "Clay Loam")]
    ClayLoam,
    #[serde(rename = "Silty Clay Loam")]
    SiltyClayLoam,
    #[serde(rename = "Sandy Clay")]
    SandyClay,
    #[serde(rename = "Silty Clay")]
    SiltyClay,
    Clay,
    Unknown,
}

impl TextureClass {
    pub const fn label(self) -> &'static str {
        match self {
            TextureClass::Sand => "Sand",
            TextureClass::LoamySand => "Loamy Sand",
            TextureClass::SandyLoam => "Sandy Loam",
            TextureClass::Loam => "Loam",
            TextureClass::SiltLoam => "Silt Loam",
            TextureClass::Silt => "Silt",
            TextureClass::SandyClayLoam => "Sandy Clay Loam",
            TextureClass::ClayLoam => "Clay Loam",
            TextureClass::SiltyClayLoam => "Silty Clay Loam",
            TextureClass::SandyClay => "Sandy Clay",
            TextureClass::SiltyClay => "Silty Clay",
            TextureClass::Clay => "Clay",
            TextureClass::Unknown => "Unknown",
        }
    }
}

pub(crate) struct TextureRule {
    pub(crate) class: TextureClass,
    pub(crate) matches: fn(sand: f64, silt: f64, clay: f64) -> bool,
}

pub(crate) const TEXTURE_RULES: &[TextureRule] = &[
    TextureRule {
        class: TextureClass::Sand,
        matches: |sand, silt, clay| sand > 85.0 && silt + 1.5 * clay < 15.0,
    },
    TextureRule {
        class: TextureClass::LoamySand,
        matches: |sand, silt, clay| {
            (70.0..=91.0).contains(&sand) && silt + 1.5 * clay >= 15.0 && silt + 2.0 * clay < 30.0
        },
    },
    TextureRule {
        class: TextureClass::SandyLoam,
        matches: |sand, silt, clay| {
            ((7.0..20.0).contains(&clay) && sand > 52.0 && silt + 2.0 * clay >= 30.0)
                || (clay < 7.0 && silt < 50.0 && silt + 2.0 * clay >= 30.0)
        },
    },
    TextureRule {
        class: TextureClass::Loam,
        matches: |sand, silt, clay| {
            (7.0..27.0).contains(&clay) && (28.0..50.0).contains(&silt) && sand <= 52.0
        },
    },
    TextureRule {
        class: TextureClass::SiltLoam,
        matches: |_, silt, clay| {
            (silt >= 50.0 && (12.0..27.0).contains(&clay))
                || ((50.0..80.0).contains(&silt) && clay < 12.0)
        },
    },
    TextureRule {
        class: TextureClass::Silt,
        matches: |_, silt, clay| silt >= 80.0 && clay < 12.0,
    },
    TextureRule {
        class: TextureClass::SandyClayLoam,
        matches: |sand, silt, clay| (20.0..35.0).contains(&clay) && silt < 28.0 && sand > 45.0,
    },
    TextureRule {
        class: TextureClass::ClayLoam,
        matches: |sand, _, clay| (27.0..40.0).contains(&clay) && sand > 20.0 && sand <= 45.0,
    },
    TextureRule {
        class: TextureClass::SiltyClayLoam,
        matches: |sand, _, clay| (27.0..40.0).contains(&clay) && sand <= 20.0,
    },
    TextureRule {
        class: TextureClass::SandyClay,
        matches: |sand, _, clay| clay >= 35.0 && sand > 45.0,
    },
    TextureRule {
        class: TextureClass::SiltyClay,
        matches: |_, silt, clay| clay >= 40.0 && silt >= 40.0,
    },
    TextureRule {
        class: TextureClass::Clay,
        matches: |sand, silt, clay| clay >= 40.0 && sand <= 45.0 && silt < 40.0,
    },
];

pub fn classify_texture(composition: &SoilComposition) -> TextureClass {
    TEXTURE_RULES
        .iter()
        .find(|rule| (rule.matches)(composition.sand, composition.silt, composition.clay))
        .map(|rule| rule.class)
        .unwrap_or(TextureClass::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture(sand: f64, silt: f64, clay: f64) -> TextureClass {
        classify_texture(&SoilComposition { sand, silt, clay })
    }

    #[test]
    fn classifies_each_usda_class() {
        let cases = [
            ((92.0, 5.0, 3.0), TextureClass::Sand),
            ((82.0, 12.0, 6.0), TextureClass::LoamySand),
            ((65.0, 25.0, 10.0), TextureClass::SandyLoam),
            ((40.0, 40.0, 20.0), TextureClass::Loam),
            ((20.0, 65.0, 15.0), TextureClass::SiltLoam),
            ((5.0, 88.0, 7.0), TextureClass::Silt),
            ((60.0, 15.0, 25.0), TextureClass::SandyClayLoam),
            ((32.0, 34.0, 34.0), TextureClass::ClayLoam),
            ((10.0, 56.0, 34.0), TextureClass::SiltyClayLoam),
            ((52.0, 8.0, 40.0), TextureClass::SandyClay),
            ((5.0, 47.0, 48.0), TextureClass::SiltyClay),
            ((20.0, 20.0, 60.0), TextureClass::Clay),
        ];

        for ((sand, silt, clay), expected) in cases {
            assert_eq!(texture(sand, silt, clay), expected, "{sand}/{silt}/{clay}");
        }
    }

    #[test]
    fn rule_order_resolves_shared_boundaries() {
        // Off-triangle point inside both the sandy clay and silty clay regions.
        assert_eq!(texture(46.0, 42.0, 40.0), TextureClass::SandyClay);
    }

    #[test]
    fn off_triangle_compositions_are_unknown() {
        assert_eq!(texture(-5.0, -5.0, -5.0), TextureClass::Unknown);
    }

    #[test]
    fn serializes_with_display_label() {
        let json = serde_json::to_string(&TextureClass::SiltyClayLoam).expect("serialize");
        assert_eq!(json, "\"Silty Clay Loam\"");
    }
}
