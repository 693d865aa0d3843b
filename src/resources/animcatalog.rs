//! Animation metadata catalog.
//!
//! Holds the named animation records describing a sprite: frame size, an
//! optional `CopyOf` alias and the per-frame duration list. The catalog is
//! read once when the viewer scene initializes and is never mutated.
//!
//! Two source layouts are understood:
//! - the SpriteCollab `AnimData.xml` file
//!   (`AnimData/Anims/Anim[Name, FrameWidth, FrameHeight, CopyOf, Durations/Duration*]`)
//! - its JSON rendition as served by the web host
//!   (`{"Anims": {"Anim": [...]}}`, where `Durations.Duration` is a number or a list)
//!
//! Alias resolution follows exactly one hop. A record whose `CopyOf` target is
//! itself an alias is rejected with [`ViewerError::AliasChain`].

use std::path::Path;

use bevy_ecs::prelude::Resource;
use log::debug;
use serde::Deserialize;

use crate::error::ViewerError;

/// Timing data of an animation, in engine units (one unit is
/// [`DEFAULT_DURATION_UNIT_MS`](crate::resources::viewerconfig::DEFAULT_DURATION_UNIT_MS) by default).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DurationSpec {
    /// One value shared by every frame.
    Uniform(u32),
    /// One value per frame, reused cyclically when shorter than the frame count.
    PerFrame(Vec<u32>),
}

impl DurationSpec {
    /// Normalize to an ordered sequence. A scalar becomes a one-element list.
    pub fn as_sequence(&self) -> Vec<u32> {
        match self {
            DurationSpec::Uniform(d) => vec![*d],
            DurationSpec::PerFrame(list) => list.clone(),
        }
    }
}

/// A single named animation record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnimRecord {
    pub name: String,
    pub frame_width: Option<u32>,
    pub frame_height: Option<u32>,
    /// Name of the record whose frames and timing this one reuses.
    pub copy_of: Option<String>,
    pub durations: Option<DurationSpec>,
}

impl AnimRecord {
    /// Convenience constructor for a record with its own frames.
    pub fn new(
        name: impl Into<String>,
        frame_width: u32,
        frame_height: u32,
        durations: DurationSpec,
    ) -> Self {
        Self {
            name: name.into(),
            frame_width: Some(frame_width),
            frame_height: Some(frame_height),
            durations: Some(durations),
            ..Default::default()
        }
    }

    /// Convenience constructor for an alias record.
    pub fn alias(name: impl Into<String>, copy_of: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            copy_of: Some(copy_of.into()),
            ..Default::default()
        }
    }
}

/// Metadata of an animation after alias resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAnim {
    /// The effective action name (alias target when an alias was followed).
    pub action: String,
    pub frame_width: u32,
    pub frame_height: u32,
    /// Normalized, non-empty duration sequence.
    pub durations: Vec<u32>,
}

/// Catalog of animation records for one sprite.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimCatalog {
    pub anims: Vec<AnimRecord>,
}

impl AnimCatalog {
    pub fn new(anims: Vec<AnimRecord>) -> Self {
        Self { anims }
    }

    /// First record whose name equals `name` exactly.
    pub fn find(&self, name: &str) -> Option<&AnimRecord> {
        self.anims.iter().find(|a| a.name == name)
    }

    /// Record names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.anims.iter().map(|a| a.name.as_str())
    }

    /// Look up `action`, follow at most one `CopyOf` hop and validate the
    /// result.
    pub fn resolve(&self, action: &str) -> Result<ResolvedAnim, ViewerError> {
        let record = self
            .find(action)
            .ok_or_else(|| ViewerError::UnknownAction(action.to_string()))?;

        let record = match record.copy_of.as_deref() {
            Some(target) => {
                let aliased = self.find(target).ok_or_else(|| ViewerError::UnknownAlias {
                    action: action.to_string(),
                    target: target.to_string(),
                })?;
                if let Some(next) = aliased.copy_of.as_deref() {
                    return Err(ViewerError::AliasChain {
                        action: action.to_string(),
                        target: target.to_string(),
                        next: next.to_string(),
                    });
                }
                debug!("Animation '{}' is a copy of '{}'", action, target);
                aliased
            }
            None => record,
        };

        let (frame_width, frame_height) = match (record.frame_width, record.frame_height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
            (w, h) => {
                return Err(ViewerError::InvalidFrameSize {
                    action: record.name.clone(),
                    width: w.unwrap_or(0),
                    height: h.unwrap_or(0),
                });
            }
        };

        let durations = record
            .durations
            .as_ref()
            .map(DurationSpec::as_sequence)
            .unwrap_or_default();
        if durations.is_empty() {
            return Err(ViewerError::MissingDurations(record.name.clone()));
        }

        Ok(ResolvedAnim {
            action: record.name.clone(),
            frame_width,
            frame_height,
            durations,
        })
    }

    /// Parse an `AnimData.xml` document.
    pub fn from_xml_str(xml: &str) -> Result<Self, ViewerError> {
        let raw: XmlAnimData = quick_xml::de::from_str(xml)
            .map_err(|e| ViewerError::Catalog(format!("invalid AnimData XML: {e}")))?;
        let anims = raw
            .anims
            .anim
            .into_iter()
            .map(|a| AnimRecord {
                name: a.name,
                frame_width: a.frame_width,
                frame_height: a.frame_height,
                copy_of: a.copy_of,
                durations: a.durations.map(|d| DurationSpec::PerFrame(d.duration)),
            })
            .collect();
        Ok(Self { anims })
    }

    /// Parse the JSON rendition of `AnimData`.
    pub fn from_json_str(json: &str) -> Result<Self, ViewerError> {
        let raw: JsonAnimData = serde_json::from_str(json)
            .map_err(|e| ViewerError::Catalog(format!("invalid AnimData JSON: {e}")))?;
        let anims = raw
            .anims
            .anim
            .into_vec()
            .into_iter()
            .map(|a| AnimRecord {
                name: a.name,
                frame_width: a.frame_width,
                frame_height: a.frame_height,
                copy_of: a.copy_of,
                durations: a.durations.map(|d| d.duration),
            })
            .collect();
        Ok(Self { anims })
    }

    /// Read a catalog from disk. `.json` files use the JSON layout, anything
    /// else is treated as `AnimData.xml`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ViewerError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ViewerError::Catalog(format!("failed to read {}: {e}", path.display())))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_xml_str(&text)
        }
    }
}

// Raw XML layout. `ShadowSize` and `Index` are not used and are skipped.

#[derive(Debug, Deserialize)]
struct XmlAnimData {
    #[serde(rename = "Anims")]
    anims: XmlAnims,
}

#[derive(Debug, Deserialize)]
struct XmlAnims {
    #[serde(rename = "Anim", default)]
    anim: Vec<XmlAnim>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct XmlAnim {
    name: String,
    #[serde(default)]
    frame_width: Option<u32>,
    #[serde(default)]
    frame_height: Option<u32>,
    #[serde(default)]
    copy_of: Option<String>,
    #[serde(default)]
    durations: Option<XmlDurations>,
}

#[derive(Debug, Deserialize)]
struct XmlDurations {
    #[serde(rename = "Duration", default)]
    duration: Vec<u32>,
}

// Raw JSON layout

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct JsonAnimData {
    anims: JsonAnims,
}

#[derive(Debug, Deserialize)]
struct JsonAnims {
    #[serde(rename = "Anim")]
    anim: OneOrMany<JsonAnim>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(t) => vec![t],
            OneOrMany::Many(v) => v,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct JsonAnim {
    name: String,
    #[serde(default)]
    frame_width: Option<u32>,
    #[serde(default)]
    frame_height: Option<u32>,
    #[serde(default)]
    copy_of: Option<String>,
    #[serde(default)]
    durations: Option<JsonDurations>,
}

#[derive(Debug, Deserialize)]
struct JsonDurations {
    #[serde(rename = "Duration")]
    duration: DurationSpec,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANIM_DATA_XML: &str = r#"<?xml version="1.0" ?>
<AnimData>
    <ShadowSize>1</ShadowSize>
    <Anims>
        <Anim>
            <Name>Walk</Name>
            <Index>0</Index>
            <FrameWidth>32</FrameWidth>
            <FrameHeight>40</FrameHeight>
            <Durations>
                <Duration>8</Duration>
                <Duration>10</Duration>
                <Duration>8</Duration>
                <Duration>10</Duration>
            </Durations>
        </Anim>
        <Anim>
            <Name>Idle</Name>
            <Index>7</Index>
            <FrameWidth>24</FrameWidth>
            <FrameHeight>40</FrameHeight>
            <Durations>
                <Duration>40</Duration>
            </Durations>
        </Anim>
        <Anim>
            <Name>Sleep</Name>
            <Index>5</Index>
            <CopyOf>Idle</CopyOf>
        </Anim>
    </Anims>
</AnimData>
"#;

    fn walk_run_catalog() -> AnimCatalog {
        AnimCatalog::new(vec![
            AnimRecord::alias("walk", "run"),
            AnimRecord::new("run", 16, 16, DurationSpec::Uniform(8)),
        ])
    }

    #[test]
    fn test_resolve_without_alias_keeps_action() {
        let catalog = AnimCatalog::new(vec![AnimRecord::new(
            "walk",
            32,
            32,
            DurationSpec::PerFrame(vec![5, 5, 10]),
        )]);
        let resolved = catalog.resolve("walk").unwrap();
        assert_eq!(resolved.action, "walk");
        assert_eq!((resolved.frame_width, resolved.frame_height), (32, 32));
        assert_eq!(resolved.durations, vec![5, 5, 10]);
    }

    #[test]
    fn test_resolve_follows_one_alias_hop() {
        let resolved = walk_run_catalog().resolve("walk").unwrap();
        assert_eq!(resolved.action, "run");
        assert_eq!((resolved.frame_width, resolved.frame_height), (16, 16));
        assert_eq!(resolved.durations, vec![8]);
    }

    #[test]
    fn test_resolve_unknown_action() {
        let err = walk_run_catalog().resolve("fly").unwrap_err();
        assert!(matches!(err, ViewerError::UnknownAction(name) if name == "fly"));
    }

    #[test]
    fn test_resolve_missing_alias_target() {
        let catalog = AnimCatalog::new(vec![AnimRecord::alias("walk", "run")]);
        let err = catalog.resolve("walk").unwrap_err();
        assert!(matches!(err, ViewerError::UnknownAlias { target, .. } if target == "run"));
    }

    #[test]
    fn test_resolve_rejects_alias_chain() {
        let catalog = AnimCatalog::new(vec![
            AnimRecord::alias("a", "b"),
            AnimRecord::alias("b", "c"),
            AnimRecord::new("c", 8, 8, DurationSpec::Uniform(1)),
        ]);
        let err = catalog.resolve("a").unwrap_err();
        assert!(matches!(err, ViewerError::AliasChain { next, .. } if next == "c"));
    }

    #[test]
    fn test_resolve_rejects_zero_frame_size() {
        let catalog = AnimCatalog::new(vec![AnimRecord::new(
            "walk",
            0,
            32,
            DurationSpec::Uniform(1),
        )]);
        assert!(matches!(
            catalog.resolve("walk"),
            Err(ViewerError::InvalidFrameSize { width: 0, .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_empty_durations() {
        let catalog = AnimCatalog::new(vec![AnimRecord::new(
            "walk",
            8,
            8,
            DurationSpec::PerFrame(vec![]),
        )]);
        assert!(matches!(
            catalog.resolve("walk"),
            Err(ViewerError::MissingDurations(_))
        ));
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let catalog = walk_run_catalog();
        assert!(catalog.find("run").is_some());
        assert!(catalog.find("Run").is_none());
    }

    #[test]
    fn test_parse_anim_data_xml() {
        let catalog = AnimCatalog::from_xml_str(ANIM_DATA_XML).unwrap();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Walk", "Idle", "Sleep"]);

        let walk = catalog.find("Walk").unwrap();
        assert_eq!(walk.frame_width, Some(32));
        assert_eq!(walk.frame_height, Some(40));
        assert_eq!(
            walk.durations,
            Some(DurationSpec::PerFrame(vec![8, 10, 8, 10]))
        );

        let sleep = catalog.resolve("Sleep").unwrap();
        assert_eq!(sleep.action, "Idle");
        assert_eq!(sleep.frame_width, 24);
        assert_eq!(sleep.durations, vec![40]);
    }

    #[test]
    fn test_parse_json_scalar_and_list_durations() {
        let json = r#"{
            "Anims": {
                "Anim": [
                    {"Name": "walk", "FrameWidth": 32, "FrameHeight": 32,
                     "Durations": {"Duration": [5, 5, 10]}},
                    {"Name": "run", "FrameWidth": 16, "FrameHeight": 16,
                     "Durations": {"Duration": 8}},
                    {"Name": "hop", "CopyOf": "run"}
                ]
            }
        }"#;
        let catalog = AnimCatalog::from_json_str(json).unwrap();
        assert_eq!(
            catalog.find("walk").unwrap().durations,
            Some(DurationSpec::PerFrame(vec![5, 5, 10]))
        );
        assert_eq!(
            catalog.find("run").unwrap().durations,
            Some(DurationSpec::Uniform(8))
        );
        assert_eq!(catalog.resolve("hop").unwrap().action, "run");
    }

    #[test]
    fn test_parse_json_single_anim_object() {
        let json = r#"{"Anims": {"Anim": {"Name": "idle", "FrameWidth": 8,
            "FrameHeight": 8, "Durations": {"Duration": 3}}}}"#;
        let catalog = AnimCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.anims.len(), 1);
        assert_eq!(catalog.resolve("idle").unwrap().durations, vec![3]);
    }

    #[test]
    fn test_parse_invalid_xml_is_catalog_error() {
        assert!(matches!(
            AnimCatalog::from_xml_str("<AnimData><Anims>"),
            Err(ViewerError::Catalog(_))
        ));
    }

    #[test]
    fn test_load_picks_parser_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let xml_path = dir.path().join("AnimData.xml");
        std::fs::write(&xml_path, ANIM_DATA_XML).unwrap();
        assert_eq!(AnimCatalog::load(&xml_path).unwrap().anims.len(), 3);

        let json_path = dir.path().join("anims.json");
        std::fs::write(
            &json_path,
            r#"{"Anims":{"Anim":[{"Name":"x","FrameWidth":1,"FrameHeight":1,"Durations":{"Duration":1}}]}}"#,
        )
        .unwrap();
        assert_eq!(AnimCatalog::load(&json_path).unwrap().anims.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            AnimCatalog::load("/nonexistent/AnimData.xml"),
            Err(ViewerError::Catalog(_))
        ));
    }
}
