//! Showcase manifest: the character roster, their clips and the service cards.
use dioxus::logger::tracing::{error, info};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

const SHOWCASE_JSON: &str = include_str!("../assets/showcase.json");

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid showcase manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("character `{0}` is listed more than once")]
    DuplicateCharacter(String),

    #[error("character `{0}` has no audio path")]
    MissingAudio(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    pub audio: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Service {
    pub title: String,
    pub blurb: String,
    #[serde(default = "default_service_icon")]
    pub icon: String,
}

fn default_service_icon() -> String {
    "mic".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Showcase {
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub services: Vec<Service>,
}

impl Showcase {
    /// Parse and validate a manifest.
    pub fn parse(raw: &str) -> Result<Self, ManifestError> {
        let showcase: Showcase = serde_json::from_str(raw)?;
        showcase.registry()?;
        Ok(showcase)
    }

    pub fn empty() -> Self {
        Self {
            title: "Voicecast".to_string(),
            tagline: String::new(),
            characters: Vec::new(),
            services: Vec::new(),
        }
    }

    pub fn registry(&self) -> Result<CharacterRegistry, ManifestError> {
        CharacterRegistry::from_pairs(
            self.characters
                .iter()
                .map(|c| (c.id.as_str(), c.audio.as_str())),
        )
    }
}

/// The bundled manifest. A broken manifest leaves the page with no roster.
pub static SHOWCASE: Lazy<Showcase> = Lazy::new(|| match Showcase::parse(SHOWCASE_JSON) {
    Ok(showcase) => {
        info!(
            characters = showcase.characters.len(),
            services = showcase.services.len(),
            "loaded showcase manifest"
        );
        showcase
    }
    Err(err) => {
        error!(%err, "falling back to an empty showcase");
        Showcase::empty()
    }
});

/// Character id to clip location. Fixed once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterRegistry {
    clips: HashMap<String, String>,
}

impl CharacterRegistry {
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ManifestError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut clips = HashMap::new();
        for (id, audio) in pairs {
            let id = id.into();
            let audio = audio.into();
            if audio.trim().is_empty() {
                return Err(ManifestError::MissingAudio(id));
            }
            if clips.contains_key(&id) {
                return Err(ManifestError::DuplicateCharacter(id));
            }
            clips.insert(id, audio);
        }
        Ok(Self { clips })
    }

    pub fn resolve(&self, id: &str) -> Option<&str> {
        self.clips.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}
