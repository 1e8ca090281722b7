//! Map editor preview rendering for infantry.

use ordnance_core::config::{ActorInfo, RenderSpritesInfo};
use ordnance_core::constants::EDITOR_PALETTE;

use crate::animation::Sequences;
use crate::error::SimError;

/// Image the sprite renderer uses for `actor` as played by `race`.
///
/// A race-specific image only wins when it has sequences.
pub fn sprite_image(
    render_sprites: &RenderSpritesInfo,
    actor: &ActorInfo,
    sequences: &Sequences,
    race: &str,
) -> String {
    if let Some(image) = render_sprites.race_images.get(race) {
        if sequences.has_image(image) {
            return image.clone();
        }
    }
    render_sprites
        .image
        .as_deref()
        .unwrap_or(actor.name.as_str())
        .to_lowercase()
}

/// Editor preview of an infantry actor.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderInfantryEditorInfo;

impl RenderInfantryEditorInfo {
    pub fn editor_palette(&self) -> &'static str {
        EDITOR_PALETTE
    }

    pub fn editor_image(
        &self,
        actor: &ActorInfo,
        sequences: &Sequences,
        race: &str,
    ) -> Result<String, SimError> {
        let render_sprites = actor
            .render_sprites
            .as_ref()
            .ok_or_else(|| SimError::MissingRenderSprites(actor.name.clone()))?;
        Ok(sprite_image(render_sprites, actor, sequences, race))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn rifleman(image: Option<&str>) -> ActorInfo {
        ActorInfo {
            name: "E1".to_string(),
            render_sprites: Some(RenderSpritesInfo {
                image: image.map(str::to_string),
                race_images: BTreeMap::from([("soviet".to_string(), "e1.soviet".to_string())]),
            }),
        }
    }

    #[test]
    fn test_editor_palette() {
        assert_eq!(RenderInfantryEditorInfo.editor_palette(), "terrain");
    }

    #[test]
    fn test_image_defaults_to_lowercased_actor_name() {
        let image = RenderInfantryEditorInfo
            .editor_image(&rifleman(None), &Sequences::new(), "allies")
            .unwrap();
        assert_eq!(image, "e1");
    }

    #[test]
    fn test_configured_image_is_lowercased() {
        let image = RenderInfantryEditorInfo
            .editor_image(&rifleman(Some("E1Alt")), &Sequences::new(), "allies")
            .unwrap();
        assert_eq!(image, "e1alt");
    }

    #[test]
    fn test_race_image_needs_sequences() {
        let actor = rifleman(None);
        let editor = RenderInfantryEditorInfo;
        assert_eq!(editor.editor_image(&actor, &Sequences::new(), "soviet").unwrap(), "e1");

        let mut sequences = Sequences::new();
        sequences.add("e1.soviet", "stand", 8);
        assert_eq!(editor.editor_image(&actor, &sequences, "soviet").unwrap(), "e1.soviet");
    }

    #[test]
    fn test_missing_render_sprites_is_an_error() {
        let actor = ActorInfo {
            name: "E1".to_string(),
            render_sprites: None,
        };
        let err = RenderInfantryEditorInfo
            .editor_image(&actor, &Sequences::new(), "allies")
            .unwrap_err();
        assert!(matches!(err, SimError::MissingRenderSprites(name) if name == "E1"));
    }
}
