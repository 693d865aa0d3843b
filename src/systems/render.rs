//! Render system.
//!
//! Draws every entity with a [`Sprite`] and [`MapPosition`] in [`ZIndex`]
//! order. [`Scale`] multiplies the drawn size around the sprite's origin.
//! A [`Tint`] in [`TintMode::Fill`](crate::components::tint::TintMode::Fill)
//! is drawn through the tint-fill shader from [`ShaderStore`].

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;
use crate::components::tint::Tint;
use crate::components::zindex::ZIndex;
use crate::resources::shaderstore::{ShaderStore, TINT_FILL_SHADER};
use crate::resources::texturestore::TextureStore;

/// One resolved draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub tex_key: String,
    pub src: Rectangle,
    pub dest: Rectangle,
    pub origin: Vector2,
    pub color: Color,
    pub fill: bool,
    pub z: ZIndex,
}

/// Build the sorted draw list from the world.
pub fn collect_draw_list(world: &mut World) -> Vec<DrawItem> {
    let mut q = world.query::<(
        &Sprite,
        &MapPosition,
        Option<&ZIndex>,
        Option<&Scale>,
        Option<&Tint>,
    )>();
    let mut items: Vec<DrawItem> = q
        .iter(world)
        .map(|(sprite, pos, z, scale, tint)| {
            let scale = scale.copied().unwrap_or_default().scale;
            let tint = tint.copied().unwrap_or_default();
            DrawItem {
                tex_key: sprite.tex_key.clone(),
                // Source rect selects a frame from the spritesheet
                src: Rectangle {
                    x: sprite.offset.x,
                    y: sprite.offset.y,
                    width: sprite.width,
                    height: sprite.height,
                },
                dest: Rectangle {
                    x: pos.pos.x,
                    y: pos.pos.y,
                    width: sprite.width * scale.x,
                    height: sprite.height * scale.y,
                },
                origin: Vector2 {
                    x: sprite.origin.x * scale.x,
                    y: sprite.origin.y * scale.y,
                },
                color: tint.color,
                fill: tint.is_fill(),
                z: z.copied().unwrap_or(ZIndex(0)),
            }
        })
        .collect();
    items.sort_by_key(|item| item.z);
    items
}

/// Draw one frame.
///
/// Takes the raylib handle, thread and shaders out of the world for the
/// duration of the frame so textures can be borrowed alongside them.
pub fn render_system(world: &mut World) {
    let items = collect_draw_list(world);

    let Some(mut rl) = world.remove_non_send_resource::<RaylibHandle>() else {
        return;
    };
    let Some(th) = world.remove_non_send_resource::<RaylibThread>() else {
        world.insert_non_send_resource(rl);
        return;
    };
    let mut shaders = world.remove_non_send_resource::<ShaderStore>();

    {
        let textures = world.resource::<TextureStore>();
        let mut fill_shader = shaders
            .as_mut()
            .and_then(|store| store.get_mut(TINT_FILL_SHADER));

        let mut d = rl.begin_drawing(&th);
        d.clear_background(Color::BLACK);

        for item in items.iter() {
            let Some(tex) = textures.get(&item.tex_key) else {
                continue;
            };
            match (item.fill, fill_shader.as_deref_mut()) {
                (true, Some(shader)) => {
                    let mut s = d.begin_shader_mode(shader);
                    s.draw_texture_pro(tex, item.src, item.dest, item.origin, 0.0, item.color);
                }
                _ => d.draw_texture_pro(tex, item.src, item.dest, item.origin, 0.0, item.color),
            }
        }
    }

    if let Some(shaders) = shaders {
        world.insert_non_send_resource(shaders);
    }
    world.insert_non_send_resource(th);
    world.insert_non_send_resource(rl);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_sorted_by_z() {
        let mut world = World::new();
        world.spawn((
            Sprite::centered("top", 8.0, 8.0),
            MapPosition::new(0.0, 0.0),
            ZIndex(2),
        ));
        world.spawn((
            Sprite::centered("bottom", 8.0, 8.0),
            MapPosition::new(0.0, 0.0),
            ZIndex(0),
        ));
        world.spawn((
            Sprite::centered("middle", 8.0, 8.0),
            MapPosition::new(0.0, 0.0),
            ZIndex(1),
        ));
        let keys: Vec<String> = collect_draw_list(&mut world)
            .into_iter()
            .map(|i| i.tex_key)
            .collect();
        assert_eq!(keys, vec!["bottom", "middle", "top"]);
    }

    #[test]
    fn test_draw_item_applies_scale_to_size_and_origin() {
        let mut world = World::new();
        let mut sprite = Sprite::centered("walk-anim", 32.0, 24.0);
        sprite.offset = Vector2 { x: 64.0, y: 0.0 };
        world.spawn((sprite, MapPosition::new(100.0, 105.0), Scale::uniform(2.0)));

        let items = collect_draw_list(&mut world);
        let item = &items[0];
        assert_eq!(item.src.x, 64.0);
        assert_eq!(item.src.width, 32.0);
        assert_eq!((item.dest.x, item.dest.y), (100.0, 105.0));
        assert_eq!((item.dest.width, item.dest.height), (64.0, 48.0));
        assert_eq!((item.origin.x, item.origin.y), (32.0, 24.0));
        assert!(!item.fill);
    }

    #[test]
    fn test_draw_item_carries_fill_tint() {
        let mut world = World::new();
        world.spawn((
            Sprite::centered("walk-shadow", 8.0, 8.0),
            MapPosition::new(0.0, 0.0),
            Tint::fill(Color::WHITE),
        ));
        let items = collect_draw_list(&mut world);
        assert!(items[0].fill);
        assert_eq!(items[0].color.r, 255);
    }
}
