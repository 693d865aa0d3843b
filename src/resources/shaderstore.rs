//! Shader storage resource.
//!
//! Stores loaded shaders keyed by string IDs. The render system borrows
//! [`TINT_FILL_SHADER`] here to draw sprites with a solid [`TintMode::Fill`].
//!
//! [`TintMode::Fill`]: crate::components::tint::TintMode::Fill

use raylib::prelude::{RaylibHandle, RaylibThread, Shader};
use rustc_hash::FxHashMap;

/// Key of the built-in tint-fill shader.
pub const TINT_FILL_SHADER: &str = "tint_fill";

/// Replaces each texel's color with the draw tint, keeping texel alpha.
pub const TINT_FILL_FS: &str = r#"#version 330
in vec2 fragTexCoord;
in vec4 fragColor;
uniform sampler2D texture0;
out vec4 finalColor;
void main()
{
    vec4 texel = texture(texture0, fragTexCoord);
    finalColor = vec4(fragColor.rgb, texel.a * fragColor.a);
}
"#;

/// Non-Send resource storing loaded shaders.
///
/// This is a `NonSend` resource because shaders are tied to the OpenGL context.
pub struct ShaderStore {
    shaders: FxHashMap<String, Shader>,
}

impl ShaderStore {
    pub fn new() -> Self {
        Self {
            shaders: FxHashMap::default(),
        }
    }

    /// Store with the built-in shaders compiled.
    pub fn with_builtin(rl: &mut RaylibHandle, th: &RaylibThread) -> Self {
        let mut store = Self::new();
        let shader = rl.load_shader_from_memory(th, None, Some(TINT_FILL_FS));
        store.add(TINT_FILL_SHADER, shader);
        store
    }

    /// Adds a shader, replacing any shader with the same ID.
    pub fn add(&mut self, id: &str, shader: Shader) {
        self.shaders.insert(id.to_string(), shader);
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Shader> {
        self.shaders.get_mut(id)
    }
}

impl Default for ShaderStore {
    fn default() -> Self {
        Self::new()
    }
}
