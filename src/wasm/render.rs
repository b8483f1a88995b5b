use js_sys::Float32Array;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlShader, WebGlTexture,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::displacement::{ShaderUniformState, FRAGMENT_SHADER, VERTEX_SHADER};
use crate::error::{SceneError, SceneResult};

// One triangle covering the whole clip space.
const FULLSCREEN_TRIANGLE: [f32; 6] = [-1.0, -1.0, 3.0, -1.0, -1.0, 3.0];

struct Uniforms {
    texture: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    resolution: Option<WebGlUniformLocation>,
    ripples: Option<WebGlUniformLocation>,
    ripple_count: Option<WebGlUniformLocation>,
}

/// WebGL2 side of the ripple pass: program, full-screen geometry and the
/// composite texture.
pub struct Renderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    texture: WebGlTexture,
    uniforms: Uniforms,
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> SceneResult<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| SceneError::ShaderCompile("create_shader returned null".into()))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(SceneError::ShaderCompile(log))
    }
}

fn link_program(
    gl: &GL,
    vertex: &WebGlShader,
    fragment: &WebGlShader,
) -> SceneResult<WebGlProgram> {
    let program = gl
        .create_program()
        .ok_or_else(|| SceneError::ShaderLink("create_program returned null".into()))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(SceneError::ShaderLink(log))
    }
}

impl Renderer {
    /// Set up the ripple program on `canvas`, whose drawing buffer is pinned
    /// to the design resolution; CSS scaling handles the viewport.
    pub fn new(canvas: HtmlCanvasElement, width: u32, height: u32) -> SceneResult<Self> {
        canvas.set_width(width);
        canvas.set_height(height);

        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or(SceneError::NoContext("webgl2"))?
            .dyn_into()
            .map_err(|_| SceneError::NoContext("webgl2"))?;

        let vertex = compile_shader(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
        let fragment = compile_shader(&gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vertex, &fragment)?;

        let vao = gl
            .create_vertex_array()
            .ok_or_else(|| SceneError::Js("create_vertex_array returned null".into()))?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = gl
            .create_buffer()
            .ok_or_else(|| SceneError::Js("create_buffer returned null".into()))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let vertices = Float32Array::from(&FULLSCREEN_TRIANGLE[..]);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW);

        let position = gl.get_attrib_location(&program, "aPosition");
        if position < 0 {
            return Err(SceneError::ShaderLink("aPosition attribute missing".into()));
        }
        gl.enable_vertex_attrib_array(position as u32);
        gl.vertex_attrib_pointer_with_i32(position as u32, 2, GL::FLOAT, false, 0, 0);
        gl.bind_vertex_array(None);

        let texture = gl
            .create_texture()
            .ok_or_else(|| SceneError::Js("create_texture returned null".into()))?;
        gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
        gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);

        let uniforms = Uniforms {
            texture: gl.get_uniform_location(&program, "uTexture"),
            time: gl.get_uniform_location(&program, "uTime"),
            resolution: gl.get_uniform_location(&program, "uResolution"),
            ripples: gl.get_uniform_location(&program, "uRipples"),
            ripple_count: gl.get_uniform_location(&program, "uRippleCount"),
        };

        Ok(Self {
            gl,
            canvas,
            program,
            vao,
            texture,
            uniforms,
        })
    }

    /// Resize the drawing buffer when the design resolution changes.
    pub fn set_size(&self, width: u32, height: u32) {
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
    }

    /// Replace the composite texture with the current contents of `source`.
    /// Drawn once the scene commits the build that produced it.
    pub fn upload(&self, source: &HtmlCanvasElement) -> SceneResult<()> {
        let gl = &self.gl;
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.texture));
        // canvas rows run top-down, gl_FragCoord bottom-up
        gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);
        gl.tex_image_2d_with_u32_and_u32_and_html_canvas_element(
            GL::TEXTURE_2D,
            0,
            GL::RGBA as i32,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            source,
        )?;
        gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 0);
        Ok(())
    }

    pub fn draw(&self, state: &ShaderUniformState) {
        let gl = &self.gl;
        let [width, height] = state.resolution;
        gl.viewport(0, 0, width as i32, height as i32);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        // nothing to distort until the first composite lands
        if state.texture_generation.is_none() {
            return;
        }

        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));

        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.texture));
        gl.uniform1i(self.uniforms.texture.as_ref(), 0);
        gl.uniform1f(self.uniforms.time.as_ref(), state.time);
        gl.uniform2f(self.uniforms.resolution.as_ref(), width, height);
        gl.uniform3fv_with_f32_array(self.uniforms.ripples.as_ref(), &state.ripples.as_uniform());
        gl.uniform1i(self.uniforms.ripple_count.as_ref(), state.ripple_count());

        gl.draw_arrays(GL::TRIANGLES, 0, 3);
        gl.bind_vertex_array(None);
    }
}
