//! meshview: a software-rendered 3D mesh viewer
//!
//! Loads a triangle mesh (and optionally a texture), then renders it with a
//! fully software pipeline: explicit world/view/projection transforms,
//! back-face culling, near-plane and screen-edge clipping, and scanline
//! rasterization with perspective-correct texturing and a depth buffer.
//! The window, input polling, and frame pacing live here; everything
//! geometric lives in `renderer`.

mod config;
mod renderer;

use macroquad::prelude::*;

use config::{load_config, RenderConfig};
use renderer::{Color as RasterColor, Framebuffer, Key, Mesh, Scene, Texture as RasterTexture};

/// Physical key bindings for the camera contract. Anything not listed here
/// is ignored.
const KEY_MAP: [(KeyCode, Key); 8] = [
    (KeyCode::W, Key::Forward),
    (KeyCode::S, Key::Backward),
    (KeyCode::A, Key::YawLeft),
    (KeyCode::D, Key::YawRight),
    (KeyCode::Up, Key::Rise),
    (KeyCode::Down, Key::Fall),
    (KeyCode::Left, Key::SlideLeft),
    (KeyCode::Right, Key::SlideRight),
];

const CLEAR_COLOR: RasterColor = RasterColor::new(18, 18, 18);

fn window_conf() -> Conf {
    Conf {
        window_title: "meshview".to_string(),
        window_width: 800,
        window_height: 640,
        window_resizable: true,
        ..Default::default()
    }
}

fn usage() -> ! {
    eprintln!("usage: meshview <mesh.obj> [texture.png] [config.ron]");
    std::process::exit(1);
}

#[macroquad::main(window_conf)]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        usage();
    }

    let mesh = match Mesh::load_from_file(&args[1]) {
        Ok(mesh) => mesh,
        Err(e) => {
            eprintln!("{}: {}", args[1], e);
            std::process::exit(1);
        }
    };
    println!("Loaded {}: {} triangles", args[1], mesh.triangles.len());

    let texture = match args.get(2) {
        Some(path) => match RasterTexture::from_file(path) {
            Ok(tex) => {
                println!("Loaded {}: {}x{}", path, tex.width, tex.height);
                Some(tex)
            }
            Err(e) => {
                eprintln!("{}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let cfg = match args.get(3) {
        Some(path) => match load_config(std::path::Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => RenderConfig::default(),
    };

    let mut fb = Framebuffer::new(cfg.width, cfg.height);
    fb.clear(CLEAR_COLOR);
    let min_frame_ms = cfg.min_frame_ms;
    let mut scene = Scene::new(mesh, texture, cfg);

    let mut last_time = get_time();
    let mut elapsed_ms = 0.0f32;

    loop {
        let now = get_time();
        let delta_ms = ((now - last_time) * 1000.0) as f32;
        last_time = now;
        elapsed_ms += delta_ms;

        // Input is applied every poll, even when the frame is skipped.
        for &(code, key) in KEY_MAP.iter() {
            if is_key_down(code) {
                scene.keypress(key, delta_ms);
            }
        }

        if elapsed_ms >= min_frame_ms {
            fb.clear(CLEAR_COLOR);
            scene.render(&mut fb, elapsed_ms);
            elapsed_ms = 0.0;
        }

        present(&fb);
        next_frame().await;
    }
}

/// Blit the framebuffer to the window, letterboxed to preserve its aspect
/// ratio.
fn present(fb: &Framebuffer) {
    let texture = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
    texture.set_filter(FilterMode::Nearest);

    let fb_aspect = fb.width as f32 / fb.height as f32;
    let (sw, sh) = (screen_width(), screen_height());
    let screen_aspect = sw / sh;
    let (draw_w, draw_h, draw_x, draw_y) = if fb_aspect > screen_aspect {
        let w = sw;
        let h = sw / fb_aspect;
        (w, h, 0.0, (sh - h) * 0.5)
    } else {
        let h = sh;
        let w = sh * fb_aspect;
        (w, h, (sw - w) * 0.5, 0.0)
    };

    clear_background(BLACK);
    draw_texture_ex(
        &texture,
        draw_x,
        draw_y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(draw_w, draw_h)),
            ..Default::default()
        },
    );
}
