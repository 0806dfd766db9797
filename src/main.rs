//! EON TV Overlay - native preview
//! Runs the overlay standalone on the desktop to try layouts and remote keys

// Hide console window on Windows release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Use mimalloc for faster memory allocation (Linux, macOS)
#[cfg(all(not(target_env = "msvc"), not(target_arch = "wasm32")))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Page the setup guide pretends to be served from
#[cfg(not(target_arch = "wasm32"))]
const PREVIEW_PAGE_URL: &str = "http://localhost:8080/";

/// Application icon: a dark TV screen with a blue channel arrow
#[cfg(not(target_arch = "wasm32"))]
fn load_icon() -> egui::IconData {
    let size: usize = 64;
    let mut rgba = vec![0u8; size * size * 4];

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;
            let nx = x as f32 / size as f32;
            let ny = y as f32 / size as f32;

            let in_screen = (0.08..=0.92).contains(&nx) && (0.14..=0.74).contains(&ny);
            let in_stand = (0.38..=0.62).contains(&nx) && (0.80..=0.86).contains(&ny);
            // Upward chevron centred on the screen
            let in_arrow = {
                let dx = (nx - 0.5).abs();
                let edge = 0.30 + dx;
                ny >= edge && ny <= edge + 0.12 && dx <= 0.22
            };

            let pixel: [u8; 4] = if in_screen && in_arrow {
                [37, 99, 235, 255]
            } else if in_screen {
                // Navy gradient towards the bottom of the screen
                let t = (ny - 0.14) / 0.60;
                [2, (6.0 + 20.0 * t) as u8, (23.0 + 40.0 * t) as u8, 255]
            } else if in_stand {
                [45, 55, 72, 255]
            } else {
                [0, 0, 0, 0]
            };
            rgba[idx..idx + 4].copy_from_slice(&pixel);
        }
    }

    egui::IconData {
        rgba,
        width: size as u32,
        height: size as u32,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use eon_tv_overlay::host::{Integration, PreviewFrame};
    use eon_tv_overlay::{logging, AppConfig, OverlayApp};

    let config = AppConfig::load()?;
    logging::init(config.log_level())?;

    // An empty channel list is fatal before any window opens
    let registry = config.registry()?;
    log::info!("[INIT] Loaded {} channels", registry.len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([960.0, 540.0])
            .with_icon(load_icon()),
        vsync: true,
        ..Default::default()
    };

    eframe::run_native(
        "EON TV Overlay - Preview",
        options,
        Box::new(move |cc| {
            let integration = Integration::standalone(Box::new(PreviewFrame), &config.player_base_url);
            Ok(Box::new(OverlayApp::new(cc, &config, registry, integration, None, PREVIEW_PAGE_URL)))
        }),
    )?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
