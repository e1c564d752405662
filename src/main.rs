use clap::Parser;
use kiss3d::window::Window;

use rust_orrery::config::{CliArgs, Config};
use rust_orrery::error::Result;
use rust_orrery::gui::Simulation;
use rust_orrery::logging;
use rust_orrery::model::{Catalog, SceneComposer, TextureTable};

fn main() {
    let args = CliArgs::parse();
    // Config errors can happen before the subscriber exists, so report on stderr
    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let config = Config::load(args)?;
    logging::init(&config.log_level);

    let catalog = match &config.scene.catalog {
        Some(path) => {
            tracing::info!("Loading catalog from {}", path.display());
            Catalog::read_file(path)?
        }
        None => Catalog::solar_system(),
    };

    let textures = if config.scene.flat_colors {
        None
    } else {
        let textures = TextureTable::standard(&catalog, &config.scene.texture_dir);
        // Check up front, so a missing file doesn't show up as a half-drawn scene
        textures.verify_files()?;
        Some(textures)
    };

    let composer = SceneComposer::new(catalog, textures, &config.scene, &config.camera);

    let mut window = Window::new_with_size(
        &config.window.title,
        config.window.width,
        config.window.height,
    );
    window.set_framerate_limit(Some(60));

    let simulation = Simulation::new(composer, &config, &mut window);
    tracing::info!("Starting render loop");
    window.render_loop(simulation);
    Ok(())
}
