use anyhow::*;
use structopt::StructOpt;

use mc_path_tracer::loader;
use mc_path_tracer::renderer::RendererT;

#[derive(StructOpt)]
#[structopt(name = "mc-path-tracer", about = "Offline Monte Carlo path tracer")]
struct Opt {
    /// Scene description JSON
    scene: std::path::PathBuf,

    /// Override the output image path from the scene file
    #[structopt(short, long)]
    output: Option<std::path::PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    log::info!("loading scene and building aggregate...");
    let (scene, renderer, mut config) = loader::load(&opt.scene)?;
    if let Some(output) = opt.output {
        config.output_filename = output;
    }

    log::info!("scene loaded, rendering...");
    let begin_time = std::time::SystemTime::now();
    renderer.render(&scene, &config)?;
    let duration = std::time::SystemTime::now().duration_since(begin_time)?;

    log::info!("finished, time used: {:?}", duration);
    Ok(())
}
