use log::info;
use std::time::Instant;
use whitted_raytracer::error::Result;
use whitted_raytracer::{ppm, scene, DEFAULT_MAX_DEPTH};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let scene_name = args.next().unwrap_or_else(|| "showcase".to_string());
    let out_path = args.next().unwrap_or_else(|| "output.ppm".to_string());

    let mut tracer = match scene_name.as_str() {
        "single_sphere" => scene::single_sphere(),
        "showcase" => scene::showcase(),
        other => {
            anyhow::bail!("unknown scene '{other}', expected 'single_sphere' or 'showcase'");
        }
    };

    info!("tracing scene '{scene_name}' to {out_path}");
    let start = Instant::now();
    tracer.trace(DEFAULT_MAX_DEPTH);
    info!("traced in {:?}", start.elapsed());

    ppm::write_to_file(tracer.image(), &out_path)?;
    info!("wrote {out_path}");

    Ok(())
}
